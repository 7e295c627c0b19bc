// Domain error types - structured context for callers, no internal disclosure

use crate::core::models::Session;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by the scheduling half of the core.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Proposed interval has `start >= end` (HTTP 400)
    #[error("invalid interval: start {start} does not precede end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Proposed slot overlaps existing sessions in the same hall (HTTP 409)
    #[error("schedule conflict with {} existing session(s)", .conflicts.len())]
    Conflict { conflicts: Vec<Session> },

    /// Session title failed boundary validation (HTTP 400)
    #[error("invalid session title: {0}")]
    InvalidTitle(String),

    /// Referenced session does not exist (HTTP 404)
    #[error("session not found")]
    NotFound,

    /// Persistence collaborator timed out or is down (HTTP 503, retryable)
    #[error("scheduling backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by credential issuance and verification.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Requested TTL outside the accepted range (HTTP 400)
    #[error("requested ttl of {minutes} minutes is out of range")]
    InvalidTtl { minutes: i64 },

    /// Malformed payload or integrity tag mismatch (HTTP 400).
    /// The two cases are deliberately indistinguishable.
    #[error("token is invalid")]
    TokenInvalid,

    /// Token expiry instant has passed (HTTP 410)
    #[error("token has expired")]
    TokenExpired,

    /// Current time is outside the session's scheduled window (HTTP 409)
    #[error("session is not active")]
    SessionNotActive,

    /// Referenced session does not exist (HTTP 404)
    #[error("session not found")]
    SessionNotFound,

    /// Neither a user id nor an email was supplied for check-in (HTTP 400)
    #[error("identity required: supply a user id or an email")]
    IdentityRequired,

    /// Cryptographic error (HTTP 500)
    #[error("cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// Collaborator timed out or is down (HTTP 503, retryable)
    #[error("credential backend unavailable: {0}")]
    Unavailable(String),
}

/// Cryptographic operation errors
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Failed to initialize the MAC from the configured key
    #[error("failed to initialize mac: {0}")]
    HashingError(String),

    /// Failed to serialize the payload for signing
    #[error("failed to encode payload for signing: {0}")]
    SigningError(String),

    /// Configured secret has the wrong length or encoding
    #[error("invalid signing secret: {0}")]
    KeyLoadError(String),
}

/// Failures reported by persistence/identity collaborators.
///
/// `Unavailable` is the only retryable kind; everything else is terminal
/// for the current operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested entity does not exist
    #[error("not found")]
    NotFound,

    /// Storage-level exclusion constraint rejected an overlapping write.
    /// This is the authoritative double-booking guard behind the
    /// conflict detector's fast-path check.
    #[error("exclusion constraint rejected write: {} conflicting session(s)", .0.len())]
    Exclusion(Vec<Session>),

    /// Timeout or outage; callers may retry idempotent operations
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl ScheduleError {
    /// Get user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ScheduleError::InvalidInterval { .. } => {
                "Session start must be before session end".to_string()
            }
            ScheduleError::Conflict { conflicts } => {
                let listing: Vec<String> = conflicts
                    .iter()
                    .map(|s| format!("'{}' {}", s.title, s.slot))
                    .collect();
                format!("Hall already booked by: {}", listing.join(", "))
            }
            ScheduleError::InvalidTitle(reason) => format!("Invalid title: {}", reason),
            ScheduleError::NotFound => "Session not found".to_string(),
            ScheduleError::Unavailable(_) => "Service unavailable, try again".to_string(),
        }
    }
}

impl CredentialError {
    /// Get user-friendly error message.
    ///
    /// Expired tokens and inactive sessions render distinct texts so a
    /// front-desk operator knows whether to regenerate the QR code or wait.
    pub fn user_message(&self) -> String {
        match self {
            CredentialError::InvalidTtl { minutes } => {
                format!("TTL of {} minutes is not accepted", minutes)
            }
            CredentialError::TokenInvalid => "This QR code is not valid".to_string(),
            CredentialError::TokenExpired => {
                "This QR code has expired; generate a new one".to_string()
            }
            CredentialError::SessionNotActive => {
                "The session is not currently running".to_string()
            }
            CredentialError::SessionNotFound => "Session not found".to_string(),
            CredentialError::IdentityRequired => {
                "Provide a registration id or an email to check in".to_string()
            }
            CredentialError::Crypto(_) => "Internal error".to_string(),
            CredentialError::Unavailable(_) => "Service unavailable, try again".to_string(),
        }
    }
}

impl From<StoreError> for ScheduleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ScheduleError::NotFound,
            StoreError::Exclusion(conflicts) => ScheduleError::Conflict { conflicts },
            StoreError::Unavailable(reason) => ScheduleError::Unavailable(reason),
        }
    }
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CredentialError::SessionNotFound,
            // Attendance/identity writes never hit the scheduling exclusion
            // constraint; treat a misbehaving collaborator as an outage.
            StoreError::Exclusion(_) => {
                CredentialError::Unavailable("unexpected exclusion constraint".to_string())
            }
            StoreError::Unavailable(reason) => CredentialError::Unavailable(reason),
        }
    }
}
