use crate::core::crypto::TokenSigner;
use crate::core::models::SessionId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// One tamper-evident audit entry. The signature covers the serialized
/// entry minus the signature field itself.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub event_type: &'static str,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
}

#[derive(Serialize)]
struct UnsignedEntry<'a> {
    session_id: SessionId,
    timestamp: DateTime<Utc>,
    event_type: &'a str,
    details: &'a serde_json::Value,
}

pub struct AuditLogger {
    signer: TokenSigner,
}

impl AuditLogger {
    pub fn new(signer: TokenSigner) -> Self {
        Self { signer }
    }

    /// Build a signed entry and emit it as a structured log event.
    /// The caller forwards the returned entry to the persistence sink.
    pub fn entry(
        &self,
        session_id: SessionId,
        event_type: &'static str,
        details: serde_json::Value,
        at: DateTime<Utc>,
    ) -> AuditEntry {
        let unsigned = UnsignedEntry {
            session_id,
            timestamp: at,
            event_type,
            details: &details,
        };

        // Canonicalize JSON for consistent signing
        let payload_str = serde_json::to_string(&unsigned).unwrap_or_default();
        let signature = self
            .signer
            .sign(payload_str.as_bytes())
            .map(hex::encode)
            .unwrap_or_default();

        info!(
            target: "audit",
            signature = %signature,
            payload = %payload_str,
            "SECURE_AUDIT_LOG"
        );

        AuditEntry {
            session_id,
            timestamp: at,
            event_type,
            details,
            signature,
        }
    }
}
