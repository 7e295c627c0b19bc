// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Credential issuance.
//!
//! Tokens are only minted while their session is live, and never outlive
//! the session: `expires_at = min(now + ttl, session.end)`.

use chrono::Duration;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::audit::AuditLogger;
use crate::core::constants::{audit, ttl};
use crate::core::crypto::TokenSigner;
use crate::core::errors::CredentialError;
use crate::core::models::{EventId, SessionId};
use crate::core::traits::{Clock, SessionStore};
use crate::credential::token::{self, TokenClaims};

/// A freshly minted token plus the claims it binds.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub encoded: String,
    pub claims: TokenClaims,
}

/// Per-session outcome of bulk issuance. One session failing (e.g. not
/// yet started) does not abort the others.
#[derive(Debug)]
pub struct BulkIssueOutcome {
    pub session_id: SessionId,
    pub result: Result<IssuedToken, CredentialError>,
}

pub struct CredentialIssuer {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    signer: TokenSigner,
    audit: AuditLogger,
}

impl CredentialIssuer {
    pub fn new(
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        signer: TokenSigner,
        audit: AuditLogger,
    ) -> Self {
        Self {
            store,
            clock,
            signer,
            audit,
        }
    }

    /// Mint a time-bound attendance token for a live session.
    pub async fn issue(
        &self,
        session_id: SessionId,
        event_id: EventId,
        requested_ttl_minutes: i64,
    ) -> Result<IssuedToken, CredentialError> {
        if !(ttl::MIN_TTL_MINUTES..=ttl::MAX_TTL_MINUTES).contains(&requested_ttl_minutes) {
            return Err(CredentialError::InvalidTtl {
                minutes: requested_ttl_minutes,
            });
        }

        let session = self
            .store
            .session(session_id)
            .await?
            .ok_or(CredentialError::SessionNotFound)?;
        // A session id from another event is indistinguishable from a
        // missing one; don't confirm its existence.
        if session.event_id != event_id {
            return Err(CredentialError::SessionNotFound);
        }

        let now = self.clock.now();
        if !session.slot.contains(now) {
            debug!(%session_id, %now, slot = %session.slot, "issuance outside session window");
            return Err(CredentialError::SessionNotActive);
        }

        // A token can never outlive its session
        let expires_at = std::cmp::min(
            now + Duration::minutes(requested_ttl_minutes),
            session.slot.end(),
        );

        let claims = TokenClaims {
            session_id,
            event_id,
            hall_id: session.hall_id,
            issued_at: now,
            expires_at,
        };
        let encoded = token::encode(&claims, &self.signer)?;

        let entry = self.audit.entry(
            session_id,
            audit::QR_GENERATED,
            json!({
                "ttl_minutes": requested_ttl_minutes,
                "expires_at": expires_at,
            }),
            now,
        );
        if let Err(e) = self.store.append_audit(entry).await {
            warn!(error = %e, "audit append failed");
        }

        Ok(IssuedToken { encoded, claims })
    }

    /// Issue tokens for several sessions of one event, independently.
    pub async fn issue_bulk(
        &self,
        event_id: EventId,
        session_ids: Vec<SessionId>,
        requested_ttl_minutes: i64,
    ) -> Vec<BulkIssueOutcome> {
        let mut outcomes = Vec::with_capacity(session_ids.len());
        for session_id in session_ids {
            let result = self.issue(session_id, event_id, requested_ttl_minutes).await;
            outcomes.push(BulkIssueOutcome { session_id, result });
        }
        outcomes
    }
}
