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

//! Credential verification and check-in.
//!
//! The verification state machine runs its checks strictly in order:
//! decode, integrity, expiry, session liveness, identity, then a single
//! atomic attendance upsert. Every failure is terminal for the attempt
//! and mutates nothing; a re-scan is a fresh attempt.

use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::audit::AuditLogger;
use crate::core::constants::audit;
use crate::core::crypto::TokenSigner;
use crate::core::errors::CredentialError;
use crate::core::models::{CheckInMethod, CheckInResult, Identity, UserId};
use crate::core::traits::{AttendanceStore, AttendanceWrite, Clock, Directory, SessionStore};
use crate::credential::token;

pub struct CredentialVerifier {
    sessions: Arc<dyn SessionStore>,
    attendance: Arc<dyn AttendanceStore>,
    directory: Arc<dyn Directory>,
    clock: Arc<dyn Clock>,
    signer: TokenSigner,
    audit: AuditLogger,
}

impl CredentialVerifier {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        attendance: Arc<dyn AttendanceStore>,
        directory: Arc<dyn Directory>,
        clock: Arc<dyn Clock>,
        signer: TokenSigner,
        audit: AuditLogger,
    ) -> Self {
        Self {
            sessions,
            attendance,
            directory,
            clock,
            signer,
            audit,
        }
    }

    /// Validate a presented token and record the attendance.
    pub async fn verify_and_check_in(
        &self,
        encoded: &str,
        identity: Identity,
    ) -> Result<CheckInResult, CredentialError> {
        // 1+2. Decode and integrity. Malformed and tampered tokens are
        // indistinguishable by construction.
        let claims = token::decode(encoded, &self.signer)?;

        // 3. Expiry: the boundary instant itself is already expired.
        let now = self.clock.now();
        if now >= claims.expires_at {
            return Err(CredentialError::TokenExpired);
        }

        // 4. Liveness re-check against current session state. Covers a
        // session edited or ended after the token was issued.
        let session = self
            .sessions
            .session(claims.session_id)
            .await?
            .ok_or(CredentialError::SessionNotFound)?;
        if !session.slot.contains(now) {
            return Err(CredentialError::SessionNotActive);
        }

        // 5. Identity resolution.
        let user_id = self.resolve_identity(&identity).await?;

        // 6. Single atomic check-in upsert; the only write in the flow.
        let write = AttendanceWrite {
            session_id: claims.session_id,
            event_id: claims.event_id,
            user_id,
            scanned_at: now,
            method: CheckInMethod::Qr,
            metadata: json!({ "token_issued_at": claims.issued_at }),
        };
        let (record, was_insert) = self.attendance.upsert_attendance(write).await?;
        let attendance_count = self.attendance.count_present(claims.session_id).await?;

        info!(
            session_id = %claims.session_id,
            user_id = %user_id,
            is_update = !was_insert,
            attendance_count,
            "check-in recorded"
        );
        let entry = self.audit.entry(
            claims.session_id,
            audit::QR_CHECKIN,
            json!({
                "user_id": user_id,
                "is_update": !was_insert,
            }),
            now,
        );
        if let Err(e) = self.sessions.append_audit(entry).await {
            warn!(error = %e, "audit append failed");
        }

        Ok(CheckInResult {
            attendance_id: record.id,
            is_update: !was_insert,
            attendance_count,
        })
    }

    async fn resolve_identity(&self, identity: &Identity) -> Result<UserId, CredentialError> {
        if let Some(user_id) = identity.user_id {
            return Ok(user_id);
        }
        match identity.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Ok(self
                .directory
                .resolve_or_create_user(email, identity.display_name.as_deref())
                .await?),
            _ => Err(CredentialError::IdentityRequired),
        }
    }
}
