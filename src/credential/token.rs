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

//! Attendance token wire format.
//!
//! Tokens are opaque strings `"{version}.{payload_b64}.{tag_b64}"` where the
//! payload is the JSON claims and the tag is an HMAC-SHA256 over the exact
//! payload bytes. Callers other than the verifier must never pick them apart.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants::crypto;
use crate::core::crypto::TokenSigner;
use crate::core::errors::{CredentialError, CryptoError};
use crate::core::models::{EventId, HallId, SessionId};

/// Claims bound by a token's integrity tag. Transient: never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub session_id: SessionId,
    pub event_id: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_id: Option<HallId>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Serialize and sign claims into the wire format.
pub fn encode(claims: &TokenClaims, signer: &TokenSigner) -> Result<String, CredentialError> {
    let payload =
        serde_json::to_vec(claims).map_err(|e| CryptoError::SigningError(e.to_string()))?;
    let tag = signer.sign(&payload)?;

    Ok(format!(
        "{}.{}.{}",
        crypto::TOKEN_VERSION,
        URL_SAFE_NO_PAD.encode(&payload),
        URL_SAFE_NO_PAD.encode(tag)
    ))
}

/// Decode a presented token and verify its integrity tag.
///
/// Malformed structure and tag mismatch both yield `TokenInvalid`; the
/// caller cannot learn which check failed.
pub fn decode(encoded: &str, signer: &TokenSigner) -> Result<TokenClaims, CredentialError> {
    let parts: Vec<&str> = encoded.split('.').collect();
    if parts.len() != 3 || parts[0] != crypto::TOKEN_VERSION {
        return Err(CredentialError::TokenInvalid);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| CredentialError::TokenInvalid)?;
    let tag = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|_| CredentialError::TokenInvalid)?;

    // Integrity before parsing: unauthenticated bytes never reach serde
    if !signer.verify(&payload, &tag) {
        return Err(CredentialError::TokenInvalid);
    }

    serde_json::from_slice(&payload).map_err(|_| CredentialError::TokenInvalid)
}
