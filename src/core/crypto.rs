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

//! Cryptographic utilities for credential integrity.
//!
//! This module provides the `TokenSigner` which computes and verifies
//! HMAC-SHA256 tags over token payloads, ensuring attendance credentials
//! are tamper-proof. The signing key never leaves the server.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::core::constants::crypto;
use crate::core::errors::CryptoError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; crypto::SECRET_KEY_LENGTH],
}

impl TokenSigner {
    /// Create a signer with a secure random ephemeral key.
    ///
    /// Tokens signed with an ephemeral key do not survive a restart; use
    /// a configured secret for multi-instance or restart-safe deployments.
    pub fn ephemeral() -> Self {
        let mut secret = [0u8; crypto::SECRET_KEY_LENGTH];
        rand::rng().fill(&mut secret[..]);
        Self { secret }
    }

    /// Create a signer from a server-held secret.
    pub fn from_secret(secret: [u8; crypto::SECRET_KEY_LENGTH]) -> Self {
        Self { secret }
    }

    /// Compute the HMAC-SHA256 tag over `payload`.
    pub fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| CryptoError::HashingError(e.to_string()))?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Verify `tag` against `payload` in constant time.
    pub fn verify(&self, payload: &[u8], tag: &[u8]) -> bool {
        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(m) => m,
            Err(_) => return false, // Impossible with a fixed-size key, but fail safe
        };
        mac.update(payload);
        mac.verify_slice(tag).is_ok()
    }
}
