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

use crate::core::constants::{config as cfg, crypto, ttl};
use crate::core::crypto::TokenSigner;
use crate::core::errors::CryptoError;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub log_format: String, // "json" or "text"
    /// Hex-encoded 32-byte signing secret. When unset, each process uses
    /// an ephemeral random key and tokens do not survive a restart.
    pub secret_hex: Option<String>,
    /// TTL applied when the dashboard does not send one explicitly
    pub default_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var(cfg::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(cfg::ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string()),
            secret_hex: env::var(cfg::ENV_SECRET).ok(),
            default_ttl_minutes: env::var(cfg::ENV_DEFAULT_TTL_MINUTES)
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m| (ttl::MIN_TTL_MINUTES..=ttl::MAX_TTL_MINUTES).contains(m))
                .unwrap_or(ttl::DEFAULT_TTL_MINUTES),
        }
    }

    /// Build the token signer from the configured secret, or an ephemeral
    /// key when none is set.
    pub fn signer(&self) -> Result<TokenSigner, CryptoError> {
        match &self.secret_hex {
            None => Ok(TokenSigner::ephemeral()),
            Some(encoded) => {
                let bytes = hex::decode(encoded.trim())
                    .map_err(|e| CryptoError::KeyLoadError(e.to_string()))?;
                let secret: [u8; crypto::SECRET_KEY_LENGTH] =
                    bytes.try_into().map_err(|b: Vec<u8>| {
                        CryptoError::KeyLoadError(format!(
                            "expected {} bytes, got {}",
                            crypto::SECRET_KEY_LENGTH,
                            b.len()
                        ))
                    })?;
                Ok(TokenSigner::from_secret(secret))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            secret_hex: None,
            default_ttl_minutes: ttl::DEFAULT_TTL_MINUTES,
        }
    }
}
