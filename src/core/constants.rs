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

//! hallpass constants - Single source of truth for all configuration values.
//!
//! This module centralizes magic numbers, audit event names, and environment
//! variable names to ensure consistency and maintainability.

/// Cryptographic constants
pub mod crypto {
    /// HMAC-SHA256 secret key length in bytes
    pub const SECRET_KEY_LENGTH: usize = 32;
    /// Attendance token wire-format version
    pub const TOKEN_VERSION: &str = "1";
}

/// Credential TTL bounds (minutes)
pub mod ttl {
    /// Shortest TTL a caller may request
    pub const MIN_TTL_MINUTES: i64 = 1;
    /// Longest TTL a caller may request
    pub const MAX_TTL_MINUTES: i64 = 180;
    /// TTL used when no explicit value is configured
    pub const DEFAULT_TTL_MINUTES: i64 = 30;
}

/// Audit event types
pub mod audit {
    /// A QR attendance token was issued for a live session
    pub const QR_GENERATED: &str = "QR_GENERATED";
    /// A QR attendance token was verified and a check-in recorded
    pub const QR_CHECKIN: &str = "QR_CHECKIN";
    /// A session was created through the scheduler
    pub const SESSION_SCHEDULED: &str = "SESSION_SCHEDULED";
    /// An existing session was rescheduled or edited
    pub const SESSION_UPDATED: &str = "SESSION_UPDATED";
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_SECRET: &str = "HALLPASS_SECRET";
    pub const ENV_LOG_LEVEL: &str = "HALLPASS_LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "HALLPASS_LOG_FORMAT";
    pub const ENV_DEFAULT_TTL_MINUTES: &str = "HALLPASS_DEFAULT_TTL_MINUTES";
}

/// Input limits
pub mod limits {
    /// Maximum accepted session title length in characters
    pub const MAX_TITLE_LENGTH: usize = 200;
}
