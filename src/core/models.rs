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

//! Domain models for the hallpass core.
//!
//! This module contains pure data structures representing halls, sessions,
//! attendance records, and the strongly-typed request shapes accepted at the
//! boundary. It is designed to be free of I/O side effects.

use crate::core::constants::limits;
use crate::core::errors::ScheduleError;
use crate::core::interval::TimeSlot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Defines a newtype wrapper around Uuid for type-safe identification.
/// All ids serialize as their canonical string form.
macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Create from an existing Uuid
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying Uuid
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Generate a new random id
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map($name)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = uuid::Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Uuid::parse_str(&s).map($name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifies an event (a conference edition)
    EventId
);
uuid_id!(
    /// Identifies a physical hall within an event's venue
    HallId
);
uuid_id!(
    /// Identifies a scheduled session
    SessionId
);
uuid_id!(
    /// Identifies a registered user
    UserId
);
uuid_id!(
    /// Identifies an attendance ledger entry
    AttendanceId
);

/// A physical hall. Owned by an event; capacity and equipment metadata
/// remain editable after sessions reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    pub id: HallId,
    pub event_id: EventId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub equipment: Vec<String>,
}

/// Session type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SessionKind {
    Keynote,
    Workshop,
    Panel,
    Break,
    Social,
    Other,
}

/// A scheduled session. `hall_id` is optional: virtual/no-venue sessions
/// never participate in hall conflict checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub event_id: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_id: Option<HallId>,
    pub title: String,
    pub slot: TimeSlot,
    pub kind: SessionKind,
    #[serde(default)]
    pub speakers: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Strongly-typed create/update request for a session.
///
/// Loose JSON shapes from the dashboard are rejected at this boundary;
/// nothing unvalidated reaches the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDraft {
    pub event_id: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_id: Option<HallId>,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: SessionKind,
    #[serde(default)]
    pub speakers: Vec<UserId>,
}

impl SessionDraft {
    /// Validate boundary rules and produce the session's time slot.
    pub fn validate(&self) -> Result<TimeSlot, ScheduleError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ScheduleError::InvalidTitle("title is empty".to_string()));
        }
        if title.chars().count() > limits::MAX_TITLE_LENGTH {
            return Err(ScheduleError::InvalidTitle(format!(
                "title exceeds {} characters",
                limits::MAX_TITLE_LENGTH
            )));
        }
        TimeSlot::new(self.start, self.end)
    }
}

/// How an attendance record was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInMethod {
    Manual,
    Qr,
}

/// One ledger entry per `(session, user)` pair. A repeated scan updates
/// `scanned_at` and `metadata` in place rather than duplicating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub session_id: SessionId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub scanned_at: DateTime<Utc>,
    pub method: CheckInMethod,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Outcome of a successful verify-and-check-in call.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInResult {
    pub attendance_id: AttendanceId,
    /// True when this scan refreshed an existing record
    pub is_update: bool,
    /// Post-write number of present attendees for the session
    pub attendance_count: u64,
}

/// Who is checking in. At least one of `user_id` / `email` must be set;
/// the verifier resolves or provisions an identity from the email when no
/// user id is supplied.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn email(email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            user_id: None,
            email: Some(email.into()),
            display_name,
        }
    }
}
