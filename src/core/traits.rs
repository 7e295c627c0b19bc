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

//! Collaborator seams.
//!
//! The core consumes persistence, identity, and time through these narrow
//! interfaces. Implementations are expected to bound every call with their
//! own timeout and surface `StoreError::Unavailable` on expiry; nothing in
//! the core blocks indefinitely on a collaborator.

use crate::core::audit::AuditEntry;
use crate::core::errors::StoreError;
use crate::core::models::{
    AttendanceRecord, CheckInMethod, EventId, HallId, Session, SessionId, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Session catalog owned by the persistence collaborator.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All sessions assigned to the given hall, any order.
    async fn sessions_by_hall(&self, hall_id: HallId) -> Result<Vec<Session>, StoreError>;

    /// Fetch a single session, `None` when absent.
    async fn session(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    /// Insert or replace a session.
    ///
    /// Implementations backed by a relational store enforce the hall
    /// exclusion constraint here and reject overlapping writes with
    /// `StoreError::Exclusion`; that constraint, not the in-memory conflict
    /// check, is the authoritative double-booking guard.
    async fn upsert_session(&self, session: Session) -> Result<Session, StoreError>;

    /// Append one audit entry. Best-effort from the core's point of view.
    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError>;
}

/// Fields written on every check-in upsert.
#[derive(Debug, Clone)]
pub struct AttendanceWrite {
    pub session_id: SessionId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub scanned_at: DateTime<Utc>,
    pub method: CheckInMethod,
    pub metadata: serde_json::Value,
}

/// Attendance ledger owned by the persistence collaborator.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Atomic insert-or-update keyed by `(session_id, user_id)`.
    ///
    /// Returns the stored record and whether it was inserted. Must be a
    /// single atomic primitive, not a read-then-write pair: two devices
    /// scanning the same badge concurrently must converge to one record.
    async fn upsert_attendance(
        &self,
        write: AttendanceWrite,
    ) -> Result<(AttendanceRecord, bool), StoreError>;

    /// Post-write count of present attendees for the session.
    async fn count_present(&self, session_id: SessionId) -> Result<u64, StoreError>;
}

/// Identity collaborator.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve an email to an existing user, provisioning a minimal
    /// identity record when none exists.
    async fn resolve_or_create_user(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<UserId, StoreError>;
}

/// Injectable time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock `Clock` used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
