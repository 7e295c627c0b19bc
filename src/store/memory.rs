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

//! In-memory collaborator implementation.
//!
//! Mirrors the contracts a relational backend provides: the hall exclusion
//! constraint on session writes and the atomic `(session, user)` attendance
//! upsert. Backs the test suite and doubles as executable documentation of
//! the store contracts.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::audit::AuditEntry;
use crate::core::errors::StoreError;
use crate::core::models::{
    AttendanceId, AttendanceRecord, HallId, Session, SessionId, UserId,
};
use crate::core::traits::{
    AttendanceStore, AttendanceWrite, Clock, Directory, SessionStore,
};

#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    attendance: RwLock<HashMap<(SessionId, UserId), AttendanceRecord>>,
    users: RwLock<HashMap<String, UserId>>,
    audit_log: RwLock<Vec<AuditEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of appended audit entries, for assertions.
    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit_log.read().await.clone()
    }

    /// All sessions currently stored, any order.
    pub async fn all_sessions(&self) -> Vec<Session> {
        self.sessions.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn sessions_by_hall(&self, hall_id: HallId) -> Result<Vec<Session>, StoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.hall_id == Some(hall_id))
            .cloned()
            .collect())
    }

    async fn session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn upsert_session(&self, session: Session) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;

        // Exclusion backstop, evaluated under the same write lock as the
        // insert so concurrent writers cannot interleave past it.
        if let Some(hall_id) = session.hall_id {
            let mut conflicts: Vec<Session> = sessions
                .values()
                .filter(|s| s.id != session.id)
                .filter(|s| s.hall_id == Some(hall_id))
                .filter(|s| s.slot.overlaps(&session.slot))
                .cloned()
                .collect();
            if !conflicts.is_empty() {
                conflicts.sort_by_key(|s| (s.slot.start(), s.id));
                return Err(StoreError::Exclusion(conflicts));
            }
        }

        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError> {
        self.audit_log.write().await.push(entry);
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn upsert_attendance(
        &self,
        write: AttendanceWrite,
    ) -> Result<(AttendanceRecord, bool), StoreError> {
        let mut attendance = self.attendance.write().await;
        let key = (write.session_id, write.user_id);

        match attendance.get_mut(&key) {
            Some(existing) => {
                existing.scanned_at = write.scanned_at;
                existing.metadata = write.metadata;
                Ok((existing.clone(), false))
            }
            None => {
                let record = AttendanceRecord {
                    id: AttendanceId::generate(),
                    session_id: write.session_id,
                    event_id: write.event_id,
                    user_id: write.user_id,
                    scanned_at: write.scanned_at,
                    method: write.method,
                    metadata: write.metadata,
                };
                attendance.insert(key, record.clone());
                Ok((record, true))
            }
        }
    }

    async fn count_present(&self, session_id: SessionId) -> Result<u64, StoreError> {
        Ok(self
            .attendance
            .read()
            .await
            .keys()
            .filter(|(sid, _)| *sid == session_id)
            .count() as u64)
    }
}

#[async_trait]
impl Directory for MemoryStore {
    async fn resolve_or_create_user(
        &self,
        email: &str,
        _display_name: Option<&str>,
    ) -> Result<UserId, StoreError> {
        let mut users = self.users.write().await;
        let key = email.to_ascii_lowercase();
        Ok(*users.entry(key).or_insert_with(UserId::generate))
    }
}

/// Settable `Clock` for tests.
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(mut poisoned) => **poisoned.get_mut() = now,
        }
    }

    pub fn advance(&self, by: Duration) {
        match self.now.lock() {
            Ok(mut guard) => *guard += by,
            Err(mut poisoned) => **poisoned.get_mut() += by,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
