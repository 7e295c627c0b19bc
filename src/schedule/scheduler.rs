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

//! Session scheduling.
//!
//! Orchestrates create/update against the conflict detector. A conflict
//! aborts the write with the overlapping sessions attached; there is no
//! force-book path. The check-then-write sequence is serialized per hall
//! so two concurrent creates cannot both pass the conflict check.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::audit::AuditLogger;
use crate::core::constants::audit;
use crate::core::errors::ScheduleError;
use crate::core::models::{HallId, Session, SessionDraft, SessionId};
use crate::core::traits::{Clock, SessionStore};
use crate::schedule::conflicts::ConflictDetector;

/// One entry of a bulk update request.
#[derive(Debug, Clone)]
pub struct BulkScheduleItem {
    pub session_id: SessionId,
    pub draft: SessionDraft,
}

/// Per-session outcome of a bulk update. One session's conflict does not
/// block unrelated sessions in the same batch.
#[derive(Debug)]
pub struct BulkScheduleOutcome {
    pub session_id: SessionId,
    pub result: Result<Session, ScheduleError>,
}

/// Per-hall advisory locks serializing check-then-write.
#[derive(Default)]
struct HallLocks {
    inner: tokio::sync::Mutex<HashMap<HallId, Arc<tokio::sync::Mutex<()>>>>,
}

impl HallLocks {
    async fn acquire(&self, hall_id: HallId) -> tokio::sync::OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().await;
            map.entry(hall_id).or_default().clone()
        };
        slot.lock_owned().await
    }
}

pub struct Scheduler {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    audit: AuditLogger,
    locks: HallLocks,
}

impl Scheduler {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, audit: AuditLogger) -> Self {
        Self {
            store,
            clock,
            audit,
            locks: HallLocks::default(),
        }
    }

    /// Create a session from a validated draft.
    ///
    /// An `Unavailable` error here must not be retried blindly; retry
    /// idempotency via client request ids lives in the collaborator layer.
    pub async fn create_session(&self, draft: SessionDraft) -> Result<Session, ScheduleError> {
        let slot = draft.validate()?;
        let now = self.clock.now();
        let session = Session {
            id: SessionId::generate(),
            event_id: draft.event_id,
            hall_id: draft.hall_id,
            title: draft.title.trim().to_string(),
            slot,
            kind: draft.kind,
            speakers: draft.speakers,
            created_at: now,
            updated_at: now,
        };
        self.commit(session, audit::SESSION_SCHEDULED).await
    }

    /// Re-schedule or edit an existing session. The conflict check excludes
    /// the session's own current slot.
    pub async fn update_session(
        &self,
        id: SessionId,
        draft: SessionDraft,
    ) -> Result<Session, ScheduleError> {
        let slot = draft.validate()?;
        let existing = self
            .store
            .session(id)
            .await?
            .ok_or(ScheduleError::NotFound)?;
        let session = Session {
            id,
            event_id: draft.event_id,
            hall_id: draft.hall_id,
            title: draft.title.trim().to_string(),
            slot,
            kind: draft.kind,
            speakers: draft.speakers,
            created_at: existing.created_at,
            updated_at: self.clock.now(),
        };
        self.commit(session, audit::SESSION_UPDATED).await
    }

    /// Apply a batch of updates, independently per session. Each entry is
    /// all-or-nothing on its own; the batch as a whole is not transactional.
    pub async fn update_bulk(&self, items: Vec<BulkScheduleItem>) -> Vec<BulkScheduleOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        for item in items {
            let result = self.update_session(item.session_id, item.draft).await;
            outcomes.push(BulkScheduleOutcome {
                session_id: item.session_id,
                result,
            });
        }
        outcomes
    }

    /// Conflict-check (under the hall lock) and persist.
    ///
    /// No partial state on any failure path: the only write is the single
    /// upsert at the end, so a cancelled call commits nothing.
    async fn commit(
        &self,
        session: Session,
        event_type: &'static str,
    ) -> Result<Session, ScheduleError> {
        let _hall_guard = match session.hall_id {
            Some(hall_id) => {
                let guard = self.locks.acquire(hall_id).await;
                let conflicts = ConflictDetector::find_conflicts(
                    self.store.as_ref(),
                    hall_id,
                    &session.slot,
                    Some(session.id),
                )
                .await?;
                if !conflicts.is_empty() {
                    warn!(
                        session_id = %session.id,
                        hall_id = %hall_id,
                        conflicts = conflicts.len(),
                        "rejecting double-booking"
                    );
                    return Err(ScheduleError::Conflict { conflicts });
                }
                Some(guard)
            }
            None => None,
        };

        let stored = self.store.upsert_session(session).await?;
        info!(
            session_id = %stored.id,
            hall_id = ?stored.hall_id,
            slot = %stored.slot,
            "session scheduled"
        );

        let entry = self.audit.entry(
            stored.id,
            event_type,
            json!({
                "hall_id": stored.hall_id,
                "start": stored.slot.start(),
                "end": stored.slot.end(),
            }),
            stored.updated_at,
        );
        if let Err(e) = self.store.append_audit(entry).await {
            warn!(error = %e, "audit append failed");
        }

        Ok(stored)
    }
}
