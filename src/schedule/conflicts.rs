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

//! Hall conflict detection.
//!
//! Read-only overlap queries against the session catalog. The scheduler
//! serializes check-then-write per hall; the storage layer's exclusion
//! constraint remains the authoritative guard behind this fast path.

use crate::core::errors::ScheduleError;
use crate::core::interval::TimeSlot;
use crate::core::models::{HallId, Session, SessionId};
use crate::core::traits::SessionStore;

pub struct ConflictDetector;

impl ConflictDetector {
    /// All sessions in `hall_id` whose `[start, end)` windows overlap
    /// `slot`, ordered by start time ascending. `exclude` skips a session
    /// being edited against itself.
    ///
    /// Sessions without a hall never appear here; the caller only asks
    /// about a concrete hall.
    pub async fn find_conflicts(
        store: &dyn SessionStore,
        hall_id: HallId,
        slot: &TimeSlot,
        exclude: Option<SessionId>,
    ) -> Result<Vec<Session>, ScheduleError> {
        let mut conflicts: Vec<Session> = store
            .sessions_by_hall(hall_id)
            .await?
            .into_iter()
            .filter(|s| Some(s.id) != exclude)
            .filter(|s| s.hall_id == Some(hall_id))
            .filter(|s| s.slot.overlaps(slot))
            .collect();

        // Deterministic order: by start, then id as tie-breaker
        conflicts.sort_by_key(|s| (s.slot.start(), s.id));
        Ok(conflicts)
    }
}
