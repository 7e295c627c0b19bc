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

//! Half-open time intervals.
//!
//! All session windows use `[start, end)` semantics: start inclusive,
//! end exclusive. A `TimeSlot` with `start >= end` is unrepresentable.

use crate::core::errors::ScheduleError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Raw interval bounds used for (de)serialization of `TimeSlot`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A validated half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlotBounds", into = "SlotBounds")]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Construct a slot, rejecting zero and negative durations.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Strict half-open overlap test.
    ///
    /// A slot ending exactly when another begins does NOT overlap,
    /// so back-to-back scheduling in the same hall is legal.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `t` falls inside `[start, end)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

impl TryFrom<SlotBounds> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(bounds: SlotBounds) -> Result<Self, Self::Error> {
        TimeSlot::new(bounds.start, bounds.end)
    }
}

impl From<TimeSlot> for SlotBounds {
    fn from(slot: TimeSlot) -> Self {
        SlotBounds {
            start: slot.start,
            end: slot.end,
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} .. {})",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}
