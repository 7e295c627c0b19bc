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

//! hallpass: scheduling and attendance-credential core.
//!
//! This library provides the temporal-correctness core of a conference
//! management dashboard: session/hall scheduling with double-booking
//! detection, and time-bound tamper-evident QR attendance credentials
//! gating physical check-in. Persistence, identity, and time are consumed
//! through the narrow interfaces in [`core::traits`].

pub mod config;
pub mod core;
pub mod credential;
pub mod schedule;
pub mod store;
