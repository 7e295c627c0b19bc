#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use hallpass::core::audit::AuditLogger;
use hallpass::core::crypto::TokenSigner;
use hallpass::core::models::{EventId, HallId, SessionDraft, SessionKind};
use hallpass::credential::issuer::CredentialIssuer;
use hallpass::credential::verifier::CredentialVerifier;
use hallpass::schedule::scheduler::Scheduler;
use hallpass::store::memory::{ManualClock, MemoryStore};

/// Wall-clock helper on the fixture's conference day.
pub fn ts(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, hour, min, 0).unwrap()
}

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub signer: TokenSigner,
    pub scheduler: Scheduler,
    pub issuer: CredentialIssuer,
    pub verifier: CredentialVerifier,
    pub event_id: EventId,
    pub hall_id: HallId,
}

/// Opt-in log output: `HALLPASS_LOG_LEVEL=debug cargo test -- --nocapture`
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("HALLPASS_LOG_LEVEL")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Wire every component against one shared in-memory store and a manual
/// clock parked at 09:00.
pub fn fixture() -> Fixture {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::at(ts(9, 0)));
    let signer = TokenSigner::ephemeral();

    let scheduler = Scheduler::new(
        store.clone(),
        clock.clone(),
        AuditLogger::new(signer.clone()),
    );
    let issuer = CredentialIssuer::new(
        store.clone(),
        clock.clone(),
        signer.clone(),
        AuditLogger::new(signer.clone()),
    );
    let verifier = CredentialVerifier::new(
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
        signer.clone(),
        AuditLogger::new(signer.clone()),
    );

    Fixture {
        store,
        clock,
        signer,
        scheduler,
        issuer,
        verifier,
        event_id: EventId::generate(),
        hall_id: HallId::generate(),
    }
}

pub fn draft(
    event_id: EventId,
    hall_id: Option<HallId>,
    title: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> SessionDraft {
    SessionDraft {
        event_id,
        hall_id,
        title: title.to_string(),
        start,
        end,
        kind: SessionKind::Workshop,
        speakers: Vec::new(),
    }
}
