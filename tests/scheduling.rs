mod common;

use common::{draft, fixture, ts};
use hallpass::core::errors::ScheduleError;
use hallpass::core::interval::TimeSlot;
use hallpass::core::models::SessionId;
use hallpass::core::traits::SessionStore;
use hallpass::schedule::conflicts::ConflictDetector;
use hallpass::schedule::scheduler::BulkScheduleItem;

#[tokio::test]
async fn test_overlap_in_same_hall_rejected_with_conflict_listing() {
    let fx = fixture();
    let a = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Opening Keynote",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();

    let err = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Rust Workshop",
            ts(10, 30),
            ts(11, 30),
        ))
        .await
        .unwrap_err();

    match err {
        ScheduleError::Conflict { conflicts } => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].id, a.id);
            assert_eq!(conflicts[0].title, "Opening Keynote");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_back_to_back_in_same_hall_is_legal() {
    let fx = fixture();
    fx.scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Session A",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();

    // B starts at the very instant A ends
    let b = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Session B",
            ts(11, 0),
            ts(12, 0),
        ))
        .await
        .unwrap();
    assert_eq!(b.slot.start(), ts(11, 0));
}

#[tokio::test]
async fn test_zero_and_negative_duration_rejected() {
    let fx = fixture();
    for (start, end) in [(ts(10, 0), ts(10, 0)), (ts(11, 0), ts(10, 0))] {
        let err = fx
            .scheduler
            .create_session(draft(fx.event_id, None, "Degenerate", start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval { .. }));
    }
}

#[tokio::test]
async fn test_blank_title_rejected_at_boundary() {
    let fx = fixture();
    let err = fx
        .scheduler
        .create_session(draft(fx.event_id, None, "   ", ts(10, 0), ts(11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidTitle(_)));
}

#[tokio::test]
async fn test_hall_less_sessions_never_conflict() {
    let fx = fixture();
    for title in ["Virtual A", "Virtual B", "Virtual C"] {
        fx.scheduler
            .create_session(draft(fx.event_id, None, title, ts(10, 0), ts(11, 0)))
            .await
            .unwrap();
    }
    assert_eq!(fx.store.all_sessions().await.len(), 3);
}

#[tokio::test]
async fn test_same_slot_in_different_halls_is_legal() {
    let fx = fixture();
    let other_hall = hallpass::core::models::HallId::generate();
    fx.scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Track 1",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();
    fx.scheduler
        .create_session(draft(
            fx.event_id,
            Some(other_hall),
            "Track 2",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_excludes_session_from_its_own_conflict_check() {
    let fx = fixture();
    let session = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Panel",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();

    // Nudging a session within its own window must not self-conflict
    let updated = fx
        .scheduler
        .update_session(
            session.id,
            draft(
                fx.event_id,
                Some(fx.hall_id),
                "Panel",
                ts(10, 15),
                ts(11, 0),
            ),
        )
        .await
        .unwrap();
    assert_eq!(updated.slot.start(), ts(10, 15));
    assert_eq!(updated.created_at, session.created_at);
}

#[tokio::test]
async fn test_update_unknown_session_is_not_found() {
    let fx = fixture();
    let err = fx
        .scheduler
        .update_session(
            SessionId::generate(),
            draft(fx.event_id, None, "Ghost", ts(10, 0), ts(11, 0)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NotFound));
}

#[tokio::test]
async fn test_conflicting_update_leaves_stored_session_untouched() {
    let fx = fixture();
    fx.scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Anchor",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();
    let movable = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Movable",
            ts(12, 0),
            ts(13, 0),
        ))
        .await
        .unwrap();

    let err = fx
        .scheduler
        .update_session(
            movable.id,
            draft(
                fx.event_id,
                Some(fx.hall_id),
                "Movable",
                ts(10, 30),
                ts(11, 30),
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Conflict { .. }));

    // No partial state: the stored session still holds its old slot
    let stored = fx.store.session(movable.id).await.unwrap().unwrap();
    assert_eq!(stored.slot.start(), ts(12, 0));
    assert_eq!(stored.slot.end(), ts(13, 0));
}

#[tokio::test]
async fn test_conflicts_reported_in_start_order() {
    let fx = fixture();
    // Inserted out of order on purpose
    for (title, start, end) in [
        ("Late", ts(13, 0), ts(14, 0)),
        ("Early", ts(10, 0), ts(11, 0)),
        ("Middle", ts(11, 0), ts(12, 0)),
    ] {
        fx.scheduler
            .create_session(draft(fx.event_id, Some(fx.hall_id), title, start, end))
            .await
            .unwrap();
    }

    let probe = TimeSlot::new(ts(10, 30), ts(13, 30)).unwrap();
    let conflicts =
        ConflictDetector::find_conflicts(fx.store.as_ref(), fx.hall_id, &probe, None)
            .await
            .unwrap();
    let titles: Vec<&str> = conflicts.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Early", "Middle", "Late"]);
}

#[tokio::test]
async fn test_accepted_operations_never_leave_overlaps() {
    let fx = fixture();
    let proposals = [
        (ts(9, 0), ts(10, 0)),
        (ts(9, 30), ts(10, 30)), // overlaps first
        (ts(10, 0), ts(11, 0)),
        (ts(10, 45), ts(11, 15)), // overlaps third
        (ts(11, 0), ts(11, 30)),
        (ts(8, 0), ts(9, 0)),
    ];
    for (i, (start, end)) in proposals.iter().enumerate() {
        let _ = fx
            .scheduler
            .create_session(draft(
                fx.event_id,
                Some(fx.hall_id),
                &format!("S{i}"),
                *start,
                *end,
            ))
            .await;
    }

    let sessions: Vec<_> = fx
        .store
        .all_sessions()
        .await
        .into_iter()
        .filter(|s| s.hall_id == Some(fx.hall_id))
        .collect();
    for a in &sessions {
        for b in &sessions {
            if a.id != b.id {
                assert!(
                    !a.slot.overlaps(&b.slot),
                    "stored sessions {} and {} overlap",
                    a.title,
                    b.title
                );
            }
        }
    }
}

#[tokio::test]
async fn test_concurrent_creates_cannot_both_book_the_hall() {
    let fx = fixture();
    let d1 = draft(
        fx.event_id,
        Some(fx.hall_id),
        "First",
        ts(10, 0),
        ts(11, 0),
    );
    let d2 = draft(
        fx.event_id,
        Some(fx.hall_id),
        "Second",
        ts(10, 30),
        ts(11, 30),
    );

    let (r1, r2) = tokio::join!(
        fx.scheduler.create_session(d1),
        fx.scheduler.create_session(d2)
    );
    assert_eq!(
        r1.is_ok() as u8 + r2.is_ok() as u8,
        1,
        "exactly one of two overlapping concurrent creates may win"
    );
}

#[tokio::test]
async fn test_bulk_update_outcomes_are_independent() {
    let fx = fixture();
    fx.scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Anchor",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();
    let s1 = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "One",
            ts(12, 0),
            ts(13, 0),
        ))
        .await
        .unwrap();
    let s2 = fx
        .scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Two",
            ts(14, 0),
            ts(15, 0),
        ))
        .await
        .unwrap();

    let outcomes = fx
        .scheduler
        .update_bulk(vec![
            BulkScheduleItem {
                session_id: s1.id,
                // Collides with Anchor
                draft: draft(
                    fx.event_id,
                    Some(fx.hall_id),
                    "One",
                    ts(10, 30),
                    ts(11, 30),
                ),
            },
            BulkScheduleItem {
                session_id: s2.id,
                draft: draft(
                    fx.event_id,
                    Some(fx.hall_id),
                    "Two",
                    ts(15, 0),
                    ts(16, 0),
                ),
            },
        ])
        .await;

    assert!(matches!(
        outcomes[0].result,
        Err(ScheduleError::Conflict { .. })
    ));
    assert!(outcomes[1].result.is_ok());

    // The conflicting entry rolled nothing back for the clean one
    let moved = fx.store.session(s2.id).await.unwrap().unwrap();
    assert_eq!(moved.slot.start(), ts(15, 0));
}

#[tokio::test]
async fn test_schedule_writes_leave_signed_audit_trail() {
    let fx = fixture();
    fx.scheduler
        .create_session(draft(
            fx.event_id,
            Some(fx.hall_id),
            "Audited",
            ts(10, 0),
            ts(11, 0),
        ))
        .await
        .unwrap();

    let entries = fx.store.audit_entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, "SESSION_SCHEDULED");
    assert!(!entries[0].signature.is_empty());
}
