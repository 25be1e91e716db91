mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{init_logging, tracked};
use jobdash_core::{
    update, AppState, CallOutcome, Effect, Msg, NoticeKind, TrackStatus, UndoLedger,
    UNDO_WINDOW_SECS,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
}

fn tracked_state() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::TrackedJobsFetched(vec![
            tracked("42", TrackStatus::Applied),
            tracked("43", TrackStatus::PendingApply),
        ]),
    );
    state
}

fn soft_delete(state: AppState, job_id: &str, now: DateTime<Utc>) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::TrackedDeleteClicked {
            job_id: job_id.to_owned(),
            now,
        },
    )
}

#[test]
fn soft_delete_arms_ledger_and_fires_delete_plus_timer() {
    init_logging();
    let (state, effects) = soft_delete(tracked_state(), "42", t0());

    assert_eq!(
        effects,
        vec![
            Effect::DeleteTrack {
                job_id: "42".to_owned(),
            },
            Effect::ArmUndoTimer {
                job_id: "42".to_owned(),
            },
        ]
    );
    let undo = state.view().tracked.undo.unwrap();
    assert_eq!(undo.job_id, "42");
    assert_eq!(undo.label, "Job 42");
    assert_eq!(undo.expires_at, t0() + Duration::seconds(UNDO_WINDOW_SECS));
}

#[test]
fn soft_delete_of_unknown_id_is_a_no_op() {
    init_logging();
    let (state, effects) = soft_delete(tracked_state(), "missing", t0());
    assert!(effects.is_empty());
    assert!(state.view().tracked.undo.is_none());
}

#[test]
fn undo_inside_window_requests_restore() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::UndoClicked {
            now: t0() + Duration::seconds(10),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::UndoTrackDelete {
            job_id: "42".to_owned(),
        }]
    );
    // The entry stays pending until the remote undo completes.
    assert!(state.view().tracked.undo.is_some());
}

#[test]
fn undo_at_exact_expiry_is_rejected() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::UndoClicked {
            now: t0() + Duration::seconds(UNDO_WINDOW_SECS),
        },
    );

    assert_eq!(effects, vec![Effect::CancelUndoTimer]);
    assert!(state.view().tracked.undo.is_none());
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Undo window has passed");
}

#[test]
fn undo_with_empty_ledger_is_a_no_op() {
    init_logging();
    let (state, effects) = update(tracked_state(), Msg::UndoClicked { now: t0() });
    assert!(effects.is_empty());
    assert!(state.view().notice.is_none());
}

#[test]
fn undo_success_clears_ledger_and_refreshes() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::UndoFinished {
            outcome: CallOutcome::Ok,
        },
    );

    assert_eq!(effects, vec![Effect::CancelUndoTimer, Effect::RefreshTracked]);
    assert!(state.view().tracked.undo.is_none());
    let notice = state.view().notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.text, "Restored \"Job 42\"");
}

#[test]
fn undo_rejection_clears_ledger_without_retry() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::UndoFinished {
            outcome: CallOutcome::Failed,
        },
    );

    assert_eq!(effects, vec![Effect::CancelUndoTimer]);
    assert!(state.view().tracked.undo.is_none());
    assert_eq!(state.view().notice.unwrap().kind, NoticeKind::Error);
}

#[test]
fn second_soft_delete_replaces_the_pending_entry() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let later = t0() + Duration::seconds(5);
    let (state, _) = soft_delete(state, "43", later);

    let undo = state.view().tracked.undo.unwrap();
    assert_eq!(undo.job_id, "43");
    assert_eq!(undo.expires_at, later + Duration::seconds(UNDO_WINDOW_SECS));

    // The stale elapse from the replaced 42 timer must not clear 43.
    let (state, effects) = update(
        state,
        Msg::UndoWindowElapsed {
            job_id: "42".to_owned(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().tracked.undo.unwrap().job_id, "43");
}

#[test]
fn window_elapse_clears_silently() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::UndoWindowElapsed {
            job_id: "42".to_owned(),
        },
    );

    assert!(effects.is_empty());
    assert!(state.view().tracked.undo.is_none());
    assert!(state.view().notice.is_none());
}

#[test]
fn failed_remote_delete_withdraws_the_affordance() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::SoftDeleteFinished {
            job_id: "42".to_owned(),
            outcome: CallOutcome::Failed,
        },
    );

    assert_eq!(effects, vec![Effect::CancelUndoTimer]);
    assert!(state.view().tracked.undo.is_none());
    assert_eq!(state.view().notice.unwrap().kind, NoticeKind::Error);
}

#[test]
fn successful_remote_delete_keeps_the_window_open() {
    init_logging();
    let (state, _) = soft_delete(tracked_state(), "42", t0());
    let (state, effects) = update(
        state,
        Msg::SoftDeleteFinished {
            job_id: "42".to_owned(),
            outcome: CallOutcome::Ok,
        },
    );

    assert_eq!(effects, vec![Effect::RefreshTracked]);
    assert!(state.view().tracked.undo.is_some());
}

#[test]
fn ledger_arm_returns_the_replaced_entry() {
    init_logging();
    let mut ledger = UndoLedger::default();
    assert!(ledger.arm("42", "first", t0()).is_none());
    let replaced = ledger.arm("43", "second", t0()).unwrap();
    assert_eq!(replaced.job_id, "42");
    assert!(ledger.is_undoable(t0() + Duration::seconds(UNDO_WINDOW_SECS - 1)));
    assert!(!ledger.is_undoable(t0() + Duration::seconds(UNDO_WINDOW_SECS)));
}
