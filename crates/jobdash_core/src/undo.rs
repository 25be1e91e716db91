use chrono::{DateTime, Duration, Utc};

use crate::model::TrackId;

/// How long the client offers the undo affordance after a soft delete.
/// The server enforces its own grace window independently; this bound only
/// controls what the UI shows.
pub const UNDO_WINDOW_SECS: i64 = 30;

/// One pending soft deletion awaiting possible reversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUndo {
    pub job_id: TrackId,
    /// Human-readable label for the banner, usually the job title.
    pub label: String,
    /// Authoritative local expiry. Injected through messages, never read
    /// from ambient wall-clock, so transitions are testable without waits.
    pub expires_at: DateTime<Utc>,
}

/// Capacity-one ledger for the tracked-table soft delete.
///
/// States: Empty -> Pending -> {Reverted, Expired}. Arming while Pending
/// replaces the entry outright; the superseded item can no longer be
/// undone from this client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UndoLedger {
    pending: Option<PendingUndo>,
}

impl UndoLedger {
    pub fn pending(&self) -> Option<&PendingUndo> {
        self.pending.as_ref()
    }

    /// Enters Pending for `job_id`, returning any replaced entry so the
    /// caller can cancel its timer.
    pub fn arm(
        &mut self,
        job_id: impl Into<TrackId>,
        label: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Option<PendingUndo> {
        self.pending.replace(PendingUndo {
            job_id: job_id.into(),
            label: label.into(),
            expires_at: now + Duration::seconds(UNDO_WINDOW_SECS),
        })
    }

    /// True while an undo can still be requested.
    pub fn is_undoable(&self, now: DateTime<Utc>) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|entry| now < entry.expires_at)
    }

    /// Clears the ledger if the pending entry matches `job_id`. Timer
    /// elapse messages from a replaced entry fail the match and leave the
    /// current entry alone.
    pub fn clear_if_current(&mut self, job_id: &str) -> Option<PendingUndo> {
        if self.pending.as_ref().is_some_and(|entry| entry.job_id == job_id) {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn take(&mut self) -> Option<PendingUndo> {
        self.pending.take()
    }
}
