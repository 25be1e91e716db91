use crate::model::{TrackAddItem, TrackId, TrackPatch};
use crate::view_model::JobColumn;

/// Side effects requested by `update`. The runtime executes each against
/// the remote gateway (or the local timer/prefs store) and feeds the
/// result back as a `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitTasks { urls: Vec<String> },
    FetchFailedTasks,
    RetryTasks { urls: Vec<String> },

    /// Batch-capable: one call carrying every url, all-or-nothing.
    DeleteJobs { urls: Vec<String> },
    /// Sequential: one call per item, failure-isolated.
    AddTrackBatch { items: Vec<TrackAddItem> },
    /// Sequential: one call per id, failure-isolated.
    DeleteTrackBatch { job_ids: Vec<TrackId> },

    UpdateTrack { job_id: TrackId, patch: TrackPatch },
    DeleteTrack { job_id: TrackId },
    UndoTrackDelete { job_id: TrackId },
    /// Start (or restart, replacing any running one) the local undo timer.
    ArmUndoTimer { job_id: TrackId },
    CancelUndoTimer,

    RefreshTaskStatus,
    RefreshJobs,
    RefreshTracked,

    PersistColumns { visible: Vec<JobColumn> },
}
