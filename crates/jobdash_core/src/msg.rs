use chrono::{DateTime, Utc};

use crate::model::{
    BulkSummary, CallOutcome, Job, Task, TaskStatusSnapshot, TrackId, TrackPatch, TrackStatus,
    TrackedJob,
};
use crate::view_model::JobColumn;

/// Everything that can happen to the dashboard, user actions and remote
/// completions alike. Messages that depend on the current time carry it
/// explicitly so the state machine never reads a clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    // Poller publishes. A failed poll never produces a message; the
    // previous value simply stays published.
    TaskStatusFetched(TaskStatusSnapshot),
    JobsFetched(Vec<Job>),
    TrackedJobsFetched(Vec<TrackedJob>),

    // Submit box.
    SubmitInputChanged(String),
    SubmitClicked,
    SubmitFinished {
        outcome: CallOutcome,
        receipt: Option<String>,
    },

    // Failed-tasks drawer.
    FailedTasksOpened,
    FailedTasksClosed,
    FailedTasksFetched(Vec<Task>),
    FailedTaskToggled { url: String },
    FailedTasksToggledAll,
    RetryClicked,
    RetryFinished { outcome: CallOutcome },

    // Raw jobs table.
    JobToggled { job_url: String },
    JobsToggledAll,
    CompanyFilterToggled { company: String },
    CompanyFilterCleared,
    ColumnToggled { column: JobColumn },
    ColumnPrefsLoaded(Vec<JobColumn>),
    DeleteSelectedJobsClicked,
    JobsDeleteFinished { outcome: CallOutcome },
    TrackSelectedClicked,
    TrackAddFinished { summary: BulkSummary },

    // Tracked jobs table.
    TrackedToggled { job_id: TrackId },
    TrackedToggledAll,
    StatusFilterChanged { filter: Option<TrackStatus> },
    TrackedFieldEdited { job_id: TrackId, patch: TrackPatch },
    TrackUpdateFinished { outcome: CallOutcome },
    NotesEditStarted { job_id: TrackId },
    NotesDraftChanged(String),
    NotesSaveClicked,
    NotesEditCancelled,
    DeleteSelectedTrackedClicked,
    TrackedDeleteFinished { summary: BulkSummary },

    // Soft delete and its undo window.
    TrackedDeleteClicked { job_id: TrackId, now: DateTime<Utc> },
    SoftDeleteFinished { job_id: TrackId, outcome: CallOutcome },
    UndoClicked { now: DateTime<Utc> },
    UndoFinished { outcome: CallOutcome },
    UndoWindowElapsed { job_id: TrackId },

    NoticeDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
