//! Jobdash core: pure state machine and view-model helpers.
//!
//! No IO happens here. Remote facts and the current time enter through
//! [`Msg`]; requested work leaves as [`Effect`]s for the runtime to execute.
mod effect;
mod model;
mod msg;
mod selection;
mod state;
mod undo;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{
    AnalysisTags, BulkSummary, CallOutcome, Job, Priority, Recruiter, Task, TaskState,
    TaskStatusSnapshot, TrackAddItem, TrackId, TrackPatch, TrackStatus, TrackedJob,
};
pub use msg::Msg;
pub use selection::Selection;
pub use state::AppState;
pub use undo::{PendingUndo, UndoLedger, UNDO_WINDOW_SECS};
pub use update::update;
pub use view_model::{
    company_facets, filter_jobs_by_company, filter_tracked_by_status, selection_markdown,
    ColumnView, CompanyFacet, DashboardViewModel, FailedTaskRow, FailedTasksView, JobColumn,
    JobRow, JobsTableView, Notice, NoticeKind, NotesDraft, SubmitStats, SubmitView, TrackTableView,
    TrackedRow,
};
