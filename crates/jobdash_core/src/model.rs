use chrono::{NaiveDate, NaiveDateTime};

/// Identity of a tracked job, assigned by the backend on add-to-track.
/// Distinct from `job_url`, which is the identity of a raw scraped job.
pub type TrackId = String;

/// Processing state of a scrape task, as reported by the backend queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Processing => "processing",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(TaskState::Pending),
            "processing" => Some(TaskState::Processing),
            "completed" => Some(TaskState::Completed),
            "failed" => Some(TaskState::Failed),
            _ => None,
        }
    }
}

/// One scrape task in the backend queue. Retry is keyed by `url`, so a
/// resubmitted task keeps its identity from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub url: String,
    pub state: TaskState,
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Point-in-time aggregate of the backend queue. Each poll replaces the
/// previous snapshot wholesale; nothing here is persisted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskStatusSnapshot {
    pub queue_length: usize,
    pub active_task: Option<String>,
    pub completed_count: usize,
    pub failed_count: usize,
    pub total_tasks: usize,
}

/// Contact person attached to a scraped job posting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recruiter {
    pub name: String,
    pub title: String,
    pub status: String,
}

/// An immutable scraped job record. `job_url` is the natural key; the
/// backend enforces uniqueness but the client tolerates duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub job_url: String,
    pub job_title: String,
    pub salary: String,
    pub company_name: String,
    pub company_industry: String,
    pub company_size: String,
    pub company_financing: String,
    pub location: String,
    pub work_address: String,
    pub experience_required: String,
    pub education_required: String,
    pub job_tags: Vec<String>,
    pub job_description: String,
    pub benefits: Vec<String>,
    pub recruiter: Recruiter,
    pub scraped_at: Option<NaiveDateTime>,
}

/// Workflow stage of a tracked job, ordered by process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrackStatus {
    PendingApply,
    Applied,
    FirstInterview,
    SecondInterview,
    ThirdInterview,
    PendingDecision,
    Offer,
    Rejected,
    Withdrawn,
}

impl TrackStatus {
    pub const ALL: [TrackStatus; 9] = [
        TrackStatus::PendingApply,
        TrackStatus::Applied,
        TrackStatus::FirstInterview,
        TrackStatus::SecondInterview,
        TrackStatus::ThirdInterview,
        TrackStatus::PendingDecision,
        TrackStatus::Offer,
        TrackStatus::Rejected,
        TrackStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackStatus::PendingApply => "pending_apply",
            TrackStatus::Applied => "applied",
            TrackStatus::FirstInterview => "first_interview",
            TrackStatus::SecondInterview => "second_interview",
            TrackStatus::ThirdInterview => "third_interview",
            TrackStatus::PendingDecision => "pending_decision",
            TrackStatus::Offer => "offer",
            TrackStatus::Rejected => "rejected",
            TrackStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == raw)
    }
}

/// User-assigned urgency of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|priority| priority.as_str() == raw)
    }
}

/// Reserved analysis fields; populated by a future scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisTags {
    pub risk_level: Option<String>,
    pub match_score: Option<u32>,
}

/// A curated record on the tracking list, keyed by the backend-assigned
/// `job_id`. `added_at` is immutable; the rest mutates field-by-field
/// through partial updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedJob {
    pub job_id: TrackId,
    pub job_url: String,
    pub job_title: String,
    pub company_name: String,
    pub track_status: TrackStatus,
    pub priority: Priority,
    pub added_at: NaiveDateTime,
    pub applied_at: Option<NaiveDate>,
    pub interview_at: Option<NaiveDate>,
    pub notes: String,
    pub analysis: AnalysisTags,
}

/// Payload of an add-to-track call for one raw job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackAddItem {
    pub job_url: String,
    pub job_title: String,
    pub company_name: String,
}

/// Partial update for one tracked job. `None` leaves a field untouched;
/// the nested options on the date fields distinguish "unchanged" from
/// "cleared".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackPatch {
    pub track_status: Option<TrackStatus>,
    pub priority: Option<Priority>,
    pub applied_at: Option<Option<NaiveDate>>,
    pub interview_at: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

impl TrackPatch {
    pub fn is_empty(&self) -> bool {
        self.track_status.is_none()
            && self.priority.is_none()
            && self.applied_at.is_none()
            && self.interview_at.is_none()
            && self.notes.is_none()
    }
}

/// Outcome of one remote call as seen by the state machine. The gateway
/// classifies at exactly this granularity; transport detail never crosses
/// into core logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Ok,
    /// Duplicate add-to-track; informational, neither success nor failure.
    Conflict,
    Failed,
}

/// Aggregate result of a sequential bulk pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkSummary {
    pub success: usize,
    pub conflict: usize,
    pub failure: usize,
}

impl BulkSummary {
    pub fn record(&mut self, outcome: CallOutcome) {
        match outcome {
            CallOutcome::Ok => self.success += 1,
            CallOutcome::Conflict => self.conflict += 1,
            CallOutcome::Failed => self.failure += 1,
        }
    }
}
