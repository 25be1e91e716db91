use std::collections::BTreeSet;

use crate::model::{Job, Task, TaskStatusSnapshot, TrackId, TrackStatus, TrackedJob};
use crate::selection::Selection;
use crate::undo::PendingUndo;

/// Columns of the raw jobs table. Visibility is presentation only; it
/// never affects filtering or selection membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobColumn {
    JobTitle,
    CompanyName,
    Salary,
    Location,
    ExperienceEducation,
    JobTags,
    Benefits,
    ScrapedAt,
    WorkAddress,
    Recruiter,
    JobDescription,
}

impl JobColumn {
    pub const ALL: [JobColumn; 11] = [
        JobColumn::JobTitle,
        JobColumn::CompanyName,
        JobColumn::Salary,
        JobColumn::Location,
        JobColumn::ExperienceEducation,
        JobColumn::JobTags,
        JobColumn::Benefits,
        JobColumn::ScrapedAt,
        JobColumn::WorkAddress,
        JobColumn::Recruiter,
        JobColumn::JobDescription,
    ];

    /// Fixed columns are always visible and cannot be toggled off.
    pub fn is_fixed(&self) -> bool {
        matches!(self, JobColumn::JobTitle | JobColumn::CompanyName)
    }

    /// Part of the out-of-the-box visible set.
    pub fn is_default(&self) -> bool {
        matches!(
            self,
            JobColumn::JobTitle
                | JobColumn::CompanyName
                | JobColumn::Salary
                | JobColumn::Location
                | JobColumn::ExperienceEducation
                | JobColumn::JobTags
                | JobColumn::Benefits
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobColumn::JobTitle => "Job",
            JobColumn::CompanyName => "Company",
            JobColumn::Salary => "Salary",
            JobColumn::Location => "Location",
            JobColumn::ExperienceEducation => "Experience / Education",
            JobColumn::JobTags => "Tags",
            JobColumn::Benefits => "Benefits",
            JobColumn::ScrapedAt => "Scraped at",
            JobColumn::WorkAddress => "Address",
            JobColumn::Recruiter => "Recruiter",
            JobColumn::JobDescription => "Description",
        }
    }

    /// Stable identifier used by the preference file.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobColumn::JobTitle => "job_title",
            JobColumn::CompanyName => "company_name",
            JobColumn::Salary => "salary",
            JobColumn::Location => "location",
            JobColumn::ExperienceEducation => "experience_education",
            JobColumn::JobTags => "job_tags",
            JobColumn::Benefits => "benefits",
            JobColumn::ScrapedAt => "scraped_at",
            JobColumn::WorkAddress => "work_address",
            JobColumn::Recruiter => "recruiter",
            JobColumn::JobDescription => "job_description",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.as_str() == raw)
    }

    pub fn default_set() -> BTreeSet<JobColumn> {
        Self::ALL.iter().copied().filter(JobColumn::is_default).collect()
    }
}

/// Outcome counts of the last submit-box parse, shown next to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitStats {
    pub queued: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Single user-visible message: a summarized count or one descriptive
/// sentence, never a raw transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// In-progress notes edit for one tracked row. Lives outside the record
/// list so a background refresh cannot clobber the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesDraft {
    pub job_id: TrackId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitView {
    pub input: String,
    pub line_count: usize,
    pub in_flight: bool,
    pub last_stats: Option<SubmitStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTaskRow {
    pub task: Task,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailedTasksView {
    pub rows: Vec<FailedTaskRow>,
    pub selected_count: usize,
    pub all_selected: bool,
    pub retry_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub job: Job,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFacet {
    pub name: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: JobColumn,
    pub visible: bool,
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobsTableView {
    /// Company-filtered rows, source order preserved.
    pub rows: Vec<JobRow>,
    pub total: usize,
    pub selected_count: usize,
    pub all_selected: bool,
    pub companies: Vec<CompanyFacet>,
    pub columns: Vec<ColumnView>,
    pub bulk_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRow {
    pub job: TrackedJob,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackTableView {
    /// Status-filtered rows, source order preserved.
    pub rows: Vec<TrackedRow>,
    pub total: usize,
    pub selected_count: usize,
    pub all_selected: bool,
    pub status_filter: Option<TrackStatus>,
    pub undo: Option<PendingUndo>,
    pub notes_editor: Option<NotesDraft>,
    pub bulk_in_flight: bool,
}

/// Pure projection of the full state; re-derived on every render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub task_status: Option<TaskStatusSnapshot>,
    pub submit: SubmitView,
    pub failed: Option<FailedTasksView>,
    pub jobs: JobsTableView,
    pub tracked: TrackTableView,
    pub notice: Option<Notice>,
}

/// OR-semantics multi-select: a job matches when its company is in the
/// filter, or the filter is empty ("no filter"). Order is preserved.
pub fn filter_jobs_by_company<'a>(jobs: &'a [Job], filter: &BTreeSet<String>) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|job| filter.is_empty() || filter.contains(&job.company_name))
        .collect()
}

/// Single-select status filter; `None` is the "all" sentinel.
pub fn filter_tracked_by_status(
    tracked: &[TrackedJob],
    filter: Option<TrackStatus>,
) -> Vec<&TrackedJob> {
    tracked
        .iter()
        .filter(|job| filter.is_none_or(|wanted| job.track_status == wanted))
        .collect()
}

/// Unique companies with per-company row counts, sorted by name.
pub fn company_facets(jobs: &[Job], filter: &BTreeSet<String>) -> Vec<CompanyFacet> {
    let mut names: Vec<&str> = jobs
        .iter()
        .map(|job| job.company_name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
        .into_iter()
        .map(|name| CompanyFacet {
            name: name.to_owned(),
            count: jobs.iter().filter(|job| job.company_name == name).count(),
            selected: filter.contains(name),
        })
        .collect()
}

/// Clipboard text for the selected rows, one markdown block per job.
pub fn selection_markdown(jobs: &[Job], selection: &Selection) -> String {
    jobs.iter()
        .filter(|job| selection.contains(&job.job_url))
        .map(job_markdown)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn job_markdown(job: &Job) -> String {
    let mut text = format!(
        "### {} | {}\n* **Salary**: {}\n* **Location**: {}",
        job.job_title, job.company_name, job.salary, job.location
    );
    if !job.work_address.is_empty() {
        text.push_str(&format!(" · {}", job.work_address));
    }
    text.push_str(&format!(
        "\n* **Requirements**: {} | {}\n* **Link**: {}\n\n",
        job.experience_required, job.education_required, job.job_url
    ));
    text.push_str(&format!(
        "> **Recruiter**: {} · {}",
        job.recruiter.name, job.recruiter.title
    ));
    if !job.recruiter.status.is_empty() {
        text.push_str(&format!(" ({})", job.recruiter.status));
    }
    text.push_str(&format!(
        "\n\n**Description**:\n{}\n---",
        job.job_description
    ));
    text
}
