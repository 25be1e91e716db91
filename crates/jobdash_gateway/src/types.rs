//! Wire representations of the backend's JSON payloads, validated into the
//! core domain model at this boundary. Records carrying values outside the
//! closed enumerations are dropped with a warning rather than propagated.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dash_logging::dash_warn;
use jobdash_core::{
    AnalysisTags, Job, Priority, Recruiter, Task, TaskState, TaskStatusSnapshot, TrackPatch,
    TrackStatus, TrackedJob,
};
use serde::{Deserialize, Serialize};

/// Target of the export download link. The download itself is a plain
/// browser navigation, never routed through the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskStatusWire {
    #[serde(default)]
    pub queue_length: usize,
    #[serde(default)]
    pub active_task: Option<String>,
    #[serde(default)]
    pub completed_count: usize,
    #[serde(default)]
    pub failed_count: usize,
    #[serde(default)]
    pub total_tasks: usize,
}

impl TaskStatusWire {
    pub(crate) fn into_domain(self) -> TaskStatusSnapshot {
        TaskStatusSnapshot {
            queue_length: self.queue_length,
            active_task: self.active_task,
            completed_count: self.completed_count,
            failed_count: self.failed_count,
            total_tasks: self.total_tasks,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskWire {
    pub id: String,
    pub url: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskWire {
    pub(crate) fn into_domain(self) -> Option<Task> {
        let Some(state) = TaskState::parse(&self.status) else {
            dash_warn!("dropping task {} with unknown status {:?}", self.id, self.status);
            return None;
        };
        let (Some(created_at), Some(updated_at)) =
            (parse_datetime(&self.created_at), parse_datetime(&self.updated_at))
        else {
            dash_warn!("dropping task {} with unparsable timestamps", self.id);
            return None;
        };
        Some(Task {
            id: self.id,
            url: self.url,
            state,
            error: self.error,
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RecruiterWire {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobWire {
    pub job_url: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_industry: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub company_financing: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub work_address: String,
    #[serde(default)]
    pub experience_required: String,
    #[serde(default)]
    pub education_required: String,
    #[serde(default)]
    pub job_tags: Vec<String>,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub recruiter: RecruiterWire,
    #[serde(default)]
    pub scraped_at: Option<String>,
}

impl JobWire {
    pub(crate) fn into_domain(self) -> Job {
        Job {
            job_url: self.job_url,
            job_title: self.job_title,
            salary: self.salary,
            company_name: self.company_name,
            company_industry: self.company_industry,
            company_size: self.company_size,
            company_financing: self.company_financing,
            location: self.location,
            work_address: self.work_address,
            experience_required: self.experience_required,
            education_required: self.education_required,
            job_tags: self.job_tags,
            job_description: self.job_description,
            benefits: self.benefits,
            recruiter: Recruiter {
                name: self.recruiter.name,
                title: self.recruiter.title,
                status: self.recruiter.status,
            },
            scraped_at: self.scraped_at.as_deref().and_then(parse_datetime),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct AnalysisWire {
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub match_score: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackedJobWire {
    pub job_id: String,
    pub job_url: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    pub track_status: String,
    pub priority: String,
    pub added_at: String,
    #[serde(default)]
    pub applied_at: Option<String>,
    #[serde(default)]
    pub interview_at: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub analysis_tags: AnalysisWire,
}

impl TrackedJobWire {
    pub(crate) fn into_domain(self) -> Option<TrackedJob> {
        let Some(track_status) = TrackStatus::parse(&self.track_status) else {
            dash_warn!(
                "dropping tracked job {} with unknown track_status {:?}",
                self.job_id,
                self.track_status
            );
            return None;
        };
        let Some(priority) = Priority::parse(&self.priority) else {
            dash_warn!(
                "dropping tracked job {} with unknown priority {:?}",
                self.job_id,
                self.priority
            );
            return None;
        };
        let Some(added_at) = parse_datetime(&self.added_at) else {
            dash_warn!("dropping tracked job {} with unparsable added_at", self.job_id);
            return None;
        };
        Some(TrackedJob {
            job_id: self.job_id,
            job_url: self.job_url,
            job_title: self.job_title,
            company_name: self.company_name,
            track_status,
            priority,
            added_at,
            applied_at: self.applied_at.as_deref().and_then(parse_date),
            interview_at: self.interview_at.as_deref().and_then(parse_date),
            notes: self.notes,
            analysis: AnalysisTags {
                risk_level: self.analysis_tags.risk_level,
                match_score: self.analysis_tags.match_score,
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UrlsRequest<'a> {
    pub urls: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptWire {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackAddRequest<'a> {
    pub job_url: &'a str,
    pub job_title: &'a str,
    pub company_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackUpdateRequest<'a> {
    pub job_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    // `Some(None)` serializes as an explicit null, clearing the date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_at: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

impl<'a> TrackUpdateRequest<'a> {
    pub(crate) fn new(job_id: &'a str, patch: &'a TrackPatch) -> Self {
        Self {
            job_id,
            track_status: patch.track_status.map(|status| status.as_str()),
            priority: patch.priority.map(|priority| priority.as_str()),
            applied_at: patch
                .applied_at
                .map(|date| date.map(|d| d.format("%Y-%m-%d").to_string())),
            interview_at: patch
                .interview_at
                .map(|date| date.map(|d| d.format("%Y-%m-%d").to_string())),
            notes: patch.notes.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackIdRequest<'a> {
    pub job_id: &'a str,
}

/// The backend emits naive ISO-8601 local timestamps; tolerate an RFC 3339
/// offset as well.
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

/// Dates arrive either bare (`2026-08-24`) or as a full timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.date()))
}
