// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Once;

use chrono::{NaiveDate, NaiveDateTime};
use jobdash_core::{Job, Priority, Recruiter, Task, TaskState, TrackStatus, TrackedJob};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dash_logging::initialize_for_tests);
}

pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn job(url: &str, company: &str) -> Job {
    Job {
        job_url: url.to_owned(),
        job_title: format!("Engineer at {company}"),
        salary: "20-30k".to_owned(),
        company_name: company.to_owned(),
        company_industry: String::new(),
        company_size: String::new(),
        company_financing: String::new(),
        location: "Shanghai".to_owned(),
        work_address: String::new(),
        experience_required: "3-5y".to_owned(),
        education_required: "BSc".to_owned(),
        job_tags: vec!["rust".to_owned()],
        job_description: "build things".to_owned(),
        benefits: Vec::new(),
        recruiter: Recruiter::default(),
        scraped_at: None,
    }
}

pub fn tracked(job_id: &str, status: TrackStatus) -> TrackedJob {
    TrackedJob {
        job_id: job_id.to_owned(),
        job_url: format!("https://example.com/{job_id}"),
        job_title: format!("Job {job_id}"),
        company_name: "Acme".to_owned(),
        track_status: status,
        priority: Priority::Medium,
        added_at: midnight(2026, 8, 1),
        applied_at: None,
        interview_at: None,
        notes: String::new(),
        analysis: Default::default(),
    }
}

pub fn failed_task(id: &str, url: &str) -> Task {
    Task {
        id: id.to_owned(),
        url: url.to_owned(),
        state: TaskState::Failed,
        error: Some("scrape failed".to_owned()),
        created_at: midnight(2026, 8, 1),
        updated_at: midnight(2026, 8, 2),
    }
}
