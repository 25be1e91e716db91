//! Sequential bulk executor for the routes without a native batch shape.
//!
//! One remote call per key, continuing past individual failures: a bad
//! item never aborts the remaining items, and nothing escapes the loop as
//! an error. The caller receives one [`BulkSummary`] at the end.

use dash_logging::{dash_debug, dash_warn};
use jobdash_core::{BulkSummary, CallOutcome, TrackAddItem, TrackId};

use crate::Gateway;

/// Adds every selected raw job to the tracking list, one call per item.
/// A duplicate add answers conflict and counts as a skip, not a failure.
pub async fn add_tracked_jobs(gateway: &dyn Gateway, items: &[TrackAddItem]) -> BulkSummary {
    let mut summary = BulkSummary::default();
    for item in items {
        match gateway.add_track(item).await {
            Ok(()) => summary.record(CallOutcome::Ok),
            Err(err) => {
                let outcome = err.outcome();
                if outcome == CallOutcome::Conflict {
                    dash_debug!("already tracked, skipping {}", item.job_url);
                } else {
                    dash_warn!("track add failed for {}: {}", item.job_url, err);
                }
                summary.record(outcome);
            }
        }
    }
    summary
}

/// Removes every selected tracked job, one call per id.
pub async fn delete_tracked_jobs(gateway: &dyn Gateway, job_ids: &[TrackId]) -> BulkSummary {
    let mut summary = BulkSummary::default();
    for job_id in job_ids {
        match gateway.delete_track(job_id).await {
            Ok(()) => summary.record(CallOutcome::Ok),
            Err(err) => {
                dash_warn!("tracked delete failed for {}: {}", job_id, err);
                summary.record(err.outcome());
            }
        }
    }
    summary
}
