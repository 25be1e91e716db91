use std::collections::BTreeSet;

use crate::model::{BulkSummary, CallOutcome, TrackAddItem, TrackPatch};
use crate::view_model::{Notice, NotesDraft, SubmitStats};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Invalid transitions (a bulk click while one is in flight, an undo with an
/// empty ledger, a stale timer elapse) are no-ops rather than errors.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        // Poll publishes replace the synced value wholesale. Selections,
        // filters, and drafts are separate fields and are never touched.
        Msg::TaskStatusFetched(snapshot) => {
            state.task_status = Some(snapshot);
            state.mark_dirty();
            Vec::new()
        }
        Msg::JobsFetched(jobs) => {
            state.jobs = jobs;
            state.mark_dirty();
            Vec::new()
        }
        Msg::TrackedJobsFetched(tracked) => {
            state.tracked = tracked;
            state.mark_dirty();
            Vec::new()
        }

        Msg::SubmitInputChanged(text) => {
            state.submit_input = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.submit_in_flight {
                return (state, Vec::new());
            }
            let (urls, skipped) = parse_submit_input(&state.submit_input);
            if urls.is_empty() {
                if skipped > 0 {
                    state.last_submit_stats = Some(SubmitStats { queued: 0, skipped });
                    state.notice = Some(Notice::error("No valid URLs to submit"));
                    state.mark_dirty();
                }
                return (state, Vec::new());
            }
            state.last_submit_stats = Some(SubmitStats {
                queued: urls.len(),
                skipped,
            });
            state.submit_in_flight = true;
            state.mark_dirty();
            vec![Effect::SubmitTasks { urls }]
        }
        Msg::SubmitFinished { outcome, receipt } => {
            state.submit_in_flight = false;
            match outcome {
                CallOutcome::Ok => {
                    state.submit_input.clear();
                    let text = receipt.unwrap_or_else(|| "Tasks queued".to_owned());
                    state.notice = Some(Notice::info(text));
                    state.mark_dirty();
                    vec![Effect::RefreshTaskStatus]
                }
                _ => {
                    state.notice = Some(Notice::error("Failed to submit tasks"));
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }

        Msg::FailedTasksOpened => {
            state.failed_open = true;
            state.mark_dirty();
            vec![Effect::FetchFailedTasks]
        }
        Msg::FailedTasksClosed => {
            state.failed_open = false;
            state.failed_tasks.clear();
            state.failed_selection.clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::FailedTasksFetched(tasks) => {
            if state.failed_open {
                state.failed_tasks = tasks;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FailedTaskToggled { url } => {
            state.failed_selection.toggle(&url);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FailedTasksToggledAll => {
            let candidates: Vec<String> =
                state.failed_tasks.iter().map(|task| task.url.clone()).collect();
            state.failed_selection.toggle_all(candidates);
            state.mark_dirty();
            Vec::new()
        }
        Msg::RetryClicked => {
            if state.retry_in_flight || state.failed_selection.is_empty() {
                return (state, Vec::new());
            }
            state.retry_in_flight = true;
            state.mark_dirty();
            vec![Effect::RetryTasks {
                urls: state.failed_selection.to_vec(),
            }]
        }
        Msg::RetryFinished { outcome } => {
            state.retry_in_flight = false;
            match outcome {
                CallOutcome::Ok => {
                    let count = state.failed_selection.len();
                    state.failed_selection.clear();
                    state.failed_open = false;
                    state.failed_tasks.clear();
                    state.notice = Some(Notice::info(format!("Re-queued {count} failed tasks")));
                    state.mark_dirty();
                    vec![Effect::RefreshTaskStatus]
                }
                _ => {
                    state.notice = Some(Notice::error("Failed to submit retry request"));
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }

        Msg::JobToggled { job_url } => {
            state.job_selection.toggle(&job_url);
            state.mark_dirty();
            Vec::new()
        }
        Msg::JobsToggledAll => {
            let candidates = state.job_candidates();
            state.job_selection.toggle_all(candidates);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CompanyFilterToggled { company } => {
            // Narrowing or widening the filter never mutates the selection.
            if !state.company_filter.remove(&company) {
                state.company_filter.insert(company);
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::CompanyFilterCleared => {
            state.company_filter.clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ColumnToggled { column } => {
            if column.is_fixed() {
                return (state, Vec::new());
            }
            if !state.visible_columns.remove(&column) {
                state.visible_columns.insert(column);
            }
            state.mark_dirty();
            vec![Effect::PersistColumns {
                visible: state.visible_columns.iter().copied().collect(),
            }]
        }
        Msg::ColumnPrefsLoaded(columns) => {
            let mut visible: BTreeSet<_> = columns.into_iter().collect();
            visible.extend(crate::JobColumn::ALL.iter().filter(|c| c.is_fixed()));
            state.visible_columns = visible;
            state.mark_dirty();
            Vec::new()
        }

        Msg::DeleteSelectedJobsClicked => {
            if state.jobs_bulk_in_flight || state.job_selection.is_empty() {
                return (state, Vec::new());
            }
            state.jobs_bulk_in_flight = true;
            state.mark_dirty();
            vec![Effect::DeleteJobs {
                urls: state.job_selection.to_vec(),
            }]
        }
        Msg::JobsDeleteFinished { outcome } => {
            state.jobs_bulk_in_flight = false;
            match outcome {
                CallOutcome::Ok => {
                    // All-or-nothing batch: the whole selection is gone.
                    state.job_selection.clear();
                    state.notice = Some(Notice::info("Selected jobs deleted"));
                    state.mark_dirty();
                    vec![Effect::RefreshJobs]
                }
                _ => {
                    // Selection stays intact so the user can retry.
                    state.notice = Some(Notice::error("Failed to delete selected jobs"));
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }

        Msg::TrackSelectedClicked => {
            if state.jobs_bulk_in_flight {
                return (state, Vec::new());
            }
            // Inert selected keys (rows gone since selection) are skipped.
            let items: Vec<TrackAddItem> = state
                .jobs
                .iter()
                .filter(|job| state.job_selection.contains(&job.job_url))
                .map(|job| TrackAddItem {
                    job_url: job.job_url.clone(),
                    job_title: job.job_title.clone(),
                    company_name: job.company_name.clone(),
                })
                .collect();
            if items.is_empty() {
                return (state, Vec::new());
            }
            state.jobs_bulk_in_flight = true;
            state.mark_dirty();
            vec![Effect::AddTrackBatch { items }]
        }
        Msg::TrackAddFinished { summary } => {
            state.jobs_bulk_in_flight = false;
            let mut effects = Vec::new();
            if summary.success > 0 {
                state.job_selection.clear();
                effects.push(Effect::RefreshTracked);
            }
            state.notice = Some(track_add_notice(summary));
            state.mark_dirty();
            effects
        }

        Msg::TrackedToggled { job_id } => {
            state.tracked_selection.toggle(&job_id);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TrackedToggledAll => {
            let candidates = state.tracked_candidates();
            state.tracked_selection.toggle_all(candidates);
            state.mark_dirty();
            Vec::new()
        }
        Msg::StatusFilterChanged { filter } => {
            state.status_filter = filter;
            state.mark_dirty();
            Vec::new()
        }

        Msg::TrackedFieldEdited { job_id, patch } => {
            if patch.is_empty() || state.tracked_by_id(&job_id).is_none() {
                return (state, Vec::new());
            }
            vec![Effect::UpdateTrack { job_id, patch }]
        }
        Msg::TrackUpdateFinished { outcome } => match outcome {
            CallOutcome::Ok => vec![Effect::RefreshTracked],
            _ => {
                state.notice = Some(Notice::error("Failed to update tracked job"));
                state.mark_dirty();
                Vec::new()
            }
        },

        Msg::NotesEditStarted { job_id } => {
            let Some(job) = state.tracked_by_id(&job_id) else {
                return (state, Vec::new());
            };
            state.notes_editor = Some(NotesDraft {
                job_id,
                text: job.notes.clone(),
            });
            state.mark_dirty();
            Vec::new()
        }
        Msg::NotesDraftChanged(text) => {
            if let Some(draft) = state.notes_editor.as_mut() {
                draft.text = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NotesSaveClicked => {
            let Some(draft) = state.notes_editor.take() else {
                return (state, Vec::new());
            };
            state.mark_dirty();
            vec![Effect::UpdateTrack {
                job_id: draft.job_id,
                patch: TrackPatch {
                    notes: Some(draft.text),
                    ..TrackPatch::default()
                },
            }]
        }
        Msg::NotesEditCancelled => {
            if state.notes_editor.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }

        Msg::DeleteSelectedTrackedClicked => {
            if state.tracked_bulk_in_flight || state.tracked_selection.is_empty() {
                return (state, Vec::new());
            }
            state.tracked_bulk_in_flight = true;
            state.mark_dirty();
            vec![Effect::DeleteTrackBatch {
                job_ids: state.tracked_selection.to_vec(),
            }]
        }
        Msg::TrackedDeleteFinished { summary } => {
            state.tracked_bulk_in_flight = false;
            let mut effects = Vec::new();
            if summary.success > 0 {
                state.tracked_selection.clear();
                effects.push(Effect::RefreshTracked);
            }
            state.notice = Some(tracked_delete_notice(summary));
            state.mark_dirty();
            effects
        }

        // Soft delete: the remote delete goes out immediately, then the
        // capacity-one ledger arms. Arming replaces any pending entry;
        // its timer is restarted by the runner on ArmUndoTimer.
        Msg::TrackedDeleteClicked { job_id, now } => {
            let Some(job) = state.tracked_by_id(&job_id) else {
                return (state, Vec::new());
            };
            let label = job.job_title.clone();
            state.undo.arm(job_id.clone(), label, now);
            state.mark_dirty();
            vec![
                Effect::DeleteTrack {
                    job_id: job_id.clone(),
                },
                Effect::ArmUndoTimer { job_id },
            ]
        }
        Msg::SoftDeleteFinished { job_id, outcome } => match outcome {
            CallOutcome::Ok => vec![Effect::RefreshTracked],
            _ => {
                // Nothing was deleted server-side, so there is nothing to
                // undo; withdraw the affordance if it is still ours.
                let mut effects = Vec::new();
                if state.undo.clear_if_current(&job_id).is_some() {
                    effects.push(Effect::CancelUndoTimer);
                }
                state.notice = Some(Notice::error("Failed to remove tracked job"));
                state.mark_dirty();
                effects
            }
        },
        Msg::UndoClicked { now } => {
            let Some(entry) = state.undo.pending() else {
                return (state, Vec::new());
            };
            if state.undo.is_undoable(now) {
                vec![Effect::UndoTrackDelete {
                    job_id: entry.job_id.clone(),
                }]
            } else {
                // The local timer should have cleared this already; treat a
                // late click the same as a remote rejection.
                state.undo.take();
                state.notice = Some(Notice::error("Undo window has passed"));
                state.mark_dirty();
                vec![Effect::CancelUndoTimer]
            }
        }
        Msg::UndoFinished { outcome } => {
            let Some(entry) = state.undo.take() else {
                return (state, Vec::new());
            };
            state.mark_dirty();
            match outcome {
                CallOutcome::Ok => {
                    state.notice = Some(Notice::info(format!("Restored \"{}\"", entry.label)));
                    vec![Effect::CancelUndoTimer, Effect::RefreshTracked]
                }
                _ => {
                    // No retry: the window is gone either way.
                    state.notice =
                        Some(Notice::error("Undo failed: the 30-second window has passed"));
                    vec![Effect::CancelUndoTimer]
                }
            }
        }
        Msg::UndoWindowElapsed { job_id } => {
            // Silent expiry; the server-side deletion already took effect.
            // A stale elapse from a replaced entry fails the id match.
            if state.undo.clear_if_current(&job_id).is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }

        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// One URL per line: trims, drops empties, rejects unparsable lines, and
/// dedupes on the normalized form. Returns the accepted originals plus the
/// skipped count.
fn parse_submit_input(raw: &str) -> (Vec<String>, usize) {
    let mut seen = BTreeSet::new();
    let mut urls = Vec::new();
    let mut skipped = 0;
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match url::Url::parse(line) {
            Ok(parsed) if seen.insert(parsed.to_string()) => urls.push(line.to_owned()),
            Ok(_) | Err(_) => skipped += 1,
        }
    }
    (urls, skipped)
}

fn track_add_notice(summary: BulkSummary) -> Notice {
    let BulkSummary {
        success,
        conflict,
        failure,
    } = summary;
    if success > 0 {
        let mut text = format!("Tracking {success} jobs");
        if conflict > 0 {
            text.push_str(&format!(" ({conflict} already tracked)"));
        }
        if failure > 0 {
            text.push_str(&format!(" ({failure} failed)"));
        }
        Notice::info(text)
    } else if failure > 0 {
        Notice::error(format!("Failed to track {failure} jobs"))
    } else {
        Notice::info(format!("All {conflict} selected jobs are already tracked"))
    }
}

fn tracked_delete_notice(summary: BulkSummary) -> Notice {
    if summary.failure == 0 {
        Notice::info(format!("Removed {} tracked jobs", summary.success))
    } else if summary.success > 0 {
        Notice::info(format!(
            "Removed {} tracked jobs ({} failed)",
            summary.success, summary.failure
        ))
    } else {
        Notice::error("Batch delete failed")
    }
}
