use std::collections::BTreeSet;

use crate::model::{Job, Task, TaskStatusSnapshot, TrackedJob};
use crate::selection::Selection;
use crate::undo::UndoLedger;
use crate::view_model::{
    company_facets, filter_jobs_by_company, filter_tracked_by_status, ColumnView,
    DashboardViewModel, FailedTaskRow, FailedTasksView, JobColumn, JobRow, JobsTableView, Notice,
    NotesDraft, SubmitStats, SubmitView, TrackTableView, TrackedRow,
};

/// Whole-dashboard state. All remote data arrives through `update`; the
/// three synced lists are replaced wholesale by their pollers while every
/// piece of user intent (selections, filters, drafts) lives in separate
/// fields and survives the replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    // Synced from the gateway.
    pub(crate) task_status: Option<TaskStatusSnapshot>,
    pub(crate) jobs: Vec<Job>,
    pub(crate) tracked: Vec<TrackedJob>,

    // Submit box.
    pub(crate) submit_input: String,
    pub(crate) submit_in_flight: bool,
    pub(crate) last_submit_stats: Option<SubmitStats>,

    // Failed-tasks drawer.
    pub(crate) failed_open: bool,
    pub(crate) failed_tasks: Vec<Task>,
    pub(crate) failed_selection: Selection,
    pub(crate) retry_in_flight: bool,

    // Raw jobs table.
    pub(crate) job_selection: Selection,
    pub(crate) company_filter: BTreeSet<String>,
    pub(crate) visible_columns: BTreeSet<JobColumn>,
    pub(crate) jobs_bulk_in_flight: bool,

    // Tracked jobs table.
    pub(crate) tracked_selection: Selection,
    pub(crate) status_filter: Option<crate::model::TrackStatus>,
    pub(crate) notes_editor: Option<NotesDraft>,
    pub(crate) tracked_bulk_in_flight: bool,
    pub(crate) undo: UndoLedger,

    pub(crate) notice: Option<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            task_status: None,
            jobs: Vec::new(),
            tracked: Vec::new(),
            submit_input: String::new(),
            submit_in_flight: false,
            last_submit_stats: None,
            failed_open: false,
            failed_tasks: Vec::new(),
            failed_selection: Selection::new(),
            retry_in_flight: false,
            job_selection: Selection::new(),
            company_filter: BTreeSet::new(),
            visible_columns: JobColumn::default_set(),
            jobs_bulk_in_flight: false,
            tracked_selection: Selection::new(),
            status_filter: None,
            notes_editor: None,
            tracked_bulk_in_flight: false,
            undo: UndoLedger::default(),
            notice: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and resets the dirty flag; the platform renders only when
    /// this was set since the last render.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Keys of the rows the jobs-table select-all operates on: the
    /// company-filtered view, not the full list.
    pub(crate) fn job_candidates(&self) -> Vec<String> {
        filter_jobs_by_company(&self.jobs, &self.company_filter)
            .into_iter()
            .map(|job| job.job_url.clone())
            .collect()
    }

    pub(crate) fn tracked_candidates(&self) -> Vec<String> {
        filter_tracked_by_status(&self.tracked, self.status_filter)
            .into_iter()
            .map(|job| job.job_id.clone())
            .collect()
    }

    pub(crate) fn tracked_by_id(&self, job_id: &str) -> Option<&TrackedJob> {
        self.tracked.iter().find(|job| job.job_id == job_id)
    }

    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel {
            task_status: self.task_status.clone(),
            submit: self.submit_view(),
            failed: self.failed_view(),
            jobs: self.jobs_view(),
            tracked: self.tracked_view(),
            notice: self.notice.clone(),
        }
    }

    fn submit_view(&self) -> SubmitView {
        SubmitView {
            input: self.submit_input.clone(),
            line_count: self
                .submit_input
                .lines()
                .filter(|line| !line.trim().is_empty())
                .count(),
            in_flight: self.submit_in_flight,
            last_stats: self.last_submit_stats,
        }
    }

    fn failed_view(&self) -> Option<FailedTasksView> {
        if !self.failed_open {
            return None;
        }
        let rows: Vec<FailedTaskRow> = self
            .failed_tasks
            .iter()
            .map(|task| FailedTaskRow {
                selected: self.failed_selection.contains(&task.url),
                task: task.clone(),
            })
            .collect();
        Some(FailedTasksView {
            selected_count: self.failed_selection.len(),
            all_selected: all_selected(&rows, |row| row.selected, &self.failed_selection),
            retry_in_flight: self.retry_in_flight,
            rows,
        })
    }

    fn jobs_view(&self) -> JobsTableView {
        let rows: Vec<JobRow> = filter_jobs_by_company(&self.jobs, &self.company_filter)
            .into_iter()
            .map(|job| JobRow {
                selected: self.job_selection.contains(&job.job_url),
                job: job.clone(),
            })
            .collect();
        JobsTableView {
            total: self.jobs.len(),
            selected_count: self.job_selection.len(),
            all_selected: all_selected(&rows, |row| row.selected, &self.job_selection),
            companies: company_facets(&self.jobs, &self.company_filter),
            columns: JobColumn::ALL
                .iter()
                .map(|column| ColumnView {
                    column: *column,
                    visible: self.visible_columns.contains(column) || column.is_fixed(),
                    fixed: column.is_fixed(),
                })
                .collect(),
            bulk_in_flight: self.jobs_bulk_in_flight,
            rows,
        }
    }

    fn tracked_view(&self) -> TrackTableView {
        let rows: Vec<TrackedRow> = filter_tracked_by_status(&self.tracked, self.status_filter)
            .into_iter()
            .map(|job| TrackedRow {
                selected: self.tracked_selection.contains(&job.job_id),
                job: job.clone(),
            })
            .collect();
        TrackTableView {
            total: self.tracked.len(),
            selected_count: self.tracked_selection.len(),
            all_selected: all_selected(&rows, |row| row.selected, &self.tracked_selection),
            status_filter: self.status_filter,
            undo: self.undo.pending().cloned(),
            notes_editor: self.notes_editor.clone(),
            bulk_in_flight: self.tracked_bulk_in_flight,
            rows,
        }
    }
}

fn all_selected<R>(rows: &[R], selected: impl Fn(&R) -> bool, selection: &Selection) -> bool {
    !rows.is_empty() && rows.len() == selection.len() && rows.iter().all(selected)
}
