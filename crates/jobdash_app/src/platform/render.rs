use dash_logging::{dash_info, dash_warn};
use jobdash_core::{DashboardViewModel, NoticeKind};

/// Terminal rendition of the view model: one summary line per change,
/// plus any pending notice. Page markup lives with an embedding frontend,
/// not here.
pub(crate) fn render(view: &DashboardViewModel) {
    if let Some(status) = &view.task_status {
        dash_info!(
            "queue={} active={} completed={} failed={} total={}",
            status.queue_length,
            status.active_task.as_deref().unwrap_or("-"),
            status.completed_count,
            status.failed_count,
            status.total_tasks
        );
    }
    dash_info!(
        "jobs: {} shown / {} total ({} selected) | tracked: {} shown / {} total ({} selected)",
        view.jobs.rows.len(),
        view.jobs.total,
        view.jobs.selected_count,
        view.tracked.rows.len(),
        view.tracked.total,
        view.tracked.selected_count
    );
    if let Some(undo) = &view.tracked.undo {
        dash_info!("undo available for \"{}\" until {}", undo.label, undo.expires_at);
    }
    if let Some(notice) = &view.notice {
        match notice.kind {
            NoticeKind::Info => dash_info!("{}", notice.text),
            NoticeKind::Error => dash_warn!("{}", notice.text),
        }
    }
}
