use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dash_logging::dash_warn;
use jobdash_core::{CallOutcome, Effect, Msg, TrackId, UNDO_WINDOW_SECS};
use jobdash_gateway::{add_tracked_jobs, delete_tracked_jobs, Gateway};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::persistence;

/// Executes the effects requested by `update` against the gateway and
/// feeds every completion back into the message channel. Also owns the
/// single undo-timer task: arming replaces (aborts) any running timer, and
/// dropping the runner aborts it without issuing compensating calls.
pub struct EffectRunner {
    gateway: Arc<dyn Gateway>,
    msg_tx: UnboundedSender<Msg>,
    undo_timer: Option<JoinHandle<()>>,
    prefs_path: PathBuf,
}

impl EffectRunner {
    pub fn new(gateway: Arc<dyn Gateway>, msg_tx: UnboundedSender<Msg>, prefs_path: PathBuf) -> Self {
        Self {
            gateway,
            msg_tx,
            undo_timer: None,
            prefs_path,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::SubmitTasks { urls } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let msg = match gateway.submit_tasks(&urls).await {
                        Ok(receipt) => Msg::SubmitFinished {
                            outcome: CallOutcome::Ok,
                            receipt: Some(receipt),
                        },
                        Err(err) => {
                            dash_warn!("task submit failed: {err}");
                            Msg::SubmitFinished {
                                outcome: err.outcome(),
                                receipt: None,
                            }
                        }
                    };
                    let _ = tx.send(msg);
                });
            }
            Effect::FetchFailedTasks => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    match gateway.failed_tasks().await {
                        Ok(tasks) => {
                            let _ = tx.send(Msg::FailedTasksFetched(tasks));
                        }
                        Err(err) => dash_warn!("failed-task fetch failed: {err}"),
                    }
                });
            }
            Effect::RetryTasks { urls } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let outcome = into_outcome(gateway.retry_tasks(&urls).await, "task retry");
                    let _ = tx.send(Msg::RetryFinished { outcome });
                });
            }
            Effect::DeleteJobs { urls } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let outcome = into_outcome(gateway.delete_jobs(&urls).await, "batch job delete");
                    let _ = tx.send(Msg::JobsDeleteFinished { outcome });
                });
            }
            Effect::AddTrackBatch { items } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let summary = add_tracked_jobs(gateway.as_ref(), &items).await;
                    let _ = tx.send(Msg::TrackAddFinished { summary });
                });
            }
            Effect::DeleteTrackBatch { job_ids } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let summary = delete_tracked_jobs(gateway.as_ref(), &job_ids).await;
                    let _ = tx.send(Msg::TrackedDeleteFinished { summary });
                });
            }
            Effect::UpdateTrack { job_id, patch } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let outcome =
                        into_outcome(gateway.update_track(&job_id, &patch).await, "track update");
                    let _ = tx.send(Msg::TrackUpdateFinished { outcome });
                });
            }
            Effect::DeleteTrack { job_id } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let outcome =
                        into_outcome(gateway.delete_track(&job_id).await, "tracked delete");
                    let _ = tx.send(Msg::SoftDeleteFinished { job_id, outcome });
                });
            }
            Effect::UndoTrackDelete { job_id } => {
                let (gateway, tx) = (self.gateway.clone(), self.msg_tx.clone());
                tokio::spawn(async move {
                    let outcome =
                        into_outcome(gateway.undo_track_delete(&job_id).await, "undo delete");
                    let _ = tx.send(Msg::UndoFinished { outcome });
                });
            }
            Effect::ArmUndoTimer { job_id } => self.arm_undo_timer(job_id),
            Effect::CancelUndoTimer => self.cancel_undo_timer(),
            Effect::RefreshTaskStatus => {
                tokio::spawn(publish_task_status(self.gateway.clone(), self.msg_tx.clone()));
            }
            Effect::RefreshJobs => {
                tokio::spawn(publish_jobs(self.gateway.clone(), self.msg_tx.clone()));
            }
            Effect::RefreshTracked => {
                tokio::spawn(publish_tracked(self.gateway.clone(), self.msg_tx.clone()));
            }
            Effect::PersistColumns { visible } => {
                persistence::save_column_prefs(&self.prefs_path, &visible);
            }
        }
    }

    fn arm_undo_timer(&mut self, job_id: TrackId) {
        self.cancel_undo_timer();
        let tx = self.msg_tx.clone();
        self.undo_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(UNDO_WINDOW_SECS as u64)).await;
            let _ = tx.send(Msg::UndoWindowElapsed { job_id });
        }));
    }

    fn cancel_undo_timer(&mut self) {
        if let Some(timer) = self.undo_timer.take() {
            timer.abort();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.cancel_undo_timer();
    }
}

fn into_outcome(result: Result<(), jobdash_gateway::GatewayError>, what: &str) -> CallOutcome {
    match result {
        Ok(()) => CallOutcome::Ok,
        Err(err) => {
            dash_warn!("{what} failed: {err}");
            err.outcome()
        }
    }
}

// Poll bodies, shared between the pollers and the refresh effects. A
// failed fetch logs and publishes nothing; the previous value stands.

pub(crate) async fn publish_task_status(gateway: Arc<dyn Gateway>, tx: UnboundedSender<Msg>) {
    match gateway.task_status().await {
        Ok(snapshot) => {
            let _ = tx.send(Msg::TaskStatusFetched(snapshot));
        }
        Err(err) => dash_warn!("task status poll failed: {err}"),
    }
}

pub(crate) async fn publish_jobs(gateway: Arc<dyn Gateway>, tx: UnboundedSender<Msg>) {
    match gateway.jobs().await {
        Ok(jobs) => {
            let _ = tx.send(Msg::JobsFetched(jobs));
        }
        Err(err) => dash_warn!("job list poll failed: {err}"),
    }
}

pub(crate) async fn publish_tracked(gateway: Arc<dyn Gateway>, tx: UnboundedSender<Msg>) {
    match gateway.tracked_jobs().await {
        Ok(tracked) => {
            let _ = tx.send(Msg::TrackedJobsFetched(tracked));
        }
        Err(err) => dash_warn!("tracked list poll failed: {err}"),
    }
}
