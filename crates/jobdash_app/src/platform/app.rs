use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dash_logging::dash_info;
use jobdash_core::{update, AppState, Msg};
use jobdash_gateway::{Gateway, GatewaySettings, HttpGateway};
use tokio::sync::mpsc;

use super::effects::{publish_jobs, publish_task_status, publish_tracked, EffectRunner};
use super::persistence;
use super::poller::Poller;
use super::render;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub gateway: GatewaySettings,
    pub status_interval: Duration,
    pub jobs_interval: Duration,
    pub tracked_interval: Duration,
    pub prefs_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            gateway: GatewaySettings::default(),
            status_interval: Duration::from_secs(2),
            jobs_interval: Duration::from_secs(5),
            tracked_interval: Duration::from_secs(5),
            prefs_path: PathBuf::from(persistence::PREFS_FILENAME),
        }
    }
}

/// Settings with the backend root and poll cadences taken from the
/// environment when set: `JOBDASH_API_URL`, `JOBDASH_STATUS_INTERVAL_SECS`,
/// `JOBDASH_JOBS_INTERVAL_SECS`, `JOBDASH_TRACKED_INTERVAL_SECS`.
pub fn settings_from_env() -> AppSettings {
    let mut settings = AppSettings::default();
    if let Ok(base_url) = std::env::var("JOBDASH_API_URL") {
        settings.gateway.base_url = base_url;
    }
    for (name, slot) in [
        ("JOBDASH_STATUS_INTERVAL_SECS", &mut settings.status_interval),
        ("JOBDASH_JOBS_INTERVAL_SECS", &mut settings.jobs_interval),
        ("JOBDASH_TRACKED_INTERVAL_SECS", &mut settings.tracked_interval),
    ] {
        if let Ok(raw) = std::env::var(name) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => *slot = Duration::from_secs(secs),
                _ => dash_info!("ignoring invalid {name}={raw:?}"),
            }
        }
    }
    settings
}

/// Runs the dashboard runtime: three independent pollers feeding the
/// message loop, the pure update step, and the effect runner. Stops on
/// ctrl-c; dropping the pollers and the runner cancels all scheduled work
/// without issuing compensating remote calls.
pub async fn run(settings: AppSettings) -> anyhow::Result<()> {
    let gateway: Arc<dyn Gateway> =
        Arc::new(HttpGateway::new(settings.gateway).context("build gateway client")?);
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();

    if let Some(columns) = persistence::load_column_prefs(&settings.prefs_path) {
        let _ = msg_tx.send(Msg::ColumnPrefsLoaded(columns));
    }

    let mut runner = EffectRunner::new(gateway.clone(), msg_tx.clone(), settings.prefs_path);

    let _status_poller = {
        let (gateway, tx) = (gateway.clone(), msg_tx.clone());
        Poller::spawn(settings.status_interval, move || {
            publish_task_status(gateway.clone(), tx.clone())
        })
    };
    let _jobs_poller = {
        let (gateway, tx) = (gateway.clone(), msg_tx.clone());
        Poller::spawn(settings.jobs_interval, move || {
            publish_jobs(gateway.clone(), tx.clone())
        })
    };
    let _tracked_poller = {
        let (gateway, tx) = (gateway.clone(), msg_tx.clone());
        Poller::spawn(settings.tracked_interval, move || {
            publish_tracked(gateway.clone(), tx.clone())
        })
    };

    dash_info!("jobdash runtime started");
    let mut state = AppState::new();
    loop {
        tokio::select! {
            maybe_msg = msg_rx.recv() => {
                let Some(msg) = maybe_msg else { break };
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    render::render(&state.view());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                dash_info!("shutting down");
                break;
            }
        }
    }
    Ok(())
}
