mod app;
mod effects;
pub mod logging;
mod persistence;
mod poller;
mod render;

pub use app::{run, settings_from_env, AppSettings};
pub use effects::EffectRunner;
pub use poller::Poller;
