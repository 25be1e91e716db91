use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodic refresh primitive: runs `tick` immediately on spawn, then once
/// per interval. Every firing spawns an independent task, so in-flight
/// requests are not deduplicated and a slow response never stalls later
/// ticks; completions apply in completion order.
///
/// Dropping (or stopping) the poller cancels all future ticks. Requests
/// already in flight are left to resolve; their publishes land in a closed
/// channel and vanish.
pub struct Poller {
    driver: JoinHandle<()>,
}

impl Poller {
    pub fn spawn<F, Fut>(interval: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let driver = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                tokio::spawn(tick());
            }
        });
        Self { driver }
    }

    pub fn stop(&self) {
        self.driver.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
