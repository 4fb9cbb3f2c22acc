//! Fixed-interval ticker that drives the news pipeline.
//!
//! The first run happens one full period after start, then once per period.
//! Runs never overlap: a tick is awaited to completion before the next one is
//! scheduled, and a tick that overruns pushes the following ones back rather
//! than triggering a burst of catch-up runs.
//!
//! Cancellation is observed both while idle and while a tick is in flight. An
//! in-flight tick is dropped at its next await point; a tick that completes in
//! the same poll as the cancellation still counts as a run.

use crate::shutdown::Shutdown;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    period: Duration,
}

impl Scheduler {
    /// # Panics
    ///
    /// If `period` is zero.
    pub fn every(period: Duration) -> Self {
        assert!(!period.is_zero(), "scheduler period must be non-zero");
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `job` once per period until `shutdown` fires.
    ///
    /// # Returns
    ///
    /// The number of runs that completed.
    pub async fn run<F, Fut>(&self, mut shutdown: Shutdown, mut job: F) -> u64
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = self.period.as_secs(), "Scheduler started");

        let mut runs = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            debug!(run = runs + 1, "Tick due");
            tokio::select! {
                biased;
                _ = job() => runs += 1,
                _ = shutdown.cancelled() => {
                    warn!(run = runs + 1, "Shutdown requested mid-run; abandoning tick");
                    break;
                }
            }
        }

        info!(runs, "Scheduler stopped");
        runs
    }
}
