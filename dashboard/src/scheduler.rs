use async_trait::async_trait;
use common::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Work driven by the scheduler, typically a market listing reload
#[async_trait]
pub trait RefreshTask: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

/// What happened to one tick or manual trigger
#[derive(Debug)]
pub enum TickOutcome {
    /// The callback ran and succeeded
    Completed,
    /// A previous callback was still in flight, nothing was run
    Skipped,
    /// The callback ran and failed; the schedule keeps going
    Failed(Error),
}

/// Periodic refresh timer with an at-most-one-in-flight guard.
///
/// Scheduled ticks and manual triggers share one in-flight flag, so a tick
/// that comes due while any callback is still running is dropped rather than
/// queued.
pub struct RefreshScheduler {
    in_flight: Arc<AtomicBool>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

/// Holds the in-flight flag for the lifetime of one callback.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

async fn run(task: &dyn RefreshTask) -> TickOutcome {
    match task.refresh().await {
        Ok(()) => TickOutcome::Completed,
        Err(e) => TickOutcome::Failed(e),
    }
}

fn log_outcome(source: &str, outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Completed => debug!("{} refresh completed", source),
        TickOutcome::Skipped => debug!("{} refresh skipped, previous one still in flight", source),
        TickOutcome::Failed(e) => warn!("{} refresh failed: {}", source, e),
    }
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
            timer: Mutex::new(None),
        }
    }

    /// Run `task` now and then every `every`. Any previous timer is stopped first.
    pub async fn start(&self, task: Arc<dyn RefreshTask>, every: Duration) {
        let mut timer = self.timer.lock().await;

        if let Some(previous) = timer.take() {
            previous.abort();
            debug!("Stopped previous refresh timer");
        }

        let in_flight = Arc::clone(&self.in_flight);

        *timer = Some(tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                // Decide at due time; the callback itself runs off the timer task
                // so a slow fetch never delays the next tick.
                let guard = match InFlightGuard::acquire(&in_flight) {
                    Some(guard) => guard,
                    None => {
                        log_outcome("Scheduled", &TickOutcome::Skipped);
                        continue;
                    }
                };

                let task = Arc::clone(&task);
                tokio::spawn(async move {
                    let outcome = run(task.as_ref()).await;
                    drop(guard);
                    log_outcome("Scheduled", &outcome);
                });
            }
        }));

        info!("Refresh scheduler started, every {:?}", every);
    }

    /// Cancel future ticks. A callback already running is left to finish.
    pub async fn stop(&self) {
        if let Some(timer) = self.timer.lock().await.take() {
            timer.abort();
            info!("Refresh scheduler stopped");
        }
    }

    /// Run `task` immediately unless a callback is already in flight.
    /// The timer phase is left untouched.
    pub async fn trigger(&self, task: &dyn RefreshTask) -> TickOutcome {
        let outcome = match InFlightGuard::acquire(&self.in_flight) {
            Some(_guard) => run(task).await,
            None => TickOutcome::Skipped,
        };

        log_outcome("Manual", &outcome);
        outcome
    }

    pub async fn is_running(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .map_or(false, |timer| !timer.is_finished())
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.abort();
        }
    }
}
