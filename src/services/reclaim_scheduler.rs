//! Reclamation Scheduler - releases model resources periodically
//!
//! Two triggers share one `reclaim()` pass: every N completed requests, and
//! a background timer that runs until cancelled at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use super::reclaim::{ReclaimHook, ReclaimOutcome, ReclaimTrigger};

/// Configuration for the reclamation scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Reclaim after every N completed requests (0 disables)
    pub every_n_requests: u64,
    /// Interval between timer-driven passes
    pub interval: Duration,
    /// Whether the background timer runs
    pub enabled: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            every_n_requests: 10,
            interval: Duration::from_secs(60),
            enabled: true,
        }
    }
}

impl SchedulerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("RECLAIM_SCHEDULER_ENABLED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        let every_n_requests = std::env::var("RECLAIM_EVERY_N_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let interval_secs = std::env::var("RECLAIM_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(60);

        Self {
            every_n_requests,
            interval: Duration::from_secs(interval_secs),
            enabled,
        }
    }
}

/// State of the background timer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Sleeping,
    Reclaiming,
    /// Terminal
    Cancelled,
}

/// Reclamation Scheduler Service
pub struct ReclamationScheduler {
    config: SchedulerConfig,
    hook: Arc<dyn ReclaimHook>,
    request_count: AtomicU64,
    reclaim_count: AtomicU64,
    shutdown: watch::Sender<bool>,
    state: watch::Sender<Option<TimerState>>,
}

impl ReclamationScheduler {
    /// Create a new reclamation scheduler
    pub fn new(config: SchedulerConfig, hook: Arc<dyn ReclaimHook>) -> Self {
        let (shutdown, _) = watch::channel(false);
        let (state, _) = watch::channel(None);
        Self {
            config,
            hook,
            request_count: AtomicU64::new(0),
            reclaim_count: AtomicU64::new(0),
            shutdown,
            state,
        }
    }

    /// Runs one reclamation pass. Never fails: errors are logged and count as zero.
    pub fn reclaim(&self, trigger: ReclaimTrigger) -> ReclaimOutcome {
        let reclaimed = match self.hook.reclaim() {
            Ok(count) => {
                info!("Cleanup: collected {} objects", count);
                count
            }
            Err(e) => {
                warn!("Cleanup error: {:#}", e);
                0
            }
        };

        self.reclaim_count.fetch_add(1, Ordering::SeqCst);

        ReclaimOutcome { reclaimed, trigger }
    }

    /// Records one completed request, reclaiming when the count hits a multiple of N
    pub fn record_request(&self) -> Option<ReclaimOutcome> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        let every = self.config.every_n_requests;

        if every > 0 && count % every == 0 {
            debug!("Request {} reached reclaim interval of {}", count, every);
            Some(self.reclaim(ReclaimTrigger::RequestCount))
        } else {
            None
        }
    }

    /// Start the background timer
    ///
    /// The loop alternates `Sleeping` and `Reclaiming` until [`cancel`] is
    /// called, then enters `Cancelled` without a final pass.
    ///
    /// [`cancel`]: ReclamationScheduler::cancel
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();
        let mut shutdown = self.shutdown.subscribe();

        tokio::spawn(async move {
            info!(
                "Reclamation timer started (interval: {}s)",
                scheduler.config.interval.as_secs()
            );

            loop {
                if *shutdown.borrow_and_update() {
                    break;
                }

                scheduler.set_state(TimerState::Sleeping);

                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = tokio::time::sleep(scheduler.config.interval) => {}
                }

                scheduler.set_state(TimerState::Reclaiming);
                scheduler.reclaim(ReclaimTrigger::Timer);
                info!("Background cleanup executed");
            }

            scheduler.set_state(TimerState::Cancelled);
            info!("Reclamation timer cancelled");
        })
    }

    /// Signals the timer loop to stop. Await its handle to know it finished.
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    /// Current timer state; `None` until [`start`](Self::start) has run
    pub fn state(&self) -> Option<TimerState> {
        *self.state.borrow()
    }

    fn set_state(&self, state: TimerState) {
        self.state.send_replace(Some(state));
    }

    /// Completed requests recorded so far
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Reclamation passes run so far, from either trigger
    pub fn reclaim_count(&self) -> u64 {
        self.reclaim_count.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}
