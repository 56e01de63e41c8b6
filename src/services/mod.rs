//! Background services for segmentd.
//!
//! This module provides:
//! - **Reclamation**: the [`ReclaimHook`] seam and its pass outcome
//! - **Scheduler**: request-count and timer triggers for reclamation
//!
//! ```ignore
//! use segmentd::services::{ReclamationScheduler, SchedulerConfig};
//!
//! let scheduler = Arc::new(ReclamationScheduler::new(SchedulerConfig::default(), hook));
//! let handle = scheduler.clone().start();
//!
//! // ... on shutdown
//! scheduler.cancel();
//! handle.await?;
//! ```

pub mod reclaim;
pub mod reclaim_scheduler;

// Re-exports
pub use reclaim::{ReclaimHook, ReclaimOutcome, ReclaimTrigger};
pub use reclaim_scheduler::{ReclamationScheduler, SchedulerConfig, TimerState};
