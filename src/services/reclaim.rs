//! Resource reclamation hook.

/// Something that can release memory or other deferred resources on demand
pub trait ReclaimHook: Send + Sync {
    /// Runs one reclamation pass and returns how many objects were freed
    fn reclaim(&self) -> anyhow::Result<usize>;
}

/// What caused a reclamation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclaimTrigger {
    /// Every N completed requests
    RequestCount,
    /// The background timer
    Timer,
    /// Called directly
    Manual,
}

/// Result of a reclamation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReclaimOutcome {
    /// Objects freed; zero when the pass failed
    pub reclaimed: usize,
    pub trigger: ReclaimTrigger,
}
