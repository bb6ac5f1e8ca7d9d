//! Execution strategy for the substep kernel.
//!
//! There is one kernel. The strategy only decides how each stage walks
//! its elements; stage order never changes.

use serde::{Deserialize, Serialize};

/// How the kernel schedules per-element work inside a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Index order on the calling thread. Link corrections are applied
    /// one link at a time (Gauss–Seidel sweep).
    #[default]
    Serial,
    /// Per-vertex stages run on the rayon pool (with the `parallel`
    /// feature). Link corrections are computed against one snapshot of the
    /// predicted positions, then accumulated in link order and averaged per
    /// vertex (Jacobi). The schedule, and so the result, is the same with
    /// or without the feature.
    Parallel,
}

impl ExecutionStrategy {
    /// Returns true if the strategy uses the Jacobi link schedule.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, ExecutionStrategy::Parallel)
    }

    /// Returns true if stages will actually be spread across threads.
    #[inline]
    pub fn uses_threads(self) -> bool {
        self.is_parallel() && cfg!(feature = "parallel")
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ExecutionStrategy::Serial => "serial",
            ExecutionStrategy::Parallel => "parallel",
        }
    }
}
