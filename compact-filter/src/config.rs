//! Tunables recognised by the compactor.

use std::num::NonZeroUsize;
use std::thread;

use crate::CompactError;

/// How per-chunk scratch buffers are copied into the final output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// Calling thread copies the chunks one after another.
    Serial,
    /// One scoped task per non-empty chunk, each writing a disjoint slice.
    #[default]
    Parallel,
}

impl MergeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::Serial => "serial",
            MergeMode::Parallel => "parallel",
        }
    }
}

impl std::str::FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" | "limited" => Ok(MergeMode::Serial),
            "parallel" | "full" => Ok(MergeMode::Parallel),
            other => Err(format!(
                "unknown merge mode '{}' (expected serial or parallel)",
                other
            )),
        }
    }
}

/// Number of workers the platform reports it can run in parallel (at least 1).
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration for a [`Compactor`](crate::Compactor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactConfig {
    /// Size of the worker team (P). Zero is rejected by [`validate`](Self::validate).
    pub workers: usize,
    /// Scatter-merge strategy.
    pub merge: MergeMode,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            workers: available_workers(),
            merge: MergeMode::default(),
        }
    }
}

impl CompactConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_merge(mut self, merge: MergeMode) -> Self {
        self.merge = merge;
        self
    }

    pub fn validate(&self) -> Result<(), CompactError> {
        if self.workers == 0 {
            return Err(CompactError::InvalidWorkerCount);
        }
        Ok(())
    }
}
