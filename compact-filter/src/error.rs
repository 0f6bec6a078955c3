use std::collections::TryReserveError;

/// Errors that can occur during a parallel compaction.
///
/// Every variant is operation-level: when one is returned, no output count is
/// produced and every scratch buffer allocated for the call has been released.
#[derive(Debug, thiserror::Error)]
pub enum CompactError {
    /// Worker count of zero.
    #[error("invalid worker count: at least one worker is required")]
    InvalidWorkerCount,

    /// Caller's output buffer cannot hold the worst case (every element matches).
    #[error("output buffer too small: need capacity {required}, got {capacity}")]
    OutputTooSmall { required: usize, capacity: usize },

    /// Scratch buffer for a chunk could not be reserved.
    #[error("failed to allocate scratch buffer of {len} elements for chunk {chunk}")]
    Allocation {
        chunk: usize,
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// A worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A worker panicked (typically inside the predicate).
    #[error("worker for chunk {chunk} panicked")]
    WorkerPanicked { chunk: usize },
}

impl CompactError {
    /// Chunk index the error is attributed to, if any.
    pub fn chunk(&self) -> Option<usize> {
        match self {
            CompactError::Allocation { chunk, .. } | CompactError::WorkerPanicked { chunk } => {
                Some(*chunk)
            }
            _ => None,
        }
    }
}
