//! Ordered parallel stream compaction.
//!
//! [`parallel_filter`] keeps the elements of a slice that satisfy a
//! predicate, in their original order, using a fixed team of worker threads:
//!
//! 1. [`partition`](mod@partition) splits the input into one contiguous chunk per worker
//!    (the last chunk absorbs the remainder).
//! 2. Every worker runs the [`local`] filter on its chunk into a private
//!    scratch buffer. Nothing is shared mutably, so no locks are taken.
//! 3. After the join, [`offsets`] turns the per-chunk counts into an
//!    exclusive prefix sum.
//! 4. [`scatter`] copies each scratch buffer to its offset in the output,
//!    serially or one task per chunk ([`MergeMode`]).
//!
//! ```
//! let input = [3, -1, 4, -1, 5, -9, 2, -6];
//! let mut output = [0; 8];
//! let n = compact_filter::parallel_filter(&input, &mut output, |&v| v >= 0).unwrap();
//! assert_eq!(&output[..n], &[3, 4, 5, 2]);
//! ```

pub mod compactor;
pub mod config;
mod error;
pub mod local;
pub mod offsets;
pub mod partition;
pub mod predicate;
pub mod scatter;
mod team;

pub use compactor::{ChunkOutput, Compaction, Compactor};
pub use config::{available_workers, CompactConfig, MergeMode};
pub use error::CompactError;
pub use local::{filter_extend, filter_into};
pub use offsets::{exclusive_offsets, Offsets};
pub use partition::{chunk_bounds, partition, Chunk};
pub use predicate::Predicate;

/// Filter `input` into the front of `output` with the default configuration
/// (hardware parallelism, parallel merge). Returns the number of matches.
///
/// `output` must be at least `input.len()` long.
pub fn parallel_filter<T, F>(
    input: &[T],
    output: &mut [T],
    pred: F,
) -> Result<usize, CompactError>
where
    T: Copy + Send + Sync,
    F: Fn(&T) -> bool + Sync,
{
    Compactor::default().filter(input, output, pred)
}

/// Like [`parallel_filter`] but allocates and returns exactly the matches.
pub fn parallel_filter_vec<T, F>(input: &[T], pred: F) -> Result<Vec<T>, CompactError>
where
    T: Copy + Send + Sync,
    F: Fn(&T) -> bool + Sync,
{
    Compactor::default().filter_vec(input, pred)
}
