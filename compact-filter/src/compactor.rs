//! Fork-join compaction over a fixed worker team.
//!
//! Phase 1 spawns one scoped worker per chunk; each reserves a private
//! scratch buffer sized to its chunk and filters into it. Workers share
//! nothing writable, so no lock or atomic is involved. Joining the team is
//! the single barrier before offsets are computed; [`Compaction::scatter`]
//! then places every chunk at its exclusive prefix-sum offset.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use log::{debug, trace};

use crate::config::{CompactConfig, MergeMode};
use crate::local::filter_extend;
use crate::offsets::{exclusive_offsets, Offsets};
use crate::partition::{partition, Chunk};
use crate::predicate::Predicate;
use crate::scatter::scatter;
use crate::team::join_team;
use crate::CompactError;

// --- ChunkOutput<T> ---

/// Matches produced by one worker: its chunk descriptor plus the scratch
/// buffer holding the chunk's matches in input order.
#[derive(Debug)]
pub struct ChunkOutput<T> {
    chunk: Chunk,
    scratch: Vec<T>,
}

impl<T> ChunkOutput<T> {
    #[cfg(test)]
    pub(crate) fn from_parts(chunk: Chunk, scratch: Vec<T>) -> Self {
        Self { chunk, scratch }
    }

    pub fn chunk(&self) -> Chunk {
        self.chunk
    }

    pub fn index(&self) -> usize {
        self.chunk.index
    }

    /// Local count: number of matches in this chunk.
    pub fn len(&self) -> usize {
        self.scratch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scratch.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.scratch
    }
}

/// Run the local filter for one chunk into a freshly reserved scratch buffer.
fn filter_chunk<T, F>(
    input: &[T],
    chunk: Chunk,
    pred: &F,
) -> Result<ChunkOutput<T>, CompactError>
where
    T: Copy,
    F: Fn(&T) -> bool,
{
    let mut scratch = Vec::new();
    scratch
        .try_reserve_exact(chunk.len())
        .map_err(|source| CompactError::Allocation {
            chunk: chunk.index,
            len: chunk.len(),
            source,
        })?;

    let count = filter_extend(&input[chunk.range()], &mut scratch, pred);
    trace!(
        "chunk {} [{}, {}): {} of {} matched",
        chunk.index,
        chunk.start,
        chunk.end,
        count,
        chunk.len()
    );
    Ok(ChunkOutput { chunk, scratch })
}

// --- Compaction<T> ---

/// Per-chunk results of the compute phase, in chunk order.
#[derive(Debug)]
pub struct Compaction<T> {
    chunks: Vec<ChunkOutput<T>>,
}

impl<T> Compaction<T> {
    pub fn chunks(&self) -> &[ChunkOutput<T>] {
        &self.chunks
    }

    /// Local count of every chunk.
    pub fn counts(&self) -> Vec<usize> {
        self.chunks.iter().map(ChunkOutput::len).collect()
    }

    /// Exclusive prefix sum of [`counts`](Self::counts).
    pub fn offsets(&self) -> Offsets {
        exclusive_offsets(&self.counts())
    }

    /// Total number of matches across all chunks.
    pub fn total(&self) -> usize {
        self.chunks.iter().map(ChunkOutput::len).sum()
    }
}

impl<T: Copy + Send> Compaction<T> {
    /// Place every chunk into `output[..total]` and release the scratch buffers.
    ///
    /// `output` only needs room for the matches, not for the whole input.
    pub fn scatter(self, output: &mut [T], mode: MergeMode) -> Result<usize, CompactError> {
        let offsets = self.offsets();
        debug!("offsets: {:?} (total {})", offsets.starts, offsets.total);
        scatter(self.chunks, &offsets, output, mode)
    }

    /// Scatter into a freshly allocated vector of exactly `total` elements.
    pub fn into_vec(self, mode: MergeMode) -> Result<Vec<T>, CompactError> {
        // Seeded with a real match so the buffer is initialised without a
        // `Default` bound on `T`; every slot is overwritten by the scatter.
        let seed = match self.chunks.iter().find_map(|c| c.as_slice().first()) {
            Some(&first) => first,
            None => return Ok(Vec::new()),
        };
        let mut output = vec![seed; self.total()];
        self.scatter(&mut output, mode)?;
        Ok(output)
    }
}

// --- Compactor ---

/// Ordered parallel filter over a fixed team of `workers` threads.
///
/// ```
/// use compact_filter::{CompactConfig, Compactor, MergeMode};
///
/// let compactor = Compactor::new(CompactConfig::default().with_workers(4)).unwrap();
/// let input = [3, -1, 4, -1, 5, -9, 2, -6];
/// let mut output = [0; 8];
/// let n = compactor.filter(&input, &mut output, |&v| v >= 0).unwrap();
/// assert_eq!(&output[..n], &[3, 4, 5, 2]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compactor {
    config: CompactConfig,
}

impl Default for Compactor {
    fn default() -> Self {
        Self {
            config: CompactConfig::default(),
        }
    }
}

impl Compactor {
    /// Build a compactor, rejecting a zero worker count up front.
    pub fn new(config: CompactConfig) -> Result<Self, CompactError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compactor with `workers` threads and the default merge mode.
    pub fn with_workers(workers: usize) -> Result<Self, CompactError> {
        Self::new(CompactConfig::default().with_workers(workers))
    }

    pub fn config(&self) -> &CompactConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Compute phase: partition `input`, filter every chunk into its own
    /// scratch buffer, and join.
    ///
    /// With one worker everything runs on the calling thread. Any chunk's
    /// failure fails the whole call and drops every scratch buffer.
    pub fn compact<T, F>(&self, input: &[T], pred: F) -> Result<Compaction<T>, CompactError>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync,
    {
        self.config.validate()?;
        let workers = self.config.workers;
        let chunks = partition(input.len(), workers);
        debug!(
            "compact: {} elements across {} workers",
            input.len(),
            workers
        );

        let pred = &pred;
        let results = if workers == 1 {
            let chunk = chunks[0];
            let result = panic::catch_unwind(AssertUnwindSafe(|| filter_chunk(input, chunk, pred)))
                .map_err(|_| CompactError::WorkerPanicked { chunk: chunk.index })?;
            vec![result]
        } else {
            thread::scope(|s| {
                let mut handles = Vec::with_capacity(workers);
                let mut spawn_error = None;

                for &chunk in &chunks {
                    let spawned = thread::Builder::new()
                        .name(format!("compact-{}", chunk.index))
                        .spawn_scoped(s, move || filter_chunk(input, chunk, pred));
                    match spawned {
                        Ok(handle) => handles.push((chunk.index, handle)),
                        Err(err) => {
                            spawn_error = Some(err);
                            break;
                        }
                    }
                }

                join_team(handles, spawn_error)
            })?
        };

        // First failing chunk (in chunk order) wins; the rest are dropped.
        let chunks = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        let compaction = Compaction { chunks };
        debug!(
            "compact: joined {} workers, {} matches",
            workers,
            compaction.total()
        );
        Ok(compaction)
    }

    /// Filter `input` into the front of `output`, preserving order.
    ///
    /// `output` must be at least as long as `input` (every element could
    /// match); it is validated before any work starts. Returns the match
    /// count; `output[count..]` is left as it was.
    pub fn filter<T, F>(
        &self,
        input: &[T],
        output: &mut [T],
        pred: F,
    ) -> Result<usize, CompactError>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync,
    {
        if output.len() < input.len() {
            return Err(CompactError::OutputTooSmall {
                required: input.len(),
                capacity: output.len(),
            });
        }
        self.compact(input, pred)?.scatter(output, self.config.merge)
    }

    /// Filter `input` into a new vector holding exactly the matches.
    pub fn filter_vec<T, F>(&self, input: &[T], pred: F) -> Result<Vec<T>, CompactError>
    where
        T: Copy + Send + Sync,
        F: Fn(&T) -> bool + Sync,
    {
        self.compact(input, pred)?.into_vec(self.config.merge)
    }

    /// [`filter`](Self::filter) with a comparison [`Predicate`], simplified first.
    pub fn filter_by<T>(
        &self,
        input: &[T],
        output: &mut [T],
        predicate: &Predicate<T>,
    ) -> Result<usize, CompactError>
    where
        T: PartialOrd + Copy + Send + Sync,
    {
        let predicate = predicate.clone().simplify();
        self.filter(input, output, |v| predicate.evaluate(v))
    }
}
