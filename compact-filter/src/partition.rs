//! Static partitioning of an index range across a fixed worker team.
//!
//! Every worker gets `n / p` elements; the last worker also takes the
//! remainder, so it is up to `p - 1` elements larger than the rest.

use std::ops::Range;

/// Half-open bounds `[start, end)` of the slice of input owned by worker `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Bounds of chunk `t` when `n` elements are split across `p` workers.
///
/// `p` must be at least 1 and `t` less than `p`.
pub fn chunk_bounds(n: usize, p: usize, t: usize) -> Chunk {
    debug_assert!(p >= 1, "worker count must be non-zero");
    debug_assert!(t < p, "chunk index {} out of range for {} workers", t, p);

    let size = n / p;
    let start = t * size;
    let end = if t == p - 1 { n } else { (t + 1) * size };
    Chunk {
        index: t,
        start,
        end,
    }
}

/// All `p` chunk descriptors for an input of length `n`, in index order.
///
/// When `n < p` the leading chunks are empty and the last one holds everything.
pub fn partition(n: usize, p: usize) -> Vec<Chunk> {
    (0..p).map(|t| chunk_bounds(n, p, t)).collect()
}
