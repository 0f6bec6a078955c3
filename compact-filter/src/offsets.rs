//! Exclusive prefix sum over per-chunk match counts.

/// Destination start offset of every chunk plus the total match count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Offsets {
    pub starts: Vec<usize>,
    pub total: usize,
}

impl Offsets {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// `starts[t] = counts[0] + .. + counts[t - 1]`, with `starts[0] = 0`.
///
/// Sequential and O(P); only meaningful once every count is final.
pub fn exclusive_offsets(counts: &[usize]) -> Offsets {
    let mut starts = Vec::with_capacity(counts.len());
    let mut running = 0usize;
    for &count in counts {
        starts.push(running);
        running += count;
    }
    Offsets {
        starts,
        total: running,
    }
}
