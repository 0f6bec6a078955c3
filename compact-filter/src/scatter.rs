//! Scatter-merge: place every chunk's matches at its prefix-sum offset.
//!
//! Destination ranges `[starts[t], starts[t] + count[t])` are disjoint and
//! tile `[0, total)` exactly, so they are carved out of the output with
//! `split_at_mut` and handed to independent copies without any locking.

use std::mem;
use std::thread;

use log::{debug, trace};

use crate::compactor::ChunkOutput;
use crate::config::MergeMode;
use crate::offsets::Offsets;
use crate::team::join_team;
use crate::CompactError;

/// Split `output[..offsets.total]` into one destination slice per chunk.
fn carve<'a, T>(
    output: &'a mut [T],
    offsets: &Offsets,
    chunks: &[ChunkOutput<T>],
) -> Vec<&'a mut [T]> {
    let mut rest = &mut output[..offsets.total];
    let mut placed = 0;
    let mut slices = Vec::with_capacity(chunks.len());

    for (chunk, &start) in chunks.iter().zip(&offsets.starts) {
        debug_assert_eq!(start, placed, "offset for chunk {} is not contiguous", chunk.index());
        let (head, tail) = mem::take(&mut rest).split_at_mut(chunk.len());
        slices.push(head);
        rest = tail;
        placed += chunk.len();
    }
    slices
}

/// Copy every chunk's scratch buffer into `output` at its offset.
///
/// Consumes the chunks: each scratch buffer is released as soon as it has
/// been copied. Returns the total number of elements placed.
pub fn scatter<T>(
    chunks: Vec<ChunkOutput<T>>,
    offsets: &Offsets,
    output: &mut [T],
    mode: MergeMode,
) -> Result<usize, CompactError>
where
    T: Copy + Send,
{
    debug_assert_eq!(chunks.len(), offsets.len(), "one offset per chunk");

    if output.len() < offsets.total {
        return Err(CompactError::OutputTooSmall {
            required: offsets.total,
            capacity: output.len(),
        });
    }

    let slices = carve(output, offsets, &chunks);
    let busy = chunks.iter().filter(|c| !c.is_empty()).count();
    debug!(
        "scatter: {} elements from {} non-empty chunks ({} merge)",
        offsets.total,
        busy,
        mode.as_str()
    );

    // A single busy chunk gains nothing from a thread.
    if mode == MergeMode::Serial || busy <= 1 {
        for (chunk, dst) in chunks.into_iter().zip(slices) {
            dst.copy_from_slice(chunk.as_slice());
        }
        return Ok(offsets.total);
    }

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(busy);
        let mut spawn_error = None;

        for (chunk, dst) in chunks.into_iter().zip(slices) {
            if chunk.is_empty() {
                continue;
            }
            let index = chunk.index();
            let spawned = thread::Builder::new()
                .name(format!("compact-merge-{}", index))
                .spawn_scoped(s, move || {
                    dst.copy_from_slice(chunk.as_slice());
                    trace!("merge: chunk {} placed {} elements", index, dst.len());
                });
            match spawned {
                Ok(handle) => handles.push((index, handle)),
                Err(err) => {
                    spawn_error = Some(err);
                    break;
                }
            }
        }

        join_team(handles, spawn_error)
    })?;

    Ok(offsets.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::exclusive_offsets;
    use crate::partition::Chunk;

    /// Chunks whose every element matched, laid out back to back.
    fn chunks_from(parts: &[&[i32]]) -> Vec<ChunkOutput<i32>> {
        let mut start = 0;
        parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                let chunk = Chunk {
                    index,
                    start,
                    end: start + part.len(),
                };
                start = chunk.end;
                ChunkOutput::from_parts(chunk, part.to_vec())
            })
            .collect()
    }

    fn run(parts: &[&[i32]], mode: MergeMode) -> (usize, Vec<i32>) {
        let chunks = chunks_from(parts);
        let counts: Vec<usize> = chunks.iter().map(ChunkOutput::len).collect();
        let offsets = exclusive_offsets(&counts);
        let mut out = vec![-1i32; offsets.total + 3];
        let n = scatter(chunks, &offsets, &mut out, mode).expect("scatter failed");
        (n, out)
    }

    #[test]
    fn test_serial_places_in_order() {
        let (n, out) = run(&[&[3], &[4], &[5, 2]], MergeMode::Serial);
        assert_eq!(n, 4);
        assert_eq!(&out[..n], &[3, 4, 5, 2]);
        assert_eq!(&out[n..], &[-1, -1, -1]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let parts: &[&[i32]] = &[&[1, 2, 3], &[], &[4], &[5, 6], &[], &[7, 8, 9, 10]];
        let serial = run(parts, MergeMode::Serial);
        let parallel = run(parts, MergeMode::Parallel);
        assert_eq!(serial, parallel);
        assert_eq!(&parallel.1[..parallel.0], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_all_empty_chunks() {
        for mode in [MergeMode::Serial, MergeMode::Parallel] {
            let (n, out) = run(&[&[], &[], &[]], mode);
            assert_eq!(n, 0);
            assert!(out.iter().all(|&v| v == -1));
        }
    }

    #[test]
    fn test_no_chunks() {
        let offsets = exclusive_offsets(&[]);
        let mut out: Vec<i32> = Vec::new();
        let n = scatter(Vec::new(), &offsets, &mut out, MergeMode::Parallel)
            .expect("empty scatter");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_output_too_small() {
        let chunks = chunks_from(&[&[1, 2], &[3]]);
        let offsets = exclusive_offsets(&[2, 1]);
        let mut out = vec![0i32; 2];
        let err = scatter(chunks, &offsets, &mut out, MergeMode::Parallel)
            .expect_err("undersized output must be rejected");
        assert!(matches!(
            err,
            CompactError::OutputTooSmall {
                required: 3,
                capacity: 2
            }
        ));
        assert_eq!(out, vec![0, 0], "nothing written on failure");
    }
}
