//! Rayon-based parallel filter baseline.
//!
//! `collect` into a `Vec` keeps input order, so the result is directly
//! comparable with the sequential reference.

use rayon::prelude::*;

/// Parallel filter: collect the elements satisfying `pred`, in order.
pub fn par_filter<F>(data: &[i32], pred: F) -> Vec<i32>
where
    F: Fn(&i32) -> bool + Sync + Send,
{
    data.par_iter().copied().filter(|v| pred(v)).collect()
}

/// [`par_filter`] copied into the front of `output`. Returns the match count.
pub fn par_filter_into<F>(data: &[i32], output: &mut [i32], pred: F) -> usize
where
    F: Fn(&i32) -> bool + Sync + Send,
{
    let kept = par_filter(data, pred);
    output[..kept.len()].copy_from_slice(&kept);
    kept.len()
}
