//! Single-threaded filter primitive run by each worker on its own chunk.
//!
//! Both forms scan the source once, left to right, and keep matches in
//! their original relative order. Neither touches anything but the given
//! source and destination, so disjoint chunks can be filtered concurrently.

/// Copy the elements of `src` that satisfy `pred` into the front of `dst`.
///
/// Returns the number of elements written; `dst[count..]` is left untouched.
///
/// # Panics
/// If `dst` is shorter than the number of matches. A destination at least
/// `src.len()` long can never overflow.
pub fn filter_into<T, F>(src: &[T], dst: &mut [T], pred: F) -> usize
where
    T: Copy,
    F: Fn(&T) -> bool,
{
    let mut count = 0;
    for value in src {
        if pred(value) {
            dst[count] = *value;
            count += 1;
        }
    }
    count
}

/// Append the elements of `src` that satisfy `pred` to `dst`.
///
/// Returns the number of elements appended. When `dst` already has
/// `src.len()` spare capacity this never reallocates.
pub fn filter_extend<T, F>(src: &[T], dst: &mut Vec<T>, pred: F) -> usize
where
    T: Copy,
    F: Fn(&T) -> bool,
{
    let before = dst.len();
    dst.extend(src.iter().copied().filter(|v| pred(v)));
    dst.len() - before
}
