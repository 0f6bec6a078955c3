//! Single-threaded ordered filter.

use compact_filter::filter_into;

/// Filter `data` into the front of `output` on the calling thread.
///
/// Same Local Filter the workers run, over the whole input as one chunk.
pub fn sequential_filter<F>(data: &[i32], output: &mut [i32], pred: F) -> usize
where
    F: Fn(&i32) -> bool,
{
    filter_into(data, output, pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_sample() {
        let data = [3, -1, 4, -1, 5, -9, 2, -6];
        let mut out = [0; 8];
        let n = sequential_filter(&data, &mut out, |&v| v >= 0);
        assert_eq!(&out[..n], &[3, 4, 5, 2]);
    }

    #[test]
    fn test_sequential_empty() {
        let mut out: [i32; 0] = [];
        assert_eq!(sequential_filter(&[], &mut out, |_| true), 0);
    }
}
