//! Summary statistics over per-run timings (milliseconds).

use serde::{Deserialize, Serialize};

/// Descriptive statistics for one variant at one size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub stddev: f64,
    pub cv_percent: f64,
    pub sample_count: usize,
    pub outliers_removed: usize,
}

impl Stats {
    /// Summarise `samples` after dropping IQR outliers.
    ///
    /// Values outside `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]` are discarded unless that
    /// would leave fewer than two samples, in which case all are kept.
    pub fn from_samples(samples: &[f64]) -> Stats {
        match samples {
            [] => return Stats::default(),
            [only] => {
                return Stats {
                    mean: *only,
                    median: *only,
                    min: *only,
                    max: *only,
                    sample_count: 1,
                    ..Stats::default()
                }
            }
            _ => {}
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let fence = 1.5 * (q3 - q1);
        let kept: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|&v| v >= q1 - fence && v <= q3 + fence)
            .collect();

        let (data, outliers_removed) = if kept.len() >= 2 {
            let removed = sorted.len() - kept.len();
            (kept, removed)
        } else {
            (sorted, 0)
        };

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let stddev = variance.sqrt();

        Stats {
            mean,
            median: percentile(&data, 50.0),
            min: data[0],
            max: data[data.len() - 1],
            stddev,
            cv_percent: if mean > 0.0 { stddev / mean * 100.0 } else { 0.0 },
            sample_count: data.len(),
            outliers_removed,
        }
    }
}

/// Linear-interpolated percentile (0-100) of a sorted, non-empty slice.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(Stats::from_samples(&[]).sample_count, 0);

        let s = Stats::from_samples(&[4.5]);
        assert_eq!(s.sample_count, 1);
        assert!(close(s.mean, 4.5) && close(s.median, 4.5));
        assert!(close(s.stddev, 0.0));
    }

    #[test]
    fn test_basic_moments() {
        // mean 3, sample variance 2.5
        let s = Stats::from_samples(&[5.0, 1.0, 4.0, 2.0, 3.0]);
        assert!(close(s.mean, 3.0));
        assert!(close(s.median, 3.0));
        assert!(close(s.min, 1.0));
        assert!(close(s.max, 5.0));
        assert!(close(s.stddev, 2.5f64.sqrt()));
        assert!(close(s.cv_percent, s.stddev / s.mean * 100.0));
    }

    #[test]
    fn test_even_median() {
        assert!(close(Stats::from_samples(&[1.0, 2.0, 3.0, 4.0]).median, 2.5));
    }

    #[test]
    fn test_outliers_dropped() {
        let mut samples = vec![10.0, 10.1, 9.9, 10.0, 10.2, 9.8, 10.0, 10.1];
        samples.push(250.0);
        samples.push(0.5);
        let s = Stats::from_samples(&samples);
        assert_eq!(s.outliers_removed, 2);
        assert!(s.mean > 9.5 && s.mean < 10.5);
        assert!(s.max < 11.0);
    }

    #[test]
    fn test_constant_samples() {
        let s = Stats::from_samples(&[2.0; 6]);
        assert!(close(s.stddev, 0.0));
        assert!(close(s.cv_percent, 0.0));
        assert_eq!(s.outliers_removed, 0);
    }
}
