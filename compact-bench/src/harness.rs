//! Measurement harness: validates every variant against the sequential
//! reference, runs warmup + measured loops, and returns one DataPoint per
//! variant and size.

use std::collections::HashMap;

use compact_filter::{CompactError, Predicate};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::baselines::sequential::sequential_filter;
use crate::cli::Distribution;
use crate::data_gen::DataGenerator;
use crate::stats::Stats;
use crate::timing::BenchTimer;
use crate::variants::Variant;

/// A single benchmark data point for one variant at one size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub variant: String,
    pub size: usize,
    pub workers: usize,
    pub matches: usize,
    pub stats: Stats,
    /// Sequential mean divided by this variant's mean.
    pub speedup: f64,
    pub valid: bool,
    pub metrics: HashMap<String, f64>,
}

/// Configuration for a benchmark run.
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub runs: u32,
    pub warmup: u32,
    pub seed: u64,
    pub distribution: Distribution,
}

/// Generate `size` inputs with the configured distribution.
pub fn generate(gen: &mut DataGenerator, distribution: Distribution, size: usize) -> Vec<i32> {
    match distribution {
        Distribution::Small => gen.small_signed(size),
        Distribution::Wide => gen.uniform_i32(size),
    }
}

fn time_runs(
    runs: u32,
    mut body: impl FnMut() -> Result<usize, CompactError>,
) -> Result<Vec<f64>, CompactError> {
    let mut times = Vec::with_capacity(runs as usize);
    for _ in 0..runs {
        let timer = BenchTimer::start();
        body()?;
        times.push(timer.stop());
    }
    Ok(times)
}

/// Run `variants` across all configured sizes.
///
/// For each size:
/// 1. generate input and the sequential reference output
/// 2. time the sequential reference (the speedup baseline)
/// 3. per variant: one validation run, warmup loop, measured loop
/// 4. statistics and throughput metrics -> DataPoint
pub fn run_variants(
    variants: &[Box<dyn Variant>],
    config: &BenchConfig,
    predicate: &Predicate<i32>,
    progress_cb: Option<&dyn Fn(&str)>,
) -> Result<Vec<DataPoint>, CompactError> {
    let mut results = Vec::new();
    let mut gen = DataGenerator::new(config.seed);
    let pred = |v: &i32| predicate.evaluate(v);
    let report = |msg: String| {
        if let Some(cb) = progress_cb {
            cb(&msg);
        }
    };

    for &size in &config.sizes {
        let size_label = format_size(size);
        report(format!("{}: generating input", size_label));

        let input = generate(&mut gen, config.distribution, size);
        let mut expected = vec![0i32; size];
        let expected_len = sequential_filter(&input, &mut expected, pred);
        expected.truncate(expected_len);

        let mut output = vec![0i32; size];
        report(format!("{}: measuring sequential baseline", size_label));
        let baseline_times = time_runs(config.runs, || {
            Ok(sequential_filter(&input, &mut output, pred))
        })?;
        let baseline = Stats::from_samples(&baseline_times);

        for variant in variants {
            let name = variant.name();

            output.fill(0);
            let matches = variant.run(&input, &mut output)?;
            let valid = matches == expected_len && output[..matches] == expected[..];
            if !valid {
                warn!(
                    "{} @ {}: output differs from sequential reference ({} vs {} matches)",
                    name, size_label, matches, expected_len
                );
            }

            report(format!(
                "{} @ {}: warmup ({} runs)",
                name, size_label, config.warmup
            ));
            time_runs(config.warmup, || variant.run(&input, &mut output))?;

            report(format!(
                "{} @ {}: measuring ({} runs)",
                name, size_label, config.runs
            ));
            let times = time_runs(config.runs, || variant.run(&input, &mut output))?;
            let stats = Stats::from_samples(&times);

            let speedup = if stats.mean > 0.0 {
                baseline.mean / stats.mean
            } else {
                0.0
            };
            let metrics = throughput_metrics(stats.mean, size, matches);
            info!(
                "{} @ {}: mean {:.3} ms, speedup {:.2}x",
                name, size_label, stats.mean, speedup
            );

            results.push(DataPoint {
                variant: name.to_string(),
                size,
                workers: variant.workers(),
                matches,
                stats,
                speedup,
                valid,
                metrics,
            });
        }
    }

    Ok(results)
}

/// Million elements per second and selectivity for one measurement.
pub fn throughput_metrics(mean_ms: f64, size: usize, matches: usize) -> HashMap<String, f64> {
    let mut m = HashMap::new();
    let seconds = mean_ms / 1000.0;
    let melem = if seconds > 0.0 {
        size as f64 / seconds / 1e6
    } else {
        0.0
    };
    let selectivity = if size > 0 {
        matches as f64 / size as f64 * 100.0
    } else {
        0.0
    };
    m.insert("melem_per_sec".to_string(), melem);
    m.insert("selectivity_pct".to_string(), selectivity);
    m
}

/// Format a size number for display (e.g., 1000000 -> "1M").
pub fn format_size(size: usize) -> String {
    if size >= 1_000_000 && size % 1_000_000 == 0 {
        format!("{}M", size / 1_000_000)
    } else if size >= 1_000 && size % 1_000 == 0 {
        format!("{}K", size / 1_000)
    } else {
        format!("{}", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::all_variants;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(1_000_000), "1M");
        assert_eq!(format_size(100_000), "100K");
        assert_eq!(format_size(1_500), "1500");
        assert_eq!(format_size(7), "7");
    }

    #[test]
    fn test_throughput_metrics() {
        let m = throughput_metrics(10.0, 1_000_000, 250_000);
        assert!((m["melem_per_sec"] - 100.0).abs() < 1e-9);
        assert!((m["selectivity_pct"] - 25.0).abs() < 1e-9);

        let empty = throughput_metrics(0.0, 0, 0);
        assert_eq!(empty["melem_per_sec"], 0.0);
        assert_eq!(empty["selectivity_pct"], 0.0);
    }

    #[test]
    fn test_run_variants_all_valid() {
        let predicate = Predicate::Ge(0);
        let variants = all_variants(3, &predicate).unwrap();
        let config = BenchConfig {
            sizes: vec![0, 7, 10_000],
            runs: 2,
            warmup: 1,
            seed: 42,
            distribution: Distribution::Small,
        };
        let points = run_variants(&variants, &config, &predicate, None).unwrap();
        assert_eq!(points.len(), 3 * variants.len());
        assert!(points.iter().all(|p| p.valid), "every variant matches reference");
        assert!(points.iter().all(|p| p.stats.sample_count >= 1));

        // Every variant agrees on the count for a given size.
        for chunk in points.chunks(variants.len()) {
            assert!(chunk.iter().all(|p| p.matches == chunk[0].matches));
        }
    }

    #[test]
    fn test_generate_distributions() {
        let mut gen = DataGenerator::new(3);
        let small = generate(&mut gen, Distribution::Small, 100);
        assert!(small.iter().all(|&v| (-5..5).contains(&v)));
        let wide = generate(&mut gen, Distribution::Wide, 100);
        assert_eq!(wide.len(), 100);
    }
}
