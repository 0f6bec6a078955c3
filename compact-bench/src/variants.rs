//! Variant trait and registry.
//!
//! Each variant filters the same `i32` input with the same predicate into a
//! caller-provided output and returns the match count, so the harness can
//! validate and time them interchangeably.

use compact_filter::{CompactConfig, CompactError, Compactor, MergeMode, Predicate};

use crate::baselines::{rayon_filter, sequential};

/// One way of running the ordered filter.
pub trait Variant {
    /// Short name used for CLI selection (e.g., "full").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Worker team size, or 1 for single-threaded variants.
    fn workers(&self) -> usize;

    /// Filter `input` into the front of `output`. Returns the match count.
    fn run(&self, input: &[i32], output: &mut [i32]) -> Result<usize, CompactError>;
}

/// Single-threaded Local Filter over the whole input.
pub struct SequentialVariant {
    predicate: Predicate<i32>,
}

impl Variant for SequentialVariant {
    fn name(&self) -> &str {
        "sequential"
    }

    fn description(&self) -> &str {
        "single-threaded ordered filter (reference)"
    }

    fn workers(&self) -> usize {
        1
    }

    fn run(&self, input: &[i32], output: &mut [i32]) -> Result<usize, CompactError> {
        if output.len() < input.len() {
            return Err(CompactError::OutputTooSmall {
                required: input.len(),
                capacity: output.len(),
            });
        }
        Ok(sequential::sequential_filter(input, output, |v| {
            self.predicate.evaluate(v)
        }))
    }
}

/// The compactor with a given merge mode.
pub struct CompactorVariant {
    name: &'static str,
    description: &'static str,
    compactor: Compactor,
    predicate: Predicate<i32>,
}

impl Variant for CompactorVariant {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn workers(&self) -> usize {
        self.compactor.workers()
    }

    fn run(&self, input: &[i32], output: &mut [i32]) -> Result<usize, CompactError> {
        self.compactor.filter_by(input, output, &self.predicate)
    }
}

/// Order-preserving rayon `par_iter().filter().collect()`.
pub struct RayonVariant {
    predicate: Predicate<i32>,
}

impl Variant for RayonVariant {
    fn name(&self) -> &str {
        "rayon"
    }

    fn description(&self) -> &str {
        "rayon par_iter filter + collect (work-stealing baseline)"
    }

    fn workers(&self) -> usize {
        rayon::current_num_threads()
    }

    fn run(&self, input: &[i32], output: &mut [i32]) -> Result<usize, CompactError> {
        if output.len() < input.len() {
            return Err(CompactError::OutputTooSmall {
                required: input.len(),
                capacity: output.len(),
            });
        }
        Ok(rayon_filter::par_filter_into(input, output, |v| {
            self.predicate.evaluate(v)
        }))
    }
}

/// Names accepted on the command line, in run order.
pub const VARIANT_NAMES: [&str; 4] = ["sequential", "limited", "full", "rayon"];

/// Build every variant for a team of `workers` threads.
pub fn all_variants(
    workers: usize,
    predicate: &Predicate<i32>,
) -> Result<Vec<Box<dyn Variant>>, CompactError> {
    let config = CompactConfig::default().with_workers(workers);
    let limited = Compactor::new(config.with_merge(MergeMode::Serial))?;
    let full = Compactor::new(config.with_merge(MergeMode::Parallel))?;

    Ok(vec![
        Box::new(SequentialVariant {
            predicate: predicate.clone(),
        }),
        Box::new(CompactorVariant {
            name: "limited",
            description: "parallel compute, serial scatter-merge",
            compactor: limited,
            predicate: predicate.clone(),
        }),
        Box::new(CompactorVariant {
            name: "full",
            description: "parallel compute, parallel scatter-merge",
            compactor: full,
            predicate: predicate.clone(),
        }),
        Box::new(RayonVariant {
            predicate: predicate.clone(),
        }),
    ])
}

/// Keep only the variants named in `names`, in registry order.
pub fn select_variants(
    all: Vec<Box<dyn Variant>>,
    names: &[String],
) -> Result<Vec<Box<dyn Variant>>, String> {
    for name in names {
        if !VARIANT_NAMES.contains(&name.as_str()) {
            return Err(format!(
                "Unknown variant '{}'. Available: {}",
                name,
                VARIANT_NAMES.join(", ")
            ));
        }
    }
    Ok(all
        .into_iter()
        .filter(|v| names.iter().any(|n| n == v.name()))
        .collect())
}
