use clap::{Parser, ValueEnum};

/// Ordered parallel filter: demo driver and measurement harness
#[derive(Parser, Debug)]
#[command(name = "compact-bench", version, about)]
pub struct CompactArgs {
    /// Variants to measure (sequential, limited, full, rayon).
    /// Use "all" or leave empty to run every variant.
    #[arg(value_name = "VARIANTS")]
    pub variants: Vec<String>,

    /// Element sizes to benchmark (e.g., 1M, 100K, 1_000)
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<String>>,

    /// Number of measured runs per size [default: 10, or the profile's]
    #[arg(long)]
    pub runs: Option<u32>,

    /// Number of warmup runs before measurement [default: 3, or the profile's]
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Benchmark profile: quick (100K/3/1), standard (1M+10M/10/3), thorough (1M+10M+50M/30/3)
    #[arg(long)]
    pub profile: Option<String>,

    /// Worker team size [default: available parallelism]
    #[arg(long)]
    pub workers: Option<usize>,

    /// Predicate applied to every element: gt|lt|ge|le|eq|ne:<v> or between:<lo>:<hi>
    #[arg(long, default_value = "ge:0", allow_hyphen_values = true)]
    pub predicate: String,

    /// Seed for input generation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Input value distribution
    #[arg(long, value_enum, default_value_t = Distribution::Small)]
    pub distribution: Distribution,

    /// Write JSON results to file
    #[arg(long)]
    pub json_file: Option<String>,

    /// Print N generated inputs, a `===` line, then the filtered output, and exit
    #[arg(long, value_name = "N")]
    pub echo: Option<usize>,
}

/// Shape of the generated input.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distribution {
    /// Small signed values in [-5, 5)
    Small,
    /// Uniform over the whole i32 range
    Wide,
}

impl CompactArgs {
    /// True when no explicit variant list was given (or it is just "all").
    pub fn is_all(&self) -> bool {
        self.variants.is_empty()
            || self.variants.iter().any(|v| v.eq_ignore_ascii_case("all"))
    }
}
