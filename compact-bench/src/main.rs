mod baselines;
mod cli;
mod config;
mod data_gen;
mod hardware;
mod harness;
mod output;
mod stats;
mod timing;
mod variants;

use std::io::{self, BufWriter, Write};

use clap::Parser;
use cli::CompactArgs;
use compact_filter::{available_workers, CompactConfig, Compactor, Predicate};
use config::{get_profile, parse_predicate, parse_sizes};
use data_gen::DataGenerator;
use hardware::HostInfo;
use harness::{generate, run_variants, BenchConfig};
use output::progress::BenchProgress;
use output::table::render_all_tables;
use variants::{all_variants, select_variants};

const DEFAULT_RUNS: u32 = 10;
const DEFAULT_WARMUP: u32 = 3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CompactArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &CompactArgs) -> Result<(), String> {
    let predicate = parse_predicate(&args.predicate)?;
    let workers = args.workers.unwrap_or_else(available_workers);

    match args.echo {
        Some(n) => echo(args, n, workers, &predicate),
        None => bench(args, workers, &predicate),
    }
}

/// Print `n` inputs, `===`, then the filtered output, one value per line.
fn echo(
    args: &CompactArgs,
    n: usize,
    workers: usize,
    predicate: &Predicate<i32>,
) -> Result<(), String> {
    let mut gen = DataGenerator::new(args.seed);
    let input = generate(&mut gen, args.distribution, n);

    let compactor = Compactor::new(CompactConfig::default().with_workers(workers))
        .map_err(|e| e.to_string())?;
    let mut output = vec![0i32; n];
    let count = compactor
        .filter_by(&input, &mut output, predicate)
        .map_err(|e| e.to_string())?;
    log::debug!("echo: {} of {} kept by {}", count, n, predicate);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_echo(&mut out, &input, &output[..count])
        .map_err(|e| format!("Failed to write output: {}", e))
}

fn write_echo(out: &mut impl Write, input: &[i32], kept: &[i32]) -> io::Result<()> {
    for v in input {
        writeln!(out, "{}", v)?;
    }
    writeln!(out, "===")?;
    for v in kept {
        writeln!(out, "{}", v)?;
    }
    out.flush()
}

fn bench(args: &CompactArgs, workers: usize, predicate: &Predicate<i32>) -> Result<(), String> {
    let profile = match &args.profile {
        Some(name) => Some(get_profile(name).ok_or_else(|| {
            format!("Unknown profile '{}'. Valid: quick, standard, thorough", name)
        })?),
        None => None,
    };

    // --sizes wins over --profile, which wins over the 1M default.
    let sizes = match (&args.sizes, &profile) {
        (Some(raw), _) => parse_sizes(raw)?,
        (None, Some(p)) => p.sizes.clone(),
        (None, None) => vec![1_000_000],
    };
    let runs = args
        .runs
        .or(profile.as_ref().map(|p| p.runs))
        .unwrap_or(DEFAULT_RUNS);
    let warmup = args
        .warmup
        .or(profile.as_ref().map(|p| p.warmup))
        .unwrap_or(DEFAULT_WARMUP);

    let all = all_variants(workers, predicate).map_err(|e| e.to_string())?;
    let selected = if args.is_all() {
        all
    } else {
        select_variants(all, &args.variants)?
    };
    let host = HostInfo::detect();

    println!("compact-bench: ordered parallel filter");
    println!("  Host: {} logical CPUs ({}/{})", host.logical_cpus, host.os, host.arch);
    println!("  Workers: {}", workers);
    println!("  Predicate: {}", predicate);
    println!("  Variants:");
    for v in &selected {
        println!("    {:<11} {}", v.name(), v.description());
    }
    println!("  Sizes: {:?}", sizes);
    println!("  Runs: {}, Warmup: {}, Seed: {}", runs, warmup, args.seed);
    if let Some(path) = &args.json_file {
        println!("  JSON output: {}", path);
    }
    println!();

    let config = BenchConfig {
        sizes,
        runs,
        warmup,
        seed: args.seed,
        distribution: args.distribution,
    };

    let progress = BenchProgress::new();
    let cb = progress.callback();
    let results = run_variants(&selected, &config, predicate, Some(&cb));
    progress.finish();
    let results = results.map_err(|e| e.to_string())?;

    render_all_tables(&results);

    if let Some(path) = &args.json_file {
        output::json::write_json(path, &results, &host, &predicate.to_string(), args.seed)?;
    }
    Ok(())
}
