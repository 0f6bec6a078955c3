//! JSON report: host header, run parameters, and every DataPoint.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::harness::DataPoint;
use crate::hardware::HostInfo;

#[derive(Serialize)]
struct JsonReport<'a> {
    host: &'a HostInfo,
    timestamp: String,
    predicate: String,
    seed: u64,
    results: &'a [DataPoint],
}

/// Serialize the report to a pretty-printed JSON string.
pub fn to_json(
    data: &[DataPoint],
    host: &HostInfo,
    predicate: &str,
    seed: u64,
) -> Result<String, String> {
    let report = JsonReport {
        host,
        timestamp: chrono::Utc::now().to_rfc3339(),
        predicate: predicate.to_string(),
        seed,
        results: data,
    };
    serde_json::to_string_pretty(&report).map_err(|e| format!("JSON serialization failed: {}", e))
}

/// Write benchmark results to a JSON file, creating parent directories.
pub fn write_json(
    path: &str,
    data: &[DataPoint],
    host: &HostInfo,
    predicate: &str,
    seed: u64,
) -> Result<(), String> {
    let json = to_json(data, host, predicate, seed)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;

    log::info!("JSON results written to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::throughput_metrics;
    use crate::stats::Stats;

    #[test]
    fn test_report_shape() {
        let host = HostInfo::detect();
        let points = vec![DataPoint {
            variant: "limited".to_string(),
            size: 1_000,
            workers: 2,
            matches: 500,
            stats: Stats::from_samples(&[0.5, 0.6]),
            speedup: 1.2,
            valid: true,
            metrics: throughput_metrics(0.5, 1_000, 500),
        }];

        let json = to_json(&points, &host, "x >= 0", 42).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["predicate"], "x >= 0");
        assert_eq!(value["host"]["logical_cpus"], host.logical_cpus);
        assert_eq!(value["results"][0]["variant"], "limited");
        assert_eq!(value["results"][0]["matches"], 500);
        assert!(value["timestamp"].as_str().is_some());
    }
}
