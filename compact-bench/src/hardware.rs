//! Host description recorded alongside benchmark results.

use compact_filter::available_workers;
use serde::Serialize;

/// What the benchmark ran on.
#[derive(Debug, Clone, Serialize)]
pub struct HostInfo {
    /// Logical CPUs reported by the OS (default worker team size).
    pub logical_cpus: usize,
    pub os: String,
    pub arch: String,
}

impl HostInfo {
    pub fn detect() -> Self {
        Self {
            logical_cpus: available_workers(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let host = HostInfo::detect();
        assert!(host.logical_cpus >= 1);
        assert!(!host.os.is_empty());
        assert!(!host.arch.is_empty());
    }
}
