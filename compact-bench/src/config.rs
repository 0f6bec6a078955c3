use compact_filter::Predicate;
use serde::{Deserialize, Serialize};

/// A benchmark profile with preset sizes, runs, and warmup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchProfile {
    pub name: String,
    pub sizes: Vec<usize>,
    pub runs: u32,
    pub warmup: u32,
}

/// Returns the "quick" profile: 100K / 3 runs / 1 warmup.
pub fn quick_profile() -> BenchProfile {
    BenchProfile {
        name: "quick".to_string(),
        sizes: vec![100_000],
        runs: 3,
        warmup: 1,
    }
}

/// Returns the "standard" profile: 1M+10M / 10 runs / 3 warmup.
pub fn standard_profile() -> BenchProfile {
    BenchProfile {
        name: "standard".to_string(),
        sizes: vec![1_000_000, 10_000_000],
        runs: 10,
        warmup: 3,
    }
}

/// Returns the "thorough" profile: 1M+10M+50M / 30 runs / 3 warmup.
pub fn thorough_profile() -> BenchProfile {
    BenchProfile {
        name: "thorough".to_string(),
        sizes: vec![1_000_000, 10_000_000, 50_000_000],
        runs: 30,
        warmup: 3,
    }
}

/// Lookup a profile by name.
pub fn get_profile(name: &str) -> Option<BenchProfile> {
    match name {
        "quick" => Some(quick_profile()),
        "standard" => Some(standard_profile()),
        "thorough" => Some(thorough_profile()),
        _ => None,
    }
}

fn parse_scaled(digits: &str, scale: f64, original: &str) -> Result<usize, String> {
    let num: f64 = digits
        .replace('_', "")
        .parse()
        .map_err(|e| format!("Invalid size '{}': {}", original, e))?;
    let scaled = num * scale;
    if !scaled.is_finite() || scaled < 0.0 {
        return Err(format!("Invalid size '{}': not a finite non-negative count", original));
    }
    // `usize::MAX as f64` rounds up to 2^64, which itself does not fit.
    if scaled >= usize::MAX as f64 {
        return Err(format!("Invalid size '{}': too large", original));
    }
    Ok(scaled as usize)
}

/// Parse a human-readable size string: `1M`, `2.5m`, `100K`, `1_000`, `1000`.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();

    if let Some(prefix) = s.strip_suffix('M').or_else(|| s.strip_suffix('m')) {
        return parse_scaled(prefix, 1_000_000.0, s);
    }
    if let Some(prefix) = s.strip_suffix('K').or_else(|| s.strip_suffix('k')) {
        return parse_scaled(prefix, 1_000.0, s);
    }

    s.replace('_', "")
        .parse::<usize>()
        .map_err(|e| format!("Invalid size '{}': {}", s, e))
}

/// Parse a comma-separated list of size strings.
pub fn parse_sizes(raw: &[String]) -> Result<Vec<usize>, String> {
    raw.iter().map(|s| parse_size(s)).collect()
}

fn parse_value(raw: &str, spec: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|e| format!("Invalid predicate '{}': {}", spec, e))
}

/// Parse a predicate of the form `op:value` or `between:lo:hi`.
///
/// `op` is one of `gt`, `lt`, `ge`, `le`, `eq`, `ne`.
pub fn parse_predicate(spec: &str) -> Result<Predicate<i32>, String> {
    let parts: Vec<&str> = spec.trim().split(':').collect();
    let op = parts[0].to_ascii_lowercase();

    match (op.as_str(), &parts[1..]) {
        ("gt", [v]) => Ok(Predicate::Gt(parse_value(v, spec)?)),
        ("lt", [v]) => Ok(Predicate::Lt(parse_value(v, spec)?)),
        ("ge", [v]) => Ok(Predicate::Ge(parse_value(v, spec)?)),
        ("le", [v]) => Ok(Predicate::Le(parse_value(v, spec)?)),
        ("eq", [v]) => Ok(Predicate::Eq(parse_value(v, spec)?)),
        ("ne", [v]) => Ok(Predicate::Ne(parse_value(v, spec)?)),
        ("between", [lo, hi]) => Ok(Predicate::Between(
            parse_value(lo, spec)?,
            parse_value(hi, spec)?,
        )),
        _ => Err(format!(
            "Invalid predicate '{}'. Expected gt|lt|ge|le|eq|ne:<v> or between:<lo>:<hi>",
            spec
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_suffixes() {
        assert_eq!(parse_size("1M").unwrap(), 1_000_000);
        assert_eq!(parse_size("2.5m").unwrap(), 2_500_000);
        assert_eq!(parse_size("100K").unwrap(), 100_000);
        assert_eq!(parse_size("0.5k").unwrap(), 500);
        assert_eq!(parse_size("1_000K").unwrap(), 1_000_000);
    }

    #[test]
    fn test_parse_size_raw() {
        assert_eq!(parse_size("1000").unwrap(), 1_000);
        assert_eq!(parse_size("1_000").unwrap(), 1_000);
        assert_eq!(parse_size("  7 ").unwrap(), 7);
        assert_eq!(parse_size("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("abc").is_err());
        assert!(parse_size("").is_err());
        assert!(parse_size("-1M").is_err());
    }

    #[test]
    fn test_parse_size_rejects_non_finite_and_overflow() {
        for bad in ["1e20M", "infK", "inf_M", "nanM", "NaNk", "-infM"] {
            let err = parse_size(bad).expect_err(bad);
            assert!(err.starts_with("Invalid size"), "{}: {}", bad, err);
        }
        assert_eq!(parse_size("1e3K").unwrap(), 1_000_000);
    }

    #[test]
    fn test_parse_sizes() {
        let input = vec!["1M".to_string(), "100K".to_string(), "1_000".to_string()];
        assert_eq!(parse_sizes(&input).unwrap(), vec![1_000_000, 100_000, 1_000]);
        assert!(parse_sizes(&["1M".to_string(), "bad".to_string()]).is_err());
    }

    #[test]
    fn test_profiles() {
        for name in ["quick", "standard", "thorough"] {
            let p = get_profile(name).unwrap();
            assert_eq!(p.name, name);
            assert!(p.runs > 0);
            assert!(p.sizes.windows(2).all(|w| w[0] < w[1]));
        }
        assert!(get_profile("unknown").is_none());
    }

    #[test]
    fn test_profile_serialises() {
        let json = serde_json::to_string(&quick_profile()).unwrap();
        let back: BenchProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sizes, vec![100_000]);
    }

    #[test]
    fn test_parse_predicate() {
        assert_eq!(parse_predicate("ge:0").unwrap(), Predicate::Ge(0));
        assert_eq!(parse_predicate("LT:3").unwrap(), Predicate::Lt(3));
        assert_eq!(parse_predicate("ne:-1").unwrap(), Predicate::Ne(-1));
        assert_eq!(
            parse_predicate("between:-2:2").unwrap(),
            Predicate::Between(-2, 2)
        );
    }

    #[test]
    fn test_parse_predicate_invalid() {
        assert!(parse_predicate("ge").is_err());
        assert!(parse_predicate("ge:x").is_err());
        assert!(parse_predicate("between:1").is_err());
        assert!(parse_predicate("near:4").is_err());
        assert!(parse_predicate("").is_err());
    }
}
