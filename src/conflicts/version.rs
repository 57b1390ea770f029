//! Lenient version comparison for manager-native version strings.
//!
//! Manager versions are not reliably semver (`1.21.3_1`, `3.3.0 3.2.1`,
//! `126.0`). Comparison extracts the leading dotted-numeric prefix and
//! compares component by component; anything unparsable never matches a
//! threshold, so rules stay quiet rather than guessing.

use std::cmp::Ordering;

use regex::Regex;

/// Extract the leading numeric components of a version string.
///
/// `"1.21.3_1 (stable)"` → `[1, 21, 3]`. Returns None when no leading
/// number exists.
pub fn extract_components(raw: &str) -> Option<Vec<u64>> {
    let re = Regex::new(r"^v?(\d+(?:\.\d+)*)").ok()?;
    let caps = re.captures(raw.trim())?;
    let numeric = caps.get(1)?.as_str();
    let components: Vec<u64> = numeric.split('.').filter_map(|c| c.parse().ok()).collect();
    if components.is_empty() {
        None
    } else {
        Some(components)
    }
}

/// Whether `raw` parses and compares strictly below `threshold`.
pub fn version_lt(raw: &str, threshold: &str) -> bool {
    compare(raw, threshold) == Some(Ordering::Less)
}

/// Whether `raw` parses and compares at or above `threshold`.
pub fn version_ge(raw: &str, threshold: &str) -> bool {
    matches!(
        compare(raw, threshold),
        Some(Ordering::Greater) | Some(Ordering::Equal)
    )
}

/// Component-wise comparison; a longer version with equal prefix is greater.
fn compare(a: &str, b: &str) -> Option<Ordering> {
    let a = extract_components(a)?;
    let b = extract_components(b)?;

    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return Some(other),
        }
    }
    Some(a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_plain_semver() {
        assert_eq!(extract_components("1.26.4"), Some(vec![1, 26, 4]));
    }

    #[test]
    fn extract_with_suffix_and_prefix() {
        assert_eq!(extract_components("1.21.3_1"), Some(vec![1, 21, 3]));
        assert_eq!(extract_components("v18.17.0"), Some(vec![18, 17, 0]));
        assert_eq!(extract_components("  2.0rc1"), Some(vec![2, 0]));
    }

    #[test]
    fn extract_rejects_non_numeric() {
        assert_eq!(extract_components("latest"), None);
        assert_eq!(extract_components(""), None);
    }

    #[test]
    fn lt_basic() {
        assert!(version_lt("1.19.5", "1.20"));
        assert!(!version_lt("1.20", "1.20"));
        assert!(!version_lt("1.21.0", "1.20"));
    }

    #[test]
    fn ge_basic() {
        assert!(version_ge("2.0.1", "2.0"));
        assert!(version_ge("2.0", "2.0"));
        assert!(!version_ge("1.5.3", "2.0"));
    }

    #[test]
    fn longer_equal_prefix_is_greater() {
        assert!(version_ge("1.20.1", "1.20"));
        assert!(version_lt("1.20", "1.20.1"));
    }

    #[test]
    fn unparsable_never_matches() {
        assert!(!version_lt("latest", "1.20"));
        assert!(!version_ge("latest", "1.20"));
        assert!(!version_lt("1.20", "garbage"));
    }
}
