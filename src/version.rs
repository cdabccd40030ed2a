// src/version.rs

//! Order-preserving encoding for RPM version fields
//!
//! RPM compares versions segment by segment: maximal runs of digits compare
//! numerically, maximal runs of letters compare lexically, digits sort newer
//! than letters, and any other character only separates segments. See
//! https://fedoraproject.org/wiki/Archive:Tools/RPM/VersionComparison
//!
//! `encode` rewrites a version field so that plain lexicographic comparison
//! of the encoded strings matches that order. Digit runs lose their leading
//! zeros and gain a two-digit length prefix (`"10"` becomes `"02-10"`, which
//! sorts after `"01-9"`); letter runs gain a `$` prefix, which sorts below
//! every digit. Encoded forms are what the sort indexes of the persistence
//! layer store, so the encoding must stay stable.

use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Longest digit run the two-digit length prefix can express.
const MAX_DIGIT_RUN: usize = 99;

/// Encode one version field (an epoch, version, or release value) into its
/// order-preserving form.
///
/// Fails on an empty field and on a digit run longer than 99 digits.
pub fn encode(field: &str) -> Result<String> {
    if field.is_empty() {
        return Err(Error::VersionEncode(
            "version field is empty".to_string(),
        ));
    }

    let encoded = segments(field)
        .into_iter()
        .map(encode_segment)
        .collect::<Result<Vec<_>>>()?;

    Ok(encoded.join("."))
}

/// Compare two version fields under RPM semantics.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(encode(a)?.cmp(&encode(b)?))
}

/// Split a field into maximal runs of ASCII digits and ASCII letters.
/// Every other character is a separator and is dropped.
fn segments(field: &str) -> Vec<&str> {
    let bytes = field.as_bytes();
    let mut runs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            runs.push(&field[start..i]);
        } else if bytes[i].is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            runs.push(&field[start..i]);
        } else {
            i += 1;
        }
    }

    runs
}

fn encode_segment(run: &str) -> Result<String> {
    if run.as_bytes()[0].is_ascii_digit() {
        // Leading zeros are insignificant under RPM comparison, so an
        // all-zero run collapses to the empty string with prefix "00".
        let stripped = run.trim_start_matches('0');
        if stripped.len() > MAX_DIGIT_RUN {
            return Err(Error::VersionEncode(format!(
                "digit run of {} digits exceeds the maximum of {}",
                stripped.len(),
                MAX_DIGIT_RUN
            )));
        }
        Ok(format!("{:02}-{}", stripped.len(), stripped))
    } else {
        Ok(format!("${run}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_digit_runs() {
        assert_eq!(encode("1.2").unwrap(), "01-1.01-2");
        assert_eq!(encode("1.10").unwrap(), "01-1.02-10");
        assert_eq!(encode("3").unwrap(), "01-3");
    }

    #[test]
    fn test_encode_strips_leading_zeros() {
        assert_eq!(encode("007").unwrap(), "01-7");
        assert_eq!(encode("0").unwrap(), "00-");
        assert_eq!(encode("000").unwrap(), "00-");
    }

    #[test]
    fn test_encode_letter_runs() {
        assert_eq!(encode("alpha").unwrap(), "$alpha");
        assert_eq!(encode("1.0a").unwrap(), "01-1.00-.$a");
        assert_eq!(encode("2.fc43").unwrap(), "01-2.$fc.02-43");
    }

    #[test]
    fn test_encode_drops_separators() {
        // Separators only delimit runs; their identity never matters
        assert_eq!(encode("1-2").unwrap(), encode("1.2").unwrap());
        assert_eq!(encode("1_2").unwrap(), encode("1.2").unwrap());
    }

    #[test]
    fn test_encode_empty_field_fails() {
        assert!(encode("").is_err());
    }

    #[test]
    fn test_encode_oversized_digit_run_fails() {
        let run = "1".repeat(100);
        assert!(encode(&run).is_err());
        // 99 digits is still fine
        assert!(encode(&"1".repeat(99)).is_ok());
    }

    #[test]
    fn test_numeric_segments_compare_numerically() {
        assert_eq!(compare("1.2", "1.10").unwrap(), Ordering::Less);
        assert_eq!(compare("3.9", "3.10").unwrap(), Ordering::Less);
        assert_eq!(compare("10", "9").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_letters_sort_older_than_digits() {
        // 1.a is older than 1.1 under RPM rules
        assert_eq!(compare("1.a", "1.1").unwrap(), Ordering::Less);
        assert_eq!(compare("1.beta", "1.0").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_more_segments_sort_newer() {
        assert_eq!(compare("1.0", "1.0.1").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_equal_fields_compare_equal() {
        assert_eq!(compare("1:2.3-4", "1:2.3-4").unwrap(), Ordering::Equal);
        // Leading zeros are insignificant
        assert_eq!(compare("1.02", "1.2").unwrap(), Ordering::Equal);
    }
}
