//! # Coordinate Range Expansion
//!
//! Quadrant and block positions on the WONS portal are requested as either a
//! bare value (`"7"`) or an inclusive span (`"1-30"`). This module parses
//! those specifications into [`CoordinateRange`] values and expands them into
//! the literal strings that get embedded in portal addresses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a coordinate range specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    /// The specification was empty or whitespace.
    #[error("coordinate range is empty")]
    Empty,

    /// More than one `-` separator appeared.
    #[error("coordinate range `{spec}` has more than one `-` separator")]
    TooManySeparators { spec: String },

    /// A bound (or a bare value) was not a decimal number.
    #[error("coordinate `{value}` in `{spec}` is not a number")]
    NonNumeric { spec: String, value: String },

    /// The span ran high-to-low.
    #[error("coordinate range `{spec}` is descending ({lo} > {hi})")]
    Descending { spec: String, lo: u32, hi: u32 },
}

/// A parsed coordinate specification.
///
/// Bare values keep their literal string form so that leading zeros survive
/// into the addresses built from them; spans expand to plain decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateRange {
    /// A single explicit value, e.g. `"7"` or `"07"`.
    Single(String),
    /// An inclusive `lo-hi` interval.
    Span { lo: u32, hi: u32 },
}

impl CoordinateRange {
    /// Parses a coordinate specification string.
    pub fn parse(spec: &str) -> Result<Self, InvalidRangeError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(InvalidRangeError::Empty);
        }

        let parts: Vec<&str> = trimmed.split('-').collect();
        match parts.as_slice() {
            [value] => {
                parse_bound(trimmed, value)?;
                Ok(Self::Single((*value).to_string()))
            }
            [lo, hi] => {
                let lo = parse_bound(trimmed, lo)?;
                let hi = parse_bound(trimmed, hi)?;
                if lo > hi {
                    return Err(InvalidRangeError::Descending {
                        spec: trimmed.to_string(),
                        lo,
                        hi,
                    });
                }
                Ok(Self::Span { lo, hi })
            }
            _ => Err(InvalidRangeError::TooManySeparators {
                spec: trimmed.to_string(),
            }),
        }
    }

    /// Expands to the ordered list of literal value strings.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value.clone()],
            Self::Span { lo, hi } => (*lo..=*hi).map(|v| v.to_string()).collect(),
        }
    }

    /// Number of values this range expands to.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Span { lo, hi } => (*hi - *lo + 1) as usize,
        }
    }

    /// A range always expands to at least one value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the literal value when this is a bare (non-span) coordinate.
    #[must_use]
    pub fn single_value(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Span { .. } => None,
        }
    }
}

fn parse_bound(spec: &str, value: &str) -> Result<u32, InvalidRangeError> {
    value
        .parse::<u32>()
        .map_err(|_| InvalidRangeError::NonNumeric {
            spec: spec.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_value_stays_literal() {
        let range = CoordinateRange::parse("07").unwrap();
        assert_eq!(range, CoordinateRange::Single("07".to_string()));
        assert_eq!(range.values(), vec!["07".to_string()]);
        assert_eq!(range.single_value(), Some("07"));
    }

    #[test]
    fn span_expands_inclusive() {
        let range = CoordinateRange::parse("1-30").unwrap();
        let values = range.values();
        assert_eq!(values.len(), 30);
        assert_eq!(values.first().map(String::as_str), Some("1"));
        assert_eq!(values.last().map(String::as_str), Some("30"));
        assert_eq!(range.len(), 30);
        assert_eq!(range.single_value(), None);
    }

    #[test]
    fn single_element_span() {
        let range = CoordinateRange::parse("9-9").unwrap();
        assert_eq!(range.values(), vec!["9".to_string()]);
    }

    #[test]
    fn descending_span_is_rejected() {
        let err = CoordinateRange::parse("5-2").unwrap_err();
        assert!(matches!(
            err,
            InvalidRangeError::Descending { lo: 5, hi: 2, .. }
        ));
    }

    #[test]
    fn extra_separator_is_rejected() {
        let err = CoordinateRange::parse("1-2-3").unwrap_err();
        assert!(matches!(err, InvalidRangeError::TooManySeparators { .. }));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert!(matches!(
            CoordinateRange::parse("abc").unwrap_err(),
            InvalidRangeError::NonNumeric { .. }
        ));
        assert!(matches!(
            CoordinateRange::parse("1-x").unwrap_err(),
            InvalidRangeError::NonNumeric { .. }
        ));
    }

    #[test]
    fn empty_spec_is_rejected() {
        assert_eq!(
            CoordinateRange::parse("  ").unwrap_err(),
            InvalidRangeError::Empty
        );
    }
}
