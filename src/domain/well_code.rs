//! # Well Specification Decomposition
//!
//! A single well is specified by two compound strings: a block spec such as
//! `"10"` or `"10a"` (number plus optional suffix letter) and a well spec
//! such as `"A21"`, `"A21z"`, `"21"` or `"21z"` (optional platform letter,
//! drilling sequence number, optional suffix letter). This module splits
//! those into their [`WellCode`] parts by scanning maximal digit and
//! non-digit runs, the same token shapes the portal itself uses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire sentinel marking an absent optional sub-field in detail addresses.
///
/// The portal renders a missing platform or suffix as a literal `+` in query
/// parameters. Inside this crate absent fields are `None`; the sentinel
/// appears only when building or decoding addresses.
pub const SENTINEL: &str = "+";

static TOKEN_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+|[^0-9]+").expect("token-run pattern is valid"));

/// Errors produced while decomposing a well specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidWellSpecError {
    /// The block spec did not split into a number with optional suffix.
    #[error("block spec `{spec}` does not split into a block number with optional suffix")]
    BlockShape { spec: String },

    /// The well spec did not split into platform/sequence/suffix.
    #[error("well spec `{spec}` does not split into platform, sequence and suffix")]
    WellShape { spec: String },
}

/// The decomposed identity of one well.
///
/// `drilling_seq` and `block_no` are always present; platform and the two
/// suffixes are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellCode {
    pub platform: Option<String>,
    pub drilling_seq: String,
    pub well_suffix: Option<String>,
    pub block_no: String,
    pub block_suffix: Option<String>,
}

impl WellCode {
    /// Decomposes a block spec and a well spec into a [`WellCode`].
    ///
    /// Block spec: one token is the block number alone, two tokens are the
    /// number plus its suffix. Well spec: an uppercase-letter-led token list
    /// is platform/sequence(/suffix); a digit-led list is sequence(/suffix)
    /// with no platform. Any other token shape is rejected.
    pub fn decompose(block_spec: &str, well_spec: &str) -> Result<Self, InvalidWellSpecError> {
        let block_tokens = token_runs(block_spec);
        let (block_no, block_suffix) = match block_tokens.as_slice() {
            [number] => ((*number).to_string(), None),
            [number, suffix] => ((*number).to_string(), Some((*suffix).to_string())),
            _ => {
                return Err(InvalidWellSpecError::BlockShape {
                    spec: block_spec.to_string(),
                });
            }
        };

        let well_tokens = token_runs(well_spec);
        let letter_led = well_tokens
            .first()
            .is_some_and(|t| t.chars().all(|c| c.is_ascii_uppercase()));

        let (platform, drilling_seq, well_suffix) = if letter_led {
            match well_tokens.as_slice() {
                [platform, seq, suffix] => (
                    Some((*platform).to_string()),
                    (*seq).to_string(),
                    Some((*suffix).to_string()),
                ),
                [platform, seq] => (Some((*platform).to_string()), (*seq).to_string(), None),
                _ => {
                    return Err(InvalidWellSpecError::WellShape {
                        spec: well_spec.to_string(),
                    });
                }
            }
        } else {
            match well_tokens.as_slice() {
                [seq, suffix] => (None, (*seq).to_string(), Some((*suffix).to_string())),
                [seq] => (None, (*seq).to_string(), None),
                _ => {
                    return Err(InvalidWellSpecError::WellShape {
                        spec: well_spec.to_string(),
                    });
                }
            }
        };

        Ok(Self {
            platform,
            drilling_seq,
            well_suffix,
            block_no,
            block_suffix,
        })
    }

    /// Re-encodes the block half of the specification.
    #[must_use]
    pub fn block_spec(&self) -> String {
        match &self.block_suffix {
            Some(suffix) => format!("{}{}", self.block_no, suffix),
            None => self.block_no.clone(),
        }
    }

    /// Re-encodes the well half of the specification.
    #[must_use]
    pub fn well_spec(&self) -> String {
        let mut spec = String::new();
        if let Some(platform) = &self.platform {
            spec.push_str(platform);
        }
        spec.push_str(&self.drilling_seq);
        if let Some(suffix) = &self.well_suffix {
            spec.push_str(suffix);
        }
        spec
    }
}

/// Splits a string into maximal runs of digits and non-digits.
fn token_runs(spec: &str) -> Vec<&str> {
    TOKEN_RUNS.find_iter(spec).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_number_alone() {
        let code = WellCode::decompose("12", "1").unwrap();
        assert_eq!(code.block_no, "12");
        assert_eq!(code.block_suffix, None);
    }

    #[test]
    fn block_number_with_suffix() {
        let code = WellCode::decompose("10a", "1").unwrap();
        assert_eq!(code.block_no, "10");
        assert_eq!(code.block_suffix.as_deref(), Some("a"));
    }

    #[test]
    fn platform_led_with_suffix() {
        let code = WellCode::decompose("1", "A21z").unwrap();
        assert_eq!(code.platform.as_deref(), Some("A"));
        assert_eq!(code.drilling_seq, "21");
        assert_eq!(code.well_suffix.as_deref(), Some("z"));
    }

    #[test]
    fn platform_led_without_suffix() {
        let code = WellCode::decompose("1", "A21").unwrap();
        assert_eq!(code.platform.as_deref(), Some("A"));
        assert_eq!(code.drilling_seq, "21");
        assert_eq!(code.well_suffix, None);
    }

    #[test]
    fn digit_led_with_suffix() {
        let code = WellCode::decompose("1", "21z").unwrap();
        assert_eq!(code.platform, None);
        assert_eq!(code.drilling_seq, "21");
        assert_eq!(code.well_suffix.as_deref(), Some("z"));
    }

    #[test]
    fn digit_led_without_suffix() {
        let code = WellCode::decompose("1", "21").unwrap();
        assert_eq!(code.platform, None);
        assert_eq!(code.drilling_seq, "21");
        assert_eq!(code.well_suffix, None);
    }

    #[test]
    fn decompose_round_trips_through_encoding() {
        let cases = [
            ("10", "A21z"),
            ("10a", "A21"),
            ("9", "21z"),
            ("9b", "21"),
        ];
        for (block_spec, well_spec) in cases {
            let code = WellCode::decompose(block_spec, well_spec).unwrap();
            assert_eq!(code.block_spec(), block_spec);
            assert_eq!(code.well_spec(), well_spec);
            let again = WellCode::decompose(&code.block_spec(), &code.well_spec()).unwrap();
            assert_eq!(again, code);
        }
    }

    #[test]
    fn empty_specs_are_rejected() {
        assert!(matches!(
            WellCode::decompose("", "1").unwrap_err(),
            InvalidWellSpecError::BlockShape { .. }
        ));
        assert!(matches!(
            WellCode::decompose("1", "").unwrap_err(),
            InvalidWellSpecError::WellShape { .. }
        ));
    }

    #[test]
    fn overlong_token_shapes_are_rejected() {
        // a range string is not a block spec
        assert!(matches!(
            WellCode::decompose("1-30", "1").unwrap_err(),
            InvalidWellSpecError::BlockShape { .. }
        ));
        assert!(matches!(
            WellCode::decompose("1", "A1B2").unwrap_err(),
            InvalidWellSpecError::WellShape { .. }
        ));
    }

    #[test]
    fn platform_alone_is_rejected() {
        assert!(matches!(
            WellCode::decompose("1", "A").unwrap_err(),
            InvalidWellSpecError::WellShape { .. }
        ));
    }
}
