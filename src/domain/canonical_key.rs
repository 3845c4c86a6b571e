//! # Canonical Well Keys
//!
//! Every persisted record is identified by its well registration number, a
//! string of the form `quadrant/blockToken-wellToken` (`"15/09a-A1"`,
//! `"15/12- 1"`). The same string is derivable from a target's six address
//! fields, which is what makes store-side and target-side identities
//! comparable. This module holds the key newtype and the rendering rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::well_code::WellCode;

/// The normalized join key between a candidate target and a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Wraps an already-rendered key string (e.g. a stored registration
    /// number, which the store holds in final form).
    #[must_use]
    pub fn new(rendered: impl Into<String>) -> Self {
        Self(rendered.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CanonicalKey {
    fn from(rendered: &str) -> Self {
        Self(rendered.to_string())
    }
}

/// The six positional fields a detail address carries, with absent optional
/// fields already mapped off the wire sentinel to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParts {
    pub quadrant: String,
    pub block_no: String,
    pub block_suffix: Option<String>,
    pub platform: Option<String>,
    pub drilling_seq: String,
    pub well_suffix: Option<String>,
}

impl KeyParts {
    /// Builds the fields for a fully specified well in a quadrant, the
    /// no-network path used by detail targets.
    #[must_use]
    pub fn from_well(quadrant: &str, code: &WellCode) -> Self {
        Self {
            quadrant: quadrant.to_string(),
            block_no: code.block_no.clone(),
            block_suffix: code.block_suffix.clone(),
            platform: code.platform.clone(),
            drilling_seq: code.drilling_seq.clone(),
            well_suffix: code.well_suffix.clone(),
        }
    }

    /// Renders the canonical key for these fields.
    ///
    /// Rules: a 1-character block number is zero-padded to two (longer values
    /// are used as-is) and the block suffix is appended when present; the
    /// well token is platform + drilling sequence with an absent platform
    /// rendered as a single space, and the well suffix is appended unless it
    /// is absent or the literal `R`.
    #[must_use]
    pub fn canonical_key(&self) -> CanonicalKey {
        let mut block_token = if self.block_no.len() == 1 {
            format!("0{}", self.block_no)
        } else {
            self.block_no.clone()
        };
        if let Some(suffix) = &self.block_suffix {
            block_token.push_str(suffix);
        }

        let mut well_token = match &self.platform {
            Some(platform) => format!("{}{}", platform, self.drilling_seq),
            None => format!(" {}", self.drilling_seq),
        };
        if let Some(suffix) = &self.well_suffix {
            if suffix != "R" {
                well_token.push_str(suffix);
            }
        }

        CanonicalKey(format!("{}/{}-{}", self.quadrant, block_token, well_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parts(
        quadrant: &str,
        block_no: &str,
        block_suffix: Option<&str>,
        platform: Option<&str>,
        drilling_seq: &str,
        well_suffix: Option<&str>,
    ) -> KeyParts {
        KeyParts {
            quadrant: quadrant.to_string(),
            block_no: block_no.to_string(),
            block_suffix: block_suffix.map(str::to_string),
            platform: platform.map(str::to_string),
            drilling_seq: drilling_seq.to_string(),
            well_suffix: well_suffix.map(str::to_string),
        }
    }

    #[test]
    fn single_digit_block_is_zero_padded() {
        let key = parts("15", "9", None, Some("A"), "1", None).canonical_key();
        assert_eq!(key.as_str(), "15/09-A1");
    }

    #[test]
    fn two_digit_block_is_kept() {
        let key = parts("15", "12", None, Some("A"), "1", None).canonical_key();
        assert_eq!(key.as_str(), "15/12-A1");
    }

    #[test]
    fn block_suffix_is_appended() {
        let key = parts("15", "9", Some("a"), Some("A"), "1", None).canonical_key();
        assert_eq!(key.as_str(), "15/09a-A1");
    }

    #[test]
    fn absent_platform_renders_as_space() {
        let key = parts("15", "12", None, None, "1", None).canonical_key();
        assert_eq!(key.as_str(), "15/12- 1");
    }

    #[test]
    fn well_suffix_is_appended() {
        let key = parts("15", "12", None, Some("B"), "7", Some("z")).canonical_key();
        assert_eq!(key.as_str(), "15/12-B7z");
    }

    #[test]
    fn respud_suffix_is_suppressed() {
        let with_r = parts("15", "12", None, Some("B"), "7", Some("R")).canonical_key();
        let without = parts("15", "12", None, Some("B"), "7", None).canonical_key();
        assert_eq!(with_r, without);
    }

    #[test]
    fn from_well_carries_every_field() {
        let code = crate::domain::well_code::WellCode::decompose("9a", "A21z").unwrap();
        let key = KeyParts::from_well("15", &code).canonical_key();
        assert_eq!(key.as_str(), "15/09a-A21z");
    }

    fn key_parts_strategy() -> impl Strategy<Value = KeyParts> {
        // Values stay in the portal's own alphabet: no leading zeros, and the
        // well suffix avoids `R`, which keys suppress.
        (
            1u32..=220,
            1u32..=99,
            proptest::option::of(proptest::char::range('a', 'z')),
            proptest::option::of(proptest::char::range('A', 'Z')),
            1u32..=999,
            proptest::option::of(proptest::char::range('S', 'Z')),
        )
            .prop_map(|(quadrant, block, block_suffix, platform, seq, well_suffix)| KeyParts {
                quadrant: quadrant.to_string(),
                block_no: block.to_string(),
                block_suffix: block_suffix.map(|c| c.to_string()),
                platform: platform.map(|c| c.to_string()),
                drilling_seq: seq.to_string(),
                well_suffix: well_suffix.map(|c| c.to_string()),
            })
    }

    proptest! {
        #[test]
        fn distinct_parts_render_distinct_keys(
            a in key_parts_strategy(),
            b in key_parts_strategy(),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(a.canonical_key(), b.canonical_key());
        }
    }
}
