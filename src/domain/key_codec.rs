//! # Detail Address Decoding
//!
//! Child links discovered on a listing page embed the six well fields as
//! query parameter assignments in a fixed order: quadrant, block number,
//! block suffix, platform, drilling sequence, well suffix. The decoder reads
//! them positionally (parameter names are not consulted; the portal's order
//! and shape are the contract) and maps the wire sentinel to absent fields.
//! Any structural deviation is a typed error so one bad link never takes
//! down a batch.

use thiserror::Error;

use crate::domain::canonical_key::{CanonicalKey, KeyParts};
use crate::domain::well_code::SENTINEL;

/// Number of `=` assignments a detail address must carry.
pub const DETAIL_FIELD_COUNT: usize = 6;

/// Errors produced while decoding a detail address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTargetError {
    /// The address did not carry exactly six parameter assignments.
    #[error("address `{address}` has {found} parameter assignments, expected {DETAIL_FIELD_COUNT}")]
    WrongAssignmentCount { address: String, found: usize },

    /// An assignment had no value between its `=` and the next `&`.
    #[error("address `{address}` has an empty value in assignment {index}")]
    EmptyValue { address: String, index: usize },
}

/// Decodes a detail address into its six positional fields.
///
/// Each value is the run of characters after an `=` up to the next `&` or
/// the end of the string. Works on both absolute and server-relative
/// addresses; anything before the first `=` is ignored.
pub fn decode_detail_address(address: &str) -> Result<KeyParts, MalformedTargetError> {
    let mut values: Vec<&str> = Vec::with_capacity(DETAIL_FIELD_COUNT);
    let mut rest = address;
    while let Some(eq) = rest.find('=') {
        let after = &rest[eq + 1..];
        match after.find('&') {
            Some(amp) => {
                values.push(&after[..amp]);
                rest = &after[amp + 1..];
            }
            None => {
                values.push(after);
                rest = "";
            }
        }
    }

    if values.len() != DETAIL_FIELD_COUNT {
        return Err(MalformedTargetError::WrongAssignmentCount {
            address: address.to_string(),
            found: values.len(),
        });
    }
    if let Some(index) = values.iter().position(|v| v.is_empty()) {
        return Err(MalformedTargetError::EmptyValue {
            address: address.to_string(),
            index,
        });
    }

    Ok(KeyParts {
        quadrant: values[0].to_string(),
        block_no: values[1].to_string(),
        block_suffix: optional_field(values[2]),
        platform: optional_field(values[3]),
        drilling_seq: values[4].to_string(),
        well_suffix: optional_field(values[5]),
    })
}

/// Decodes a discovered child link straight to its canonical key.
pub fn link_key(address: &str) -> Result<CanonicalKey, MalformedTargetError> {
    Ok(decode_detail_address(address)?.canonical_key())
}

fn optional_field(value: &str) -> Option<String> {
    (value != SENTINEL).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "/pls/wons/wdep0100.wellHeaderData?p_quadNo=15&p_blockNo=9\
                        &p_block_suffix=a&p_platform=B&p_drilling_seq_no=21&p_well_suffix=z";

    #[test]
    fn decodes_all_six_fields() {
        let parts = decode_detail_address(LINK).unwrap();
        assert_eq!(parts.quadrant, "15");
        assert_eq!(parts.block_no, "9");
        assert_eq!(parts.block_suffix.as_deref(), Some("a"));
        assert_eq!(parts.platform.as_deref(), Some("B"));
        assert_eq!(parts.drilling_seq, "21");
        assert_eq!(parts.well_suffix.as_deref(), Some("z"));
        assert_eq!(parts.canonical_key().as_str(), "15/09a-B21z");
    }

    #[test]
    fn sentinel_values_map_to_absent() {
        let address = "https://itportal.decc.gov.uk/pls/wons/wdep0100.wellHeaderData\
                       ?p_quadNo=15&p_blockNo=12&p_block_suffix=+&p_platform=+\
                       &p_drilling_seq_no=1&p_well_suffix=+";
        let parts = decode_detail_address(address).unwrap();
        assert_eq!(parts.block_suffix, None);
        assert_eq!(parts.platform, None);
        assert_eq!(parts.well_suffix, None);
        assert_eq!(parts.canonical_key().as_str(), "15/12- 1");
    }

    #[test]
    fn respud_links_key_like_the_original_well() {
        let address = "?p_quadNo=15&p_blockNo=9&p_block_suffix=a&p_platform=+\
                       &p_drilling_seq_no=1&p_well_suffix=R";
        assert_eq!(link_key(address).unwrap().as_str(), "15/09a- 1");
    }

    #[test]
    fn too_few_assignments_are_rejected() {
        let err = decode_detail_address("?p_quadNo=15&p_blockNo=9").unwrap_err();
        assert!(matches!(
            err,
            MalformedTargetError::WrongAssignmentCount { found: 2, .. }
        ));
    }

    #[test]
    fn extra_assignments_are_rejected() {
        let address = format!("{LINK}&p_extra=1");
        assert!(matches!(
            decode_detail_address(&address).unwrap_err(),
            MalformedTargetError::WrongAssignmentCount { found: 7, .. }
        ));
    }

    #[test]
    fn plain_links_are_rejected() {
        let err = link_key("/pls/wons/help.html").unwrap_err();
        assert!(matches!(
            err,
            MalformedTargetError::WrongAssignmentCount { found: 0, .. }
        ));
    }

    #[test]
    fn empty_values_are_rejected() {
        let address = "?p_quadNo=&p_blockNo=9&p_block_suffix=a&p_platform=B\
                       &p_drilling_seq_no=21&p_well_suffix=z";
        assert!(matches!(
            decode_detail_address(address).unwrap_err(),
            MalformedTargetError::EmptyValue { index: 0, .. }
        ));
    }
}
