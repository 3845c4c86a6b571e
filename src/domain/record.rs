//! # Well Records
//!
//! A record is the fixed-shape row harvested from one well header page:
//! 30 ordered fields whose names and order match the store header exactly.
//! The first field is the well registration number, which doubles as the
//! canonical key on the stored side.

use serde::Serialize;
use thiserror::Error;

use crate::domain::canonical_key::CanonicalKey;

/// Number of fields in a record and columns in the store.
pub const FIELD_COUNT: usize = 30;

/// Store column names, in order.
///
/// Spellings are the portal's own, misspellings included; changing them
/// would orphan every existing store file.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "Well Registration No.",
    "Original Intent",
    "Country Code",
    "Onshore/Offshore",
    "Quadrant No.",
    "Block No.",
    "Block Suffix",
    "Platform",
    "Drilling Sequence No.",
    "Wellbore Type",
    "Primary Target",
    "Slot No.",
    "Spud Date",
    "Date TD Reached",
    "Completion Date",
    "Completion Status",
    "Total MD Driller (feet)",
    "Total MD Logger (feet)",
    "TVDSS Driller",
    "Datum Elevation (feet)",
    "Datum Type",
    "Water Depth (feet)",
    "Ground Elevation (feet)",
    "Deviated Well",
    "Top hole Latitude",
    "Top Hole Longtitude",
    "Geodetic Datum",
    "Coordinate System",
    "Bottom Hole Latitude",
    "Bottom Hole Longtitude",
];

/// A record was built with the wrong number of fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record has {found} fields, expected {FIELD_COUNT}")]
pub struct WrongFieldCount {
    pub found: usize,
}

/// One harvested well, as an ordered row of field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellRecord {
    values: Vec<String>,
}

impl WellRecord {
    /// Builds a record from exactly [`FIELD_COUNT`] ordered values.
    pub fn from_values(values: Vec<String>) -> Result<Self, WrongFieldCount> {
        if values.len() != FIELD_COUNT {
            return Err(WrongFieldCount {
                found: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// The well registration number (first field).
    #[must_use]
    pub fn registration_no(&self) -> &str {
        self.values.first().map_or("", String::as_str)
    }

    /// The stored-side canonical key for this record.
    #[must_use]
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::new(self.registration_no())
    }

    /// All field values in column order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_values() -> Vec<String> {
        let mut values = vec!["15/12- 1".to_string()];
        values.extend((1..FIELD_COUNT).map(|i| format!("field {i}")));
        values
    }

    #[test]
    fn header_names_match_field_count() {
        assert_eq!(FIELD_NAMES.len(), FIELD_COUNT);
    }

    #[test]
    fn builds_from_exactly_thirty_values() {
        let record = WellRecord::from_values(sample_values()).unwrap();
        assert_eq!(record.values().len(), FIELD_COUNT);
        assert_eq!(record.registration_no(), "15/12- 1");
        assert_eq!(record.key().as_str(), "15/12- 1");
    }

    #[test]
    fn rejects_short_rows() {
        let err = WellRecord::from_values(vec!["only".to_string()]).unwrap_err();
        assert_eq!(err.found, 1);
    }

    #[test]
    fn rejects_long_rows() {
        let mut values = sample_values();
        values.push("extra".to_string());
        assert_eq!(WellRecord::from_values(values).unwrap_err().found, 31);
    }
}
