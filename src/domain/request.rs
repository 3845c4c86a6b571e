//! # Run Requests
//!
//! The front end hands the pipeline an explicit [`RunRequest`] value holding
//! the three raw specification strings. Routing between the listing and
//! detail paths happens here, before any network work: an empty well spec
//! selects the listing path, a non-empty one the detail path, and an empty
//! quadrant or block spec issues no request at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::range::{CoordinateRange, InvalidRangeError};
use crate::domain::target::HarvestTarget;
use crate::domain::well_code::{InvalidWellSpecError, WellCode};

/// The three raw specification strings of one harvest request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub quadrant: String,
    pub block: String,
    pub well: String,
}

impl RunRequest {
    #[must_use]
    pub fn new(
        quadrant: impl Into<String>,
        block: impl Into<String>,
        well: impl Into<String>,
    ) -> Self {
        Self {
            quadrant: quadrant.into(),
            block: block.into(),
            well: well.into(),
        }
    }
}

/// Errors raised while routing a request, before any fetch is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Range(#[from] InvalidRangeError),

    #[error(transparent)]
    WellSpec(#[from] InvalidWellSpecError),

    /// The detail path addresses one well in one quadrant; ranges make no
    /// sense there.
    #[error("well lookups take a single quadrant, got `{spec}`")]
    QuadrantNotSingle { spec: String },
}

impl RunRequest {
    /// Routes this request to its target, or `None` when the request is
    /// empty and nothing should be issued.
    pub fn plan(&self) -> Result<Option<HarvestTarget>, PlanError> {
        let quadrant_spec = self.quadrant.trim();
        let block_spec = self.block.trim();
        let well_spec = self.well.trim();

        if quadrant_spec.is_empty() || block_spec.is_empty() {
            return Ok(None);
        }

        if well_spec.is_empty() {
            let quadrants = CoordinateRange::parse(quadrant_spec)?;
            let blocks = CoordinateRange::parse(block_spec)?;
            return Ok(Some(HarvestTarget::Listing { quadrants, blocks }));
        }

        let quadrant_range = CoordinateRange::parse(quadrant_spec)?;
        let Some(quadrant) = quadrant_range.single_value() else {
            return Err(PlanError::QuadrantNotSingle {
                spec: quadrant_spec.to_string(),
            });
        };
        let code = WellCode::decompose(block_spec, well_spec)?;
        Ok(Some(HarvestTarget::WellDetail {
            quadrant: quadrant.to_string(),
            code,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_well_routes_to_listing() {
        let target = RunRequest::new("15", "1-2", "").plan().unwrap().unwrap();
        assert!(matches!(target, HarvestTarget::Listing { .. }));
    }

    #[test]
    fn non_empty_well_routes_to_detail() {
        let target = RunRequest::new("15", "9a", "A1").plan().unwrap().unwrap();
        match target {
            HarvestTarget::WellDetail { quadrant, code } => {
                assert_eq!(quadrant, "15");
                assert_eq!(code.block_no, "9");
                assert_eq!(code.platform.as_deref(), Some("A"));
            }
            other => panic!("expected detail target, got {other:?}"),
        }
    }

    #[test]
    fn empty_quadrant_issues_nothing() {
        assert_eq!(RunRequest::new("", "1-30", "").plan().unwrap(), None);
        assert_eq!(RunRequest::new("  ", "1-30", "").plan().unwrap(), None);
    }

    #[test]
    fn empty_block_issues_nothing() {
        assert_eq!(RunRequest::new("1", "", "").plan().unwrap(), None);
    }

    #[test]
    fn bad_range_fails_before_dispatch() {
        assert!(matches!(
            RunRequest::new("1-2-3", "1", "").plan().unwrap_err(),
            PlanError::Range(_)
        ));
        assert!(matches!(
            RunRequest::new("1", "5-2", "").plan().unwrap_err(),
            PlanError::Range(_)
        ));
    }

    #[test]
    fn bad_well_spec_fails_before_dispatch() {
        assert!(matches!(
            RunRequest::new("1", "9", "A1B2").plan().unwrap_err(),
            PlanError::WellSpec(_)
        ));
        // a range string is not a block spec on the detail path
        assert!(matches!(
            RunRequest::new("1", "1-30", "A1").plan().unwrap_err(),
            PlanError::WellSpec(_)
        ));
    }

    #[test]
    fn detail_path_rejects_quadrant_ranges() {
        let err = RunRequest::new("1-3", "9", "A1").plan().unwrap_err();
        assert!(matches!(err, PlanError::QuadrantNotSingle { .. }));
        // a one-element span is still a span
        let err = RunRequest::new("1-1", "9", "A1").plan().unwrap_err();
        assert!(matches!(err, PlanError::QuadrantNotSingle { .. }));
    }
}
