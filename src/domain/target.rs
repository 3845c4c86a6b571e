//! # Harvest Targets
//!
//! A target is one addressable portal resource: either a quadrant/block
//! listing page whose anchors point at many wells, or the header page of one
//! fully specified well. Address rendering lives with the site constants in
//! [`crate::infrastructure::config`]; the types here are pure values.

use serde::{Deserialize, Serialize};

use crate::domain::canonical_key::{CanonicalKey, KeyParts};
use crate::domain::range::CoordinateRange;
use crate::domain::well_code::WellCode;

/// An addressable remote resource for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarvestTarget {
    /// A listing over quadrant and block ranges; fetching it yields child
    /// detail links.
    Listing {
        quadrants: CoordinateRange,
        blocks: CoordinateRange,
    },

    /// One well, identified without fetching.
    WellDetail { quadrant: String, code: WellCode },
}

impl HarvestTarget {
    /// Short name for logs and events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Listing { .. } => "listing",
            Self::WellDetail { .. } => "well_detail",
        }
    }

    /// The canonical key of a detail target. Listing targets have no key of
    /// their own; their children are keyed after discovery.
    #[must_use]
    pub fn detail_key(&self) -> Option<CanonicalKey> {
        match self {
            Self::Listing { .. } => None,
            Self::WellDetail { quadrant, code } => {
                Some(KeyParts::from_well(quadrant, code).canonical_key())
            }
        }
    }
}
