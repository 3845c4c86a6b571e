//! Domain module - the well registry's value types and rules
//!
//! Everything here is pure: coordinate ranges, well codes, canonical keys,
//! the address decoder, records, targets and run requests. No I/O, no
//! network, no clocks beyond event timestamps.

pub mod canonical_key;
pub mod events;
pub mod key_codec;
pub mod range;
pub mod record;
pub mod request;
pub mod target;
pub mod well_code;

// Re-export commonly used items for convenience
pub use canonical_key::{CanonicalKey, KeyParts};
pub use events::{HarvestEvent, RunId, RunOutcome, RunSummary};
pub use key_codec::{MalformedTargetError, decode_detail_address, link_key};
pub use range::{CoordinateRange, InvalidRangeError};
pub use record::{FIELD_COUNT, FIELD_NAMES, WellRecord};
pub use request::{PlanError, RunRequest};
pub use target::HarvestTarget;
pub use well_code::{InvalidWellSpecError, SENTINEL, WellCode};
