//! WONS Harvester - well record collection from the DECC WONS portal
//!
//! This crate harvests well registration records from the UK DECC Well
//! Operations Notification System and appends them to a local append-only
//! CSV store. One run covers either a quadrant/block listing sweep or a
//! single well lookup; records already stored are never fetched again.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod pipeline;
