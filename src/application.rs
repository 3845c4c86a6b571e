//! Application layer - run requests wired to the pipeline
//!
//! This module contains the use cases that coordinate a harvest run and the
//! event emission that lets a front end watch one.

pub mod events;
pub mod use_cases;

// Re-export commonly used items
pub use events::EventEmitter;
pub use use_cases::HarvestUseCases;
