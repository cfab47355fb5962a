//! Domain events
//!
//! Return types from progression mutations, communicating what happened when
//! state was modified so callers can log or render it.

pub mod progression_events;

pub use progression_events::*;
