//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome types from mutations
//!
//! # Rustic DDD Principles
//!
//! | Java DDD Pattern | Rustic Equivalent |
//! |------------------|-------------------|
//! | Private fields + getters | Private fields, `pub(crate)` ledger mutators |
//! | Aggregate root guards | `&mut self` methods that validate before commit |
//! | Unit of work / rollback | Mutate a clone, swap in on success |
//! | Domain Events | Return outcome structs from mutations |

pub mod progression;

pub use progression::{
    CharacterProgression, InvariantViolation, ProgressionError, ProgressionLedger, TalentGrant,
};
