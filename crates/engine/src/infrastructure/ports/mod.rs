//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Progression storage (could swap SQLite -> Postgres)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::ProgressionRepo;
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockProgressionRepo;

#[cfg(test)]
pub use testing::MockClockPort;
