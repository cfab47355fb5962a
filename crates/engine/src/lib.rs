//! Shardforge Engine library.
//!
//! Async orchestration around the pure domain crate.
//!
//! ## Structure
//!
//! - `use_cases/` - The caller-facing progression API
//! - `infrastructure/` - Ports, storage adapters, clock and configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
