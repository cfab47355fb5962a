//! Progression storage adapters.
//!
//! - [`InMemoryProgressionRepo`]: dashmap-backed, for tests and embedding
//! - [`SqliteProgressionRepo`]: durable store used by the binary

mod memory;
mod sqlite;

pub use memory::InMemoryProgressionRepo;
pub use sqlite::SqliteProgressionRepo;
