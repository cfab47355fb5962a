//! Infrastructure: ports, storage adapters, clock and configuration.

pub mod clock;
pub mod config;
pub mod persistence;
pub mod ports;
