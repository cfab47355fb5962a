//! Use cases - User story orchestration.
//!
//! Each use case loads an aggregate, applies one validated domain mutation,
//! and writes it back with a version check.

pub mod progression;

pub use progression::ProgressionUseCases;
