//! Randomness subsystem.
//!
//! # Responsibilities
//! - Provide uniformly distributed integers over a half-open range
//! - Hide whether values come from a thread-local or a seeded generator
//!
//! # Design Decisions
//! - Non-cryptographic generators only
//! - Concurrency safety is the source's job, never the caller's
//! - `min == max` yields `min` instead of failing

pub mod source;

pub use source::{RandomSource, SeededRandomSource, ThreadRandomSource};
