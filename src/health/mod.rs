//! Health subsystem.
//!
//! # Data Flow
//! ```text
//! Supervisor (sole writer):
//!     public listener serving → mark_running
//!     shutdown signal         → mark_shutting_down
//!
//! Admin readiness probe (reader):
//!     state.rs → Readiness::Ready | Readiness::NotReady(message)
//! ```
//!
//! # Design Decisions
//! - Liveness is process-level and never consults this state
//! - The cell is passed by `Arc` to writer and reader, never global

pub mod state;

pub use state::{HealthState, Readiness, ServerStatus};
