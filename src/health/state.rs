//! Server lifecycle state machine.
//!
//! # States
//! - Starting: public listener not yet accepting
//! - Running: public listener accepting, instance ready for traffic
//! - ShuttingDown: shutdown signal received, drain in progress
//!
//! # State Transitions
//! ```text
//! Starting → Running: public listener bound and serving
//! Starting | Running → ShuttingDown: shutdown signal received (terminal)
//! ```
//!
//! # Design Decisions
//! - Single writer (the supervisor), any number of readers
//! - State stored in one atomic byte; readers see the pre- or
//!   post-transition value, never anything in between
//! - ShuttingDown is terminal

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle status of the public listener.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Starting = 0,
    Running = 1,
    ShuttingDown = 2,
}

impl From<u8> for ServerStatus {
    fn from(val: u8) -> Self {
        match val {
            1 => ServerStatus::Running,
            2 => ServerStatus::ShuttingDown,
            _ => ServerStatus::Starting,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerStatus::Starting => "starting",
            ServerStatus::Running => "running",
            ServerStatus::ShuttingDown => "shutting down",
        };
        f.write_str(name)
    }
}

/// Outcome of a readiness evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Shared lifecycle cell consulted by the readiness probe.
#[derive(Debug)]
pub struct HealthState {
    status: AtomicU8,
}

impl HealthState {
    /// Create a new cell in the `Starting` state.
    pub fn new() -> Self {
        Self {
            status: AtomicU8::new(ServerStatus::Starting as u8),
        }
    }

    /// Current status.
    pub fn status(&self) -> ServerStatus {
        ServerStatus::from(self.status.load(Ordering::Acquire))
    }

    /// Move `Starting → Running`. Returns false if the cell has already
    /// left `Starting`.
    pub fn mark_running(&self) -> bool {
        let changed = self
            .status
            .compare_exchange(
                ServerStatus::Starting as u8,
                ServerStatus::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if changed {
            tracing::info!(status = %ServerStatus::Running, "Server status changed");
        } else {
            tracing::warn!(status = %self.status(), "Ignoring transition to running");
        }
        changed
    }

    /// Move to the terminal `ShuttingDown` state. Returns the previous status.
    pub fn mark_shutting_down(&self) -> ServerStatus {
        let previous =
            ServerStatus::from(self.status.swap(ServerStatus::ShuttingDown as u8, Ordering::AcqRel));
        if previous != ServerStatus::ShuttingDown {
            tracing::info!(
                previous = %previous,
                status = %ServerStatus::ShuttingDown,
                "Server status changed"
            );
        }
        previous
    }

    /// Readiness: ready iff the status is `Running`.
    pub fn readiness(&self) -> Readiness {
        match self.status() {
            ServerStatus::Running => Readiness::Ready,
            other => Readiness::NotReady(format!("HTTP server is {}", other)),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
