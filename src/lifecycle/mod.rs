//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (supervisor.rs):
//!     Bind admin → serve admin → bind public → serve public → Running
//!
//! Shutdown (supervisor.rs + shutdown.rs):
//!     Signal received → ShuttingDown → stop accepting → drain (bounded) → exit
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then admin, then public listener
//! - Ordered shutdown: readiness fails before draining starts
//! - Shutdown has timeout: exceeding it is a fatal error

pub mod shutdown;
pub mod signals;
pub mod supervisor;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
pub use supervisor::{RunningService, Supervisor, SupervisorError};
