//! Network layer.
//!
//! # Data Flow
//! ```text
//! ServiceConfig (bind_host, port / admin_port)
//!     → listener.rs (bind, report local address)
//!     → axum::serve (admin and public servers)
//! ```
//!
//! # Design Decisions
//! - Bind failures are fatal; there is no retry loop

pub mod listener;

pub use listener::{Listener, ListenerError};
