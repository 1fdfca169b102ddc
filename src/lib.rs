//! Random number service library.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────── random-service ─────────────────────────────┐
//!   │                                                                          │
//!   │  admin listener (started first)        public listener                   │
//!   │  ┌───────────────────────────┐         ┌──────────────────────────────┐ │
//!   │  │ /metrics /live /ready     │         │ GET /random                  │ │
//!   │  │ /about                    │         │  request → source → response │ │
//!   │  └─────────────┬─────────────┘         └───────────────┬──────────────┘ │
//!   │                │ reads                                  │ serves        │
//!   │                ▼                                        │               │
//!   │          ┌─────────────┐   writes   ┌──────────────────┴───────────┐   │
//!   │          │ HealthState │◀───────────│ Supervisor (signal, drain)   │   │
//!   │          └─────────────┘            └──────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod random;

// Operational surface
pub mod admin;
pub mod health;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Supervisor};
