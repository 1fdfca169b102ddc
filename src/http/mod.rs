//! Public HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! GET /random?min=..&max=..&num=..
//!     → server.rs (Axum router, handler)
//!     → request.rs (decode, apply defaults, validate)
//!     → random::RandomSource (draw count values)
//!     → response.rs (JSON body, status code)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RandomRequest, ValidationError};
pub use response::{AboutResponse, ErrorResponse, NumberResponse};
pub use server::HttpServer;
