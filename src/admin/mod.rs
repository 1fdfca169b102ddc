//! Admin listener: metrics, probes and build info.
//!
//! Served on its own port, started before the public listener and never
//! drained; it goes down with the process.

pub mod handlers;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use self::handlers::{detect_about, AdminState};
use self::handlers::*;

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/metrics", get(get_metrics))
        .route("/live", get(get_live))
        .route("/ready", get(get_ready))
        .route("/about", get(get_about))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the admin router in a background task.
pub fn spawn_admin_server(listener: TcpListener, state: AdminState) -> tokio::task::JoinHandle<()> {
    let router = setup_admin_router(state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Admin server failed");
        }
    })
}
