//! Public HTTP server.
//!
//! # Responsibilities
//! - Create the Axum Router for the randomness endpoint
//! - Validate parameters, draw values, render the response
//! - Record per-request metrics
//! - Serve until the shutdown broadcast fires, then drain

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::request::RandomRequest;
use crate::http::response::NumberResponse;
use crate::observability::metrics;
use crate::random::RandomSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RandomSource>,
}

/// HTTP server hosting the randomness endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new server drawing values from `source`.
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        let router = Self::build_router(AppState { source });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/random", get(random_handler))
            .route("/", get(random_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves, then drain in-flight
    /// requests. New connections are refused once draining starts.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Randomness handler: validate, draw `count` values in order, render.
pub async fn random_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let start_time = Instant::now();

    let response = match RandomRequest::from_query(query.as_deref()) {
        Ok(request) => {
            let values = draw(state.source.as_ref(), &request);
            tracing::debug!(
                min = request.min,
                max = request.max,
                count = request.count,
                "Generated values"
            );
            NumberResponse { values }.into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected request");
            e.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

/// Draw `request.count` independent values over `[min, max)`.
pub fn draw(source: &dyn RandomSource, request: &RandomRequest) -> Vec<i64> {
    (0..request.count)
        .map(|_| source.next(request.min, request.max))
        .collect()
}
