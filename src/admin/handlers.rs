use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::health::{HealthState, Readiness};
use crate::http::response::AboutResponse;
use crate::observability::metrics;

/// Name of the single readiness check.
pub const HTTP_CHECK: &str = "http";

/// Name and version of this build, plus the host name, resolved once at startup.
pub fn detect_about() -> AboutResponse {
    AboutResponse {
        name: "random".to_string(),
        version: option_env!("RANDOM_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        hostname: resolve_hostname(),
    }
}

fn resolve_hostname() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve hostname");
            "unknown".to_string()
        }
    }
}

/// State shared by admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub health: Arc<HealthState>,
    pub about: Arc<AboutResponse>,
    pub metrics: PrometheusHandle,
}

#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

pub async fn get_live() -> Json<StatusBody> {
    Json(StatusBody { status: "alive" })
}

pub async fn get_ready(
    State(state): State<AdminState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let readiness = state.health.readiness();
    metrics::record_check(HTTP_CHECK, readiness.is_ready());

    match readiness {
        Readiness::Ready => {
            if params.get("full").is_some_and(|v| v == "1") {
                let checks = HashMap::from([(HTTP_CHECK, "OK")]);
                (StatusCode::OK, Json(checks)).into_response()
            } else {
                (StatusCode::OK, Json(StatusBody { status: "running" })).into_response()
            }
        }
        Readiness::NotReady(message) => {
            tracing::debug!(check = HTTP_CHECK, %message, "Readiness check failing");
            let checks = HashMap::from([(HTTP_CHECK, message)]);
            (StatusCode::SERVICE_UNAVAILABLE, Json(checks)).into_response()
        }
    }
}

pub async fn get_about(State(state): State<AdminState>) -> AboutResponse {
    state.about.as_ref().clone()
}

pub async fn get_metrics(State(state): State<AdminState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
