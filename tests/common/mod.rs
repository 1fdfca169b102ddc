//! Shared utilities for integration and load testing.

use std::time::Duration;

use random_service::lifecycle::RunningService;
use random_service::{ServiceConfig, Supervisor};

/// Config binding both listeners to ephemeral loopback ports.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        bind_host: "127.0.0.1".into(),
        port: 0,
        admin_port: 0,
        graceful_shutdown_timeout: Duration::from_secs(5),
        ..ServiceConfig::default()
    }
}

/// Start the full service on ephemeral ports.
pub async fn start_service(config: ServiceConfig) -> RunningService {
    Supervisor::new(config)
        .start()
        .await
        .expect("service should start")
}

/// HTTP client without connection pooling so shutdown is not held open.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
