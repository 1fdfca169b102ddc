//! Startup and shutdown orchestration.
//!
//! # Responsibilities
//! - Start the admin listener, then the public listener
//! - Flip the health state to running once the public listener serves
//! - On the shutdown signal, fail readiness first, then drain the public
//!   listener within the configured timeout
//!
//! # Design Decisions
//! - Fail fast: any bind error is fatal, nothing is retried
//! - Subsystems start in order, not concurrently
//! - Only the public listener is drained; the admin listener stops with
//!   the process
//! - A drain that outlives its timeout is fatal

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::admin::{detect_about, spawn_admin_server, AdminState};
use crate::config::ServiceConfig;
use crate::health::HealthState;
use crate::http::{AboutResponse, HttpServer};
use crate::lifecycle::Shutdown;
use crate::net::{Listener, ListenerError};
use crate::observability::metrics::init_metrics;
use crate::random::source::from_seed;
use crate::random::RandomSource;

/// Fatal process-level errors.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Bind(#[from] ListenerError),

    #[error("public server failed: {0}")]
    Serve(#[source] std::io::Error),

    #[error("graceful shutdown did not complete within {}", format_timeout(.0))]
    ShutdownTimeout(Duration),
}

fn format_timeout(timeout: &Duration) -> String {
    humantime::format_duration(*timeout).to_string()
}

/// Orchestrates listener startup order and graceful shutdown.
pub struct Supervisor {
    config: ServiceConfig,
    source: Arc<dyn RandomSource>,
    about: AboutResponse,
}

impl Supervisor {
    pub fn new(config: ServiceConfig) -> Self {
        let source = from_seed(config.random_seed);
        Self {
            config,
            source,
            about: detect_about(),
        }
    }

    /// Replace the random source.
    pub fn with_source(mut self, source: Arc<dyn RandomSource>) -> Self {
        self.source = source;
        self
    }

    /// Bind and serve both listeners. Returns once the public listener is
    /// serving and the health state reads `Running`.
    pub async fn start(self) -> Result<RunningService, SupervisorError> {
        let health = Arc::new(HealthState::new());

        let admin_listener = Listener::bind("admin", &self.config.admin_address()).await?;
        let admin_addr = admin_listener.local_addr();
        let admin_task = spawn_admin_server(
            admin_listener.into_inner(),
            AdminState {
                health: health.clone(),
                about: Arc::new(self.about),
                metrics: init_metrics(),
            },
        );

        let public_listener = match Listener::bind("public", &self.config.public_address()).await {
            Ok(listener) => listener,
            Err(e) => {
                admin_task.abort();
                return Err(e.into());
            }
        };
        let public_addr = public_listener.local_addr();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(self.source);
        let public_task = tokio::spawn(server.run(public_listener.into_inner(), shutdown.signalled()));

        health.mark_running();
        tracing::info!(
            public = %public_addr,
            admin = %admin_addr,
            "Ready to serve requests"
        );

        Ok(RunningService {
            health,
            shutdown,
            public_task,
            admin_task,
            public_addr,
            admin_addr,
            drain_timeout: self.config.graceful_shutdown_timeout,
        })
    }

    /// Start, wait for `signal`, then shut down.
    pub async fn run_until<F>(self, signal: F) -> Result<(), SupervisorError>
    where
        F: Future<Output = ()>,
    {
        let running = self.start().await?;
        signal.await;
        running.shutdown().await
    }
}

/// Handle on a started service.
pub struct RunningService {
    health: Arc<HealthState>,
    shutdown: Shutdown,
    public_task: JoinHandle<Result<(), std::io::Error>>,
    admin_task: JoinHandle<()>,
    public_addr: SocketAddr,
    admin_addr: SocketAddr,
    drain_timeout: Duration,
}

impl RunningService {
    pub fn public_addr(&self) -> SocketAddr {
        self.public_addr
    }

    pub fn admin_addr(&self) -> SocketAddr {
        self.admin_addr
    }

    pub fn health(&self) -> &Arc<HealthState> {
        &self.health
    }

    /// Fail readiness, then drain the public listener within the timeout.
    pub async fn shutdown(self) -> Result<(), SupervisorError> {
        self.health.mark_shutting_down();
        tracing::info!(
            timeout = %humantime::format_duration(self.drain_timeout),
            "Shutting down..."
        );

        self.shutdown.trigger();
        let result = drain(self.public_task, self.drain_timeout).await;
        self.admin_task.abort();
        result
    }
}

/// Wait for a serving task to finish, bounded by `timeout`.
pub async fn drain(
    task: JoinHandle<Result<(), std::io::Error>>,
    timeout: Duration,
) -> Result<(), SupervisorError> {
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(()))) => {
            tracing::info!("Graceful shutdown complete.");
            Ok(())
        }
        Ok(Ok(Err(e))) => Err(SupervisorError::Serve(e)),
        Ok(Err(join_error)) => Err(SupervisorError::Serve(std::io::Error::other(join_error))),
        Err(_) => {
            tracing::error!(
                timeout = %humantime::format_duration(timeout),
                "Graceful shutdown timed out"
            );
            Err(SupervisorError::ShutdownTimeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ServerStatus;

    fn test_config() -> ServiceConfig {
        ServiceConfig {
            bind_host: "127.0.0.1".into(),
            port: 0,
            admin_port: 0,
            graceful_shutdown_timeout: Duration::from_secs(5),
            ..ServiceConfig::default()
        }
    }

    #[tokio::test]
    async fn test_drain_completes() {
        let task = tokio::spawn(async { Ok::<(), std::io::Error>(()) });
        assert!(drain(task, Duration::from_secs(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_drain_timeout_is_fatal() {
        let task = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<(), std::io::Error>(())
        });
        let err = drain(task, Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, SupervisorError::ShutdownTimeout(_)));
        assert_eq!(
            err.to_string(),
            "graceful shutdown did not complete within 50ms"
        );
    }

    #[tokio::test]
    async fn test_drain_reports_serve_error() {
        let task = tokio::spawn(async { Err::<(), _>(std::io::Error::other("boom")) });
        let err = drain(task, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, SupervisorError::Serve(_)));
    }

    #[tokio::test]
    async fn test_start_marks_running_and_shutdown_marks_shutting_down() {
        let running = Supervisor::new(test_config()).start().await.unwrap();
        let health = running.health().clone();
        assert_eq!(health.status(), ServerStatus::Running);
        assert_ne!(running.public_addr().port(), 0);
        assert_ne!(running.admin_addr().port(), 0);

        running.shutdown().await.unwrap();
        assert_eq!(health.status(), ServerStatus::ShuttingDown);
    }

    #[tokio::test]
    async fn test_public_bind_failure_is_fatal() {
        let occupied = Listener::bind("test", "127.0.0.1:0").await.unwrap();
        let config = ServiceConfig {
            port: occupied.local_addr().port(),
            ..test_config()
        };

        let err = Supervisor::new(config).start().await.err().unwrap();
        assert!(matches!(err, SupervisorError::Bind(_)));
        assert!(err.to_string().contains("public listener"));
    }

    #[tokio::test]
    async fn test_run_until_signal() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(Supervisor::new(test_config()).run_until(async move {
            let _ = rx.await;
        }));

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
    }
}
