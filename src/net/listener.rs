//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve and bind the configured address
//! - Report the actual local address (ephemeral ports included)
//! - Surface bind failures as a typed, fatal error

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {role} listener on {address}: {source}")]
    Bind {
        role: &'static str,
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A bound TCP listener with its resolved local address.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind to `address`. No retries: a failed bind is fatal.
    pub async fn bind(role: &'static str, address: &str) -> Result<Self, ListenerError> {
        let bind_error = |source| ListenerError::Bind {
            role,
            address: address.to_string(),
            source,
        };

        let inner = TcpListener::bind(address).await.map_err(bind_error)?;
        let local_addr = inner.local_addr().map_err(bind_error)?;

        tracing::info!(
            role,
            address = %local_addr,
            "Listener bound"
        );

        Ok(Self { inner, local_addr })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Hand the socket to a server.
    pub fn into_inner(self) -> TcpListener {
        self.inner
    }
}
