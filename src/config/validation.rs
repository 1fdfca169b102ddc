//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, distinct ports)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("bind_host must not be empty")]
    EmptyBindHost,

    #[error("graceful_shutdown_timeout must be greater than zero")]
    ZeroShutdownTimeout,

    #[error("port and admin_port must differ (both are {0})")]
    PortConflict(u16),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bind_host.trim().is_empty() {
        errors.push(ValidationError::EmptyBindHost);
    }

    if config.graceful_shutdown_timeout.is_zero() {
        errors.push(ValidationError::ZeroShutdownTimeout);
    }

    // Port 0 asks the OS for an ephemeral port, so two zeros never collide.
    if config.port == config.admin_port && config.port != 0 {
        errors.push(ValidationError::PortConflict(config.port));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
