//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the random service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host both listeners bind to.
    pub bind_host: String,

    /// Public listener port (randomness endpoint).
    pub port: u16,

    /// Admin listener port (metrics, probes, about).
    pub admin_port: u16,

    /// Upper bound on draining the public listener during shutdown.
    #[serde(with = "humantime_duration")]
    pub graceful_shutdown_timeout: Duration,

    /// Fixed seed for a reproducible value sequence within one process.
    pub random_seed: Option<u64>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 80,
            admin_port: 9000,
            graceful_shutdown_timeout: Duration::from_secs(30),
            random_seed: None,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Socket address string of the public listener.
    pub fn public_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    /// Socket address string of the admin listener.
    pub fn admin_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.admin_port)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format \"{}\"", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Serde adapter reading durations such as `"30s"` or `"1m 30s"`.
mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}
