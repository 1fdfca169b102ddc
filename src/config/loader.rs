//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto a configuration.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("BIND_HOST") {
        config.bind_host = host;
    }
    if let Some(raw) = lookup("PORT") {
        config.port = parse_env("PORT", raw, |v| v.parse::<u16>().map_err(|e| e.to_string()))?;
    }
    if let Some((var, raw)) = lookup_any(&lookup, &["ADMIN_PORT", "ADMINPORT"]) {
        config.admin_port = parse_env(var, raw, |v| v.parse::<u16>().map_err(|e| e.to_string()))?;
    }
    if let Some((var, raw)) =
        lookup_any(&lookup, &["GRACEFUL_SHUTDOWN_TIMEOUT", "GRACEFULSHUTDOWNTIMEOUT"])
    {
        config.graceful_shutdown_timeout = parse_env(var, raw, |v| {
            humantime::parse_duration(v).map_err(|e| e.to_string())
        })?;
    }
    if let Some(raw) = lookup("RANDOM_SEED") {
        config.random_seed = Some(parse_env("RANDOM_SEED", raw, |v| {
            v.parse::<u64>().map_err(|e| e.to_string())
        })?);
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(raw) = lookup("LOG_FORMAT") {
        config.observability.log_format = parse_env("LOG_FORMAT", raw, |v| v.parse::<LogFormat>())?;
    }
    Ok(())
}

/// First variable of `names` that is set, so the concatenated envconfig
/// spellings (`ADMINPORT`) keep working next to the underscored ones.
fn lookup_any<F>(lookup: &F, names: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .find_map(|&name| lookup(name).map(|value| (name, value)))
}

fn parse_env<T, P>(var: &'static str, raw: String, parse: P) -> Result<T, ConfigError>
where
    P: FnOnce(&str) -> Result<T, String>,
{
    parse(raw.trim()).map_err(|reason| ConfigError::Env {
        var,
        value: raw,
        reason,
    })
}
