//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Route declarations are validated by `RouteTable::new`, not here
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::PortalConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("navigation.fallback_path '{0}' must begin with '/'")]
    FallbackPath(String),

    #[error("database.host must not be empty")]
    DatabaseHost,

    #[error("database.port must not be zero")]
    DatabasePort,

    #[error("database.connect_timeout_secs must be greater than zero")]
    ConnectTimeout,

    #[error("admin.api_key must not be empty")]
    ApiKey,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    if !config.navigation.fallback_path.starts_with('/') {
        errors.push(ValidationError::FallbackPath(
            config.navigation.fallback_path.clone(),
        ));
    }
    if config.database.enabled {
        if config.database.host.trim().is_empty() {
            errors.push(ValidationError::DatabaseHost);
        }
        if config.database.port == 0 {
            errors.push(ValidationError::DatabasePort);
        }
        if config.database.connect_timeout_secs == 0 {
            errors.push(ValidationError::ConnectTimeout);
        }
    }
    if config.admin.api_key.is_empty() {
        errors.push(ValidationError::ApiKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
