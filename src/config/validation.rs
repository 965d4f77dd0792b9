//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and parsable addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use tracing::Level;

use crate::config::schema::MockServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("fixtures.dir must not be empty")]
    EmptyFixtureDir,

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &MockServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.fixtures.dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyFixtureDir);
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let level = &config.observability.log_level;
    if level.parse::<Level>().is_err() {
        errors.push(ValidationError::UnknownLogLevel(level.clone()));
    }

    let metrics_address = &config.observability.metrics_address;
    if config.observability.metrics_enabled && metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&MockServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = MockServerConfig::default();
        config.listener.host = "  ".into();
        config.fixtures.dir = PathBuf::new();
        config.limits.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyHost,
                ValidationError::EmptyFixtureDir,
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = MockServerConfig::default();
        config.observability.metrics_address = "not an address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("not an address".into())]
        );
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = MockServerConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
