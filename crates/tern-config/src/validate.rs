//! Post-merge configuration validation.

use std::net::SocketAddr;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Accepted range for transport timeouts, in seconds.
const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=300;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_environment(config)?;
    validate_transport(config)?;
    validate_server(config)?;
    validate_storage(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_environment(config: &Config) -> ConfigResult<()> {
    let kind = config.environment.kind.as_str();
    if !matches!(kind, "native" | "browser") {
        return Err(invalid(
            "environment.kind",
            format!("unsupported environment '{kind}'; expected one of: native, browser"),
        ));
    }
    Ok(())
}

fn validate_transport(config: &Config) -> ConfigResult<()> {
    let t = &config.transport;
    for (field, value) in [
        ("transport.connection_timeout_secs", t.connection_timeout_secs),
        ("transport.request_timeout_secs", t.request_timeout_secs),
    ] {
        if !TIMEOUT_RANGE_SECS.contains(&value) {
            return Err(invalid(
                field,
                format!(
                    "{value} is out of range; must be between {} and {}",
                    TIMEOUT_RANGE_SECS.start(),
                    TIMEOUT_RANGE_SECS.end()
                ),
            ));
        }
    }
    Ok(())
}

fn validate_server(config: &Config) -> ConfigResult<()> {
    let s = &config.server;
    if s.listen_addr.parse::<SocketAddr>().is_err() {
        return Err(invalid(
            "server.listen_addr",
            format!("'{}' is not a socket address", s.listen_addr),
        ));
    }
    if s.account_id.as_deref().is_some_and(str::is_empty) {
        return Err(invalid("server.account_id", "must not be empty when set"));
    }
    Ok(())
}

fn validate_storage(config: &Config) -> ConfigResult<()> {
    let backend = config.storage.backend.as_str();
    if !matches!(backend, "file" | "memory") {
        return Err(invalid(
            "storage.backend",
            format!("unsupported backend '{backend}'; expected one of: file, memory"),
        ));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;
    if l.level.trim().is_empty() {
        return Err(invalid("logging.level", "must not be empty"));
    }
    if !matches!(
        l.format.as_str(),
        "pretty" | "compact" | "json" | "full"
    ) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported format '{}'; expected one of: pretty, compact, json, full",
                l.format
            ),
        ));
    }
    if !matches!(l.target.as_str(), "stderr" | "stdout") {
        return Err(invalid(
            "logging.target",
            format!(
                "unsupported target '{}'; expected one of: stderr, stdout",
                l.target
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_environment() {
        let mut config = Config::default();
        config.environment.kind = "desktop".to_owned();
        assert_eq!(field_of(validate(&config)), "environment.kind");
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.transport.request_timeout_secs = 0;
        assert_eq!(field_of(validate(&config)), "transport.request_timeout_secs");

        config.transport.request_timeout_secs = 300;
        config.transport.connection_timeout_secs = 301;
        assert_eq!(
            field_of(validate(&config)),
            "transport.connection_timeout_secs"
        );
    }

    #[test]
    fn test_rejects_bad_listen_addr() {
        let mut config = Config::default();
        config.server.listen_addr = "localhost".to_owned();
        assert_eq!(field_of(validate(&config)), "server.listen_addr");
    }

    #[test]
    fn test_rejects_empty_account_id() {
        let mut config = Config::default();
        config.server.account_id = Some(String::new());
        assert_eq!(field_of(validate(&config)), "server.account_id");
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let mut config = Config::default();
        config.storage.backend = "sqlite".to_owned();
        assert_eq!(field_of(validate(&config)), "storage.backend");
    }

    #[test]
    fn test_rejects_empty_log_level() {
        let mut config = Config::default();
        config.logging.level = "  ".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");
    }

    #[test]
    fn test_rejects_unknown_log_target() {
        let mut config = Config::default();
        config.logging.target = "syslog".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.target");
    }
}
