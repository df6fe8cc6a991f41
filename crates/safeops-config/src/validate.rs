//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges. Tool sections may only contain known setting keys so a
//! typo such as `asume_yes` is reported instead of silently ignored.

use crate::error::{ConfigError, ConfigResult};
use crate::resolve::Setting;
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_tools(config)?;
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    Ok(())
}

fn validate_tools(config: &Config) -> ConfigResult<()> {
    for (tool, section) in &config.tools {
        if tool.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "tools".to_owned(),
                message: "tool name must not be empty".to_owned(),
            });
        }

        if let Some(unknown) = section.keys().find(|k| Setting::from_key(k).is_none()) {
            let known: Vec<_> = Setting::ALL.iter().map(|s| s.key()).collect();
            return Err(ConfigError::ValidationError {
                field: format!("tools.{tool}.{unknown}"),
                message: format!("unknown setting; expected one of: {}", known.join(", ")),
            });
        }
    }

    Ok(())
}
