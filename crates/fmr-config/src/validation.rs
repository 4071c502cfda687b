// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures configuration values are within the ranges the record format can honor.

use crate::{ConfigError, ConfigResult, FmrConfig};

/// Most minutiae a single finger view can carry.
const MAX_MINUTIAE_PER_FINGER_VIEW: usize = u8::MAX as usize;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &FmrConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_curation(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_curation(config: &FmrConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.curation.max_minutiae > MAX_MINUTIAE_PER_FINGER_VIEW {
        errors.push(ConfigValidationError::InvalidValue {
            field: "curation.max_minutiae".to_string(),
            reason: format!(
                "{} exceeds the {} minutiae a finger view can hold",
                config.curation.max_minutiae, MAX_MINUTIAE_PER_FINGER_VIEW
            ),
        });
    }
}

fn validate_logging(config: &FmrConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }
}
