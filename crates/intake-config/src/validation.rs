// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as backoff ordering and positive ceilings.

use crate::diagnostic::ConfigError;
use crate::model::IntakeConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &IntakeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.queue.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.max_attempts must be at least 1".to_string(),
        });
    }

    if config.queue.batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.batch_size must be at least 1".to_string(),
        });
    }

    if config.queue.base_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.base_interval_secs must be positive".to_string(),
        });
    }

    if config.queue.max_interval_secs < config.queue.base_interval_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "queue.max_interval_secs ({}) must not be less than queue.base_interval_secs ({})",
                config.queue.max_interval_secs, config.queue.base_interval_secs
            ),
        });
    }

    if config.queue.claim_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "queue.claim_timeout_secs must be positive".to_string(),
        });
    }

    if config.capacity.ai_max_concurrent == 0 {
        errors.push(ConfigError::Validation {
            message: "capacity.ai_max_concurrent must be at least 1".to_string(),
        });
    }

    if config.capacity.human_max_concurrent == 0 {
        errors.push(ConfigError::Validation {
            message: "capacity.human_max_concurrent must be at least 1".to_string(),
        });
    }

    for (i, intent) in config.selection.prefer_human_intents.iter().enumerate() {
        if intent.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("selection.prefer_human_intents[{i}] must not be empty"),
            });
        }
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

    #[test]
    fn default_config_validates() {
        let config = IntakeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = IntakeConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn zero_max_attempts_fails_validation() {
        let mut config = IntakeConfig::default();
        config.queue.max_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_attempts"))));
    }

    #[test]
    fn inverted_backoff_interval_fails_validation() {
        let mut config = IntakeConfig::default();
        config.queue.base_interval_secs = 600;
        config.queue.max_interval_secs = 60;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_interval_secs"))));
    }

    #[test]
    fn zero_capacity_ceiling_fails_validation() {
        let mut config = IntakeConfig::default();
        config.capacity.human_max_concurrent = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("human_max_concurrent"))));
    }

    #[test]
    fn empty_intent_fails_validation() {
        let mut config = IntakeConfig::default();
        config.selection.prefer_human_intents = vec!["support".into(), "  ".into()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("prefer_human_intents"))));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = IntakeConfig::default();
        config.storage.database_path = "".to_string();
        config.queue.max_attempts = 0;
        config.queue.batch_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "expected all errors collected, got {errors:?}");
    }
}
