// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as KDF floors, paired platform credentials, and URL shapes.

use crate::diagnostic::ConfigError;
use crate::model::CloudvaultConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CloudvaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(secret) = &config.vault.master_secret
        && secret.len() < 16
    {
        errors.push(ConfigError::Validation {
            message: "vault.master_secret must be at least 16 characters".to_string(),
        });
    }

    if config.vault.kdf_memory_cost < 32768 {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_memory_cost must be at least 32768 (32 MiB), got {}",
                config.vault.kdf_memory_cost
            ),
        });
    }

    if config.vault.kdf_iterations < 2 {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_iterations must be at least 2, got {}",
                config.vault.kdf_iterations
            ),
        });
    }

    if config.vault.kdf_parallelism < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_parallelism must be at least 1, got {}",
                config.vault.kdf_parallelism
            ),
        });
    }

    // Platform keys are all-or-nothing; half a pair is a typo, not "disabled".
    if config.aws.access_key_id.is_some() != config.aws.secret_access_key.is_some() {
        errors.push(ConfigError::Validation {
            message: "aws.access_key_id and aws.secret_access_key must be set together"
                .to_string(),
        });
    }

    if config.aws.region.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "aws.region must not be empty".to_string(),
        });
    }

    let urls = [
        ("aws.sts_endpoint", config.aws.sts_endpoint.as_deref()),
        ("aws.s3_endpoint", config.aws.s3_endpoint.as_deref()),
        ("azure.authority_url", Some(config.azure.authority_url.as_str())),
        ("azure.management_url", Some(config.azure.management_url.as_str())),
    ];
    for (key, value) in urls {
        if let Some(url) = value
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{url}` must be an http(s) URL"),
            });
        }
    }

    if config.verify.timeout_secs == 0 || config.verify.timeout_secs > 300 {
        errors.push(ConfigError::Validation {
            message: format!(
                "verify.timeout_secs must be between 1 and 300, got {}",
                config.verify.timeout_secs
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
