// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Cloudvault.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `CLOUDVAULT_` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use cloudvault_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("region: {}", config.aws.region);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::CloudvaultConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `CloudvaultConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<CloudvaultConfig, Vec<ConfigError>> {
    let config = loader::load_config().map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<CloudvaultConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_str(toml_content)
        .map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(
    path: &std::path::Path,
) -> Result<CloudvaultConfig, Vec<ConfigError>> {
    let config =
        loader::load_config_from_path(path).map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
