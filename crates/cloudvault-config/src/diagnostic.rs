// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with "did you mean?" suggestions.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for suggesting a correction
/// (`acess_key_id` -> `access_key_id`).
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic help text.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(cloudvault::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(cloudvault::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(cloudvault::config::missing_key),
        help("add `{key} = <value>` to cloudvault.toml or set the CLOUDVAULT_ env var")
    )]
    MissingKey { key: String },

    /// A semantic validation failure.
    #[error("validation error: {message}")]
    #[diagnostic(code(cloudvault::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(cloudvault::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path = error.path.join(".");
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let valid_keys: Vec<&str> = expected.to_vec();
                    let key = if path.is_empty() {
                        field.clone()
                    } else {
                        format!("{path}.{field}")
                    };
                    ConfigError::UnknownKey {
                        key,
                        suggestion: suggest_key(field, &valid_keys),
                        valid_keys: valid_keys.join(", "),
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.clone().into_owned(),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: path,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Suggest the closest valid key using Jaro-Winkler similarity.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
