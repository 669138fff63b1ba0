// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./cloudvault.toml` > `~/.config/cloudvault/cloudvault.toml`
//! > `/etc/cloudvault/cloudvault.toml` with environment variable overrides via the
//! `CLOUDVAULT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CloudvaultConfig;

/// Sections that env var names are split on. Keys inside a section may
/// themselves contain underscores (`aws.secret_access_key`).
const SECTIONS: &[&str] = &["log", "vault", "storage", "aws", "azure", "verify"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cloudvault/cloudvault.toml` (system-wide)
/// 3. `~/.config/cloudvault/cloudvault.toml` (user XDG config)
/// 4. `./cloudvault.toml` (local directory)
/// 5. `CLOUDVAULT_*` environment variables
pub fn load_config() -> Result<CloudvaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<CloudvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CloudvaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CloudvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CloudvaultConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CloudvaultConfig::default()))
        .merge(Toml::file("/etc/cloudvault/cloudvault.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("cloudvault/cloudvault.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("cloudvault.toml"))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `CLOUDVAULT_AWS_SECRET_ACCESS_KEY` maps to `aws.secret_access_key`,
/// not `aws.secret.access.key`.
fn env_provider() -> Env {
    Env::prefixed("CLOUDVAULT_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name onto a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_section_only() {
        assert_eq!(map_env_key("aws_secret_access_key"), "aws.secret_access_key");
        assert_eq!(map_env_key("vault_master_secret"), "vault.master_secret");
        assert_eq!(map_env_key("verify_timeout_secs"), "verify.timeout_secs");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }
}
