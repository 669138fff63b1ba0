// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Cloudvault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Cloudvault configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CloudvaultConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Secret codec settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Platform AWS identity used for delegation.
    #[serde(default)]
    pub aws: AwsConfig,

    /// Azure endpoints used by the connectivity probe.
    #[serde(default)]
    pub azure: AzureConfig,

    /// Provider verification settings.
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Secret codec configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Process-wide master secret. Usually supplied as
    /// `CLOUDVAULT_VAULT_MASTER_SECRET` rather than written to a file.
    #[serde(default)]
    pub master_secret: Option<String>,

    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB).
    #[serde(default = "default_kdf_memory_cost")]
    pub kdf_memory_cost: u32,

    /// Argon2id iteration count (default: 3).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2id parallelism lanes (default: 4).
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            master_secret: None,
            kdf_memory_cost: default_kdf_memory_cost(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

fn default_kdf_memory_cost() -> u32 {
    65536 // 64 MiB per OWASP recommendation
}

fn default_kdf_iterations() -> u32 {
    3
}

fn default_kdf_parallelism() -> u32 {
    4
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("cloudvault").join("cloudvault.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("cloudvault.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Platform AWS identity and endpoints.
///
/// These are the operator's own long-lived credentials, used only as the
/// first hop of role delegation. Tenant secrets never come from here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    /// Platform access key id. `None` disables delegated access.
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Platform secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Region used for STS and S3 calls.
    #[serde(default = "default_aws_region")]
    pub region: String,

    /// Override for the STS endpoint (LocalStack, FIPS endpoints).
    #[serde(default)]
    pub sts_endpoint: Option<String>,

    /// Override for the S3 endpoint used by the connectivity probe.
    #[serde(default)]
    pub s3_endpoint: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: default_aws_region(),
            sts_endpoint: None,
            s3_endpoint: None,
        }
    }
}

fn default_aws_region() -> String {
    "us-east-1".to_string()
}

/// Azure endpoints for the connectivity probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AzureConfig {
    /// Entra ID authority base URL.
    #[serde(default = "default_azure_authority")]
    pub authority_url: String,

    /// Azure Resource Manager base URL.
    #[serde(default = "default_azure_management")]
    pub management_url: String,

    /// ARM API version for the subscription lookup.
    #[serde(default = "default_azure_api_version")]
    pub api_version: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            authority_url: default_azure_authority(),
            management_url: default_azure_management(),
            api_version: default_azure_api_version(),
        }
    }
}

fn default_azure_authority() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_azure_management() -> String {
    "https://management.azure.com".to_string()
}

fn default_azure_api_version() -> String {
    "2022-12-01".to_string()
}

/// Provider verification settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    /// Transport timeout for delegation and probe calls, in seconds.
    #[serde(default = "default_verify_timeout")]
    pub timeout_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_verify_timeout(),
        }
    }
}

fn default_verify_timeout() -> u64 {
    15
}
