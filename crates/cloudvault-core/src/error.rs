// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Cloudvault credential vault and broker.

use std::fmt;

use thiserror::Error;

/// Where a missing credential was expected to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    /// A secret the tenant is expected to configure.
    Tenant,
    /// A credential the platform operator supplies through configuration.
    Platform,
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tenant => f.write_str("tenant"),
            Self::Platform => f.write_str("platform"),
        }
    }
}

/// The primary error type used across the vault, broker, and verifier.
///
/// A secret that is simply not configured is NOT an error at the store
/// level (reads return `Ok(None)`); it only becomes [`VaultError::MissingCredential`]
/// when the broker needs it to assemble a credential.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Malformed caller input (empty values, malformed role ARNs, bad config).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A secret required to assemble a credential is absent.
    #[error("missing {scope} credential `{key}`: please configure it before use")]
    MissingCredential { key: String, scope: CredentialScope },

    /// A stored envelope is malformed or failed authentication.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The delegated token exchange was rejected by the provider.
    #[error("delegation denied: {reason}")]
    Delegation {
        /// Provider error code, when one was returned (e.g. `AccessDenied`).
        code: Option<String>,
        /// Provider denial text with key material stripped.
        reason: String,
    },

    /// The provider endpoint could not be reached.
    #[error("provider unreachable: {message}")]
    ProviderUnreachable { message: String },

    /// A write was attempted by a caller without the admin role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Persistence backend failure (connection, query, schema).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl VaultError {
    /// Shorthand for a tenant-scoped [`VaultError::MissingCredential`].
    pub fn missing_tenant(key: impl Into<String>) -> Self {
        Self::MissingCredential {
            key: key.into(),
            scope: CredentialScope::Tenant,
        }
    }

    /// Shorthand for a platform-scoped [`VaultError::MissingCredential`].
    pub fn missing_platform(key: impl Into<String>) -> Self {
        Self::MissingCredential {
            key: key.into(),
            scope: CredentialScope::Platform,
        }
    }

    /// Whether the error should surface to the user as "please configure
    /// credentials" rather than as a server failure.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::Configuration(_) | Self::Unauthorized(_)
        )
    }
}
