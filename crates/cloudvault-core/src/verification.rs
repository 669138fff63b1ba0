// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verification outcomes surfaced at the outer boundary.
//!
//! `details` never carries secret material under any outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Provider;

/// Closed taxonomy that provider-specific failures are normalized into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum FailureKind {
    InvalidKey,
    SignatureMismatch,
    AccessDenied,
    Unreachable,
    Other(String),
}

impl FailureKind {
    /// User-facing summary for the failure class.
    pub fn summary(&self) -> &str {
        match self {
            Self::InvalidKey => "invalid key: the provider does not recognise the configured credentials",
            Self::SignatureMismatch => "signature mismatch: the secret does not match the key id",
            Self::AccessDenied => "access denied: the credentials are valid but lack permission",
            Self::Unreachable => "provider unreachable",
            Self::Other(message) => message,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => f.write_str("InvalidKey"),
            Self::SignatureMismatch => f.write_str("SignatureMismatch"),
            Self::AccessDenied => f.write_str("AccessDenied"),
            Self::Unreachable => f.write_str("Unreachable"),
            Self::Other(message) => write!(f, "Other({message})"),
        }
    }
}

/// Whether a verdict came from a real provider call or a presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// A live read-only call against the provider succeeded or failed.
    Live,
    /// Only required-key presence was checked; no network call was made.
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
    pub provider: Provider,
    pub mode: VerificationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    pub delegated: bool,
}

/// `{success, message, details?}` as returned by `ProviderVerifier::test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<VerificationDetails>,
}

impl VerificationResult {
    pub fn mode(&self) -> Option<VerificationMode> {
        self.details.as_ref().map(|d| d.mode)
    }

    pub fn failure(&self) -> Option<&FailureKind> {
        self.details.as_ref().and_then(|d| d.failure.as_ref())
    }
}

/// What a successful live probe learned about the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Account, subscription, or project identifier, when the provider
    /// reports one. Never secret material.
    pub account_id: Option<String>,
    /// Short description of what was listed, for the result message.
    pub summary: String,
}

/// A normalized probe failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub kind: FailureKind,
    /// Provider text with key material already stripped.
    pub detail: String,
}

impl ProbeFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}
