// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the vault, broker, and verifier crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, IntoEnumIterator};

use crate::error::VaultError;

/// Opaque identifier scoping every secret and credential lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant id, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, VaultError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(VaultError::Configuration(
                "tenant id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of cloud providers the broker knows how to serve.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    Oracle,
}

impl Provider {
    /// Human-readable provider name for messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
            Self::Azure => "Azure",
            Self::Oracle => "Oracle Cloud",
        }
    }

    /// Every secret key belonging to this provider, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = SecretKey> + '_ {
        SecretKey::iter().filter(move |k| k.provider() == *self)
    }
}

/// A secret slot in the vault. Grouped by provider; the string form is
/// `<provider>.<name>` and doubles as the persistence key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum SecretKey {
    #[strum(serialize = "aws.access_key_id")]
    #[serde(rename = "aws.access_key_id")]
    AwsAccessKeyId,
    #[strum(serialize = "aws.secret_access_key")]
    #[serde(rename = "aws.secret_access_key")]
    AwsSecretAccessKey,
    #[strum(serialize = "aws.role_arn")]
    #[serde(rename = "aws.role_arn")]
    AwsRoleArn,
    #[strum(serialize = "aws.external_id")]
    #[serde(rename = "aws.external_id")]
    AwsExternalId,

    #[strum(serialize = "gcp.project_id")]
    #[serde(rename = "gcp.project_id")]
    GcpProjectId,
    #[strum(serialize = "gcp.service_account_email")]
    #[serde(rename = "gcp.service_account_email")]
    GcpServiceAccountEmail,
    #[strum(serialize = "gcp.private_key")]
    #[serde(rename = "gcp.private_key")]
    GcpPrivateKey,

    #[strum(serialize = "azure.tenant_id")]
    #[serde(rename = "azure.tenant_id")]
    AzureTenantId,
    #[strum(serialize = "azure.subscription_id")]
    #[serde(rename = "azure.subscription_id")]
    AzureSubscriptionId,
    #[strum(serialize = "azure.client_id")]
    #[serde(rename = "azure.client_id")]
    AzureClientId,
    #[strum(serialize = "azure.client_secret")]
    #[serde(rename = "azure.client_secret")]
    AzureClientSecret,

    #[strum(serialize = "oracle.tenancy_ocid")]
    #[serde(rename = "oracle.tenancy_ocid")]
    OracleTenancyOcid,
    #[strum(serialize = "oracle.user_ocid")]
    #[serde(rename = "oracle.user_ocid")]
    OracleUserOcid,
    #[strum(serialize = "oracle.compartment_ocid")]
    #[serde(rename = "oracle.compartment_ocid")]
    OracleCompartmentOcid,
    #[strum(serialize = "oracle.fingerprint")]
    #[serde(rename = "oracle.fingerprint")]
    OracleFingerprint,
    #[strum(serialize = "oracle.private_key")]
    #[serde(rename = "oracle.private_key")]
    OraclePrivateKey,
}

impl SecretKey {
    /// The persistence / wire name, e.g. `aws.role_arn`.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn provider(&self) -> Provider {
        match self {
            Self::AwsAccessKeyId | Self::AwsSecretAccessKey | Self::AwsRoleArn | Self::AwsExternalId => {
                Provider::Aws
            }
            Self::GcpProjectId | Self::GcpServiceAccountEmail | Self::GcpPrivateKey => Provider::Gcp,
            Self::AzureTenantId
            | Self::AzureSubscriptionId
            | Self::AzureClientId
            | Self::AzureClientSecret => Provider::Azure,
            Self::OracleTenancyOcid
            | Self::OracleUserOcid
            | Self::OracleCompartmentOcid
            | Self::OracleFingerprint
            | Self::OraclePrivateKey => Provider::Oracle,
        }
    }

    /// Whether the value is secret material, as opposed to an identifier.
    ///
    /// Identifiers are still encrypted at rest and masked on read; this only
    /// decides which values the redactor strips from provider error text.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            Self::AwsSecretAccessKey
                | Self::AwsExternalId
                | Self::GcpPrivateKey
                | Self::AzureClientSecret
                | Self::OraclePrivateKey
        )
    }
}

/// Role carried by the authenticated session context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// Authenticated session context supplied by the session collaborator.
///
/// Trusted unconditionally: nothing in this workspace re-authenticates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub tenant_id: TenantId,
    pub actor_id: String,
    pub role: Role,
}

impl SessionContext {
    pub fn new(tenant_id: TenantId, actor_id: impl Into<String>, role: Role) -> Self {
        Self {
            tenant_id,
            actor_id: actor_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Why a credential is being resolved. Bounds the delegated session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Connectivity checks only.
    Verification,
    /// Data-plane work (listing, transfers).
    DataPlane,
}

impl Purpose {
    /// Delegated session duration in seconds.
    pub fn session_duration_secs(&self) -> i32 {
        match self {
            Self::Verification => 900,
            Self::DataPlane => 3600,
        }
    }
}

/// Health status reported by backend health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational.
    Healthy,
    /// Backend is operational but experiencing issues.
    Degraded(String),
    /// Backend is not operational.
    Unhealthy(String),
}

/// Presence and masked preview of one stored secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretStatus {
    pub exists: bool,
    pub masked_preview: Option<String>,
}

impl SecretStatus {
    pub fn absent() -> Self {
        Self {
            exists: false,
            masked_preview: None,
        }
    }
}
