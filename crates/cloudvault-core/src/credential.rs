// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transient credential values produced by the broker.
//!
//! Nothing in this module is ever cached or persisted. Secret-bearing fields
//! are [`SecretString`]s so `Debug` output stays redacted.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::error::VaultError;
use crate::types::{Provider, Purpose, TenantId};

/// Provider-native, non-secret identifiers that travel with a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialContext {
    Aws {
        region: String,
        /// Account the credential acts in, when known without a network call.
        account_id: Option<String>,
        /// Role ARN when the credential came from delegation.
        delegated_role: Option<String>,
    },
    Gcp {
        project_id: String,
    },
    Azure {
        tenant_id: String,
        subscription_id: String,
    },
    Oracle {
        tenancy_ocid: String,
        compartment_ocid: String,
        fingerprint: String,
    },
}

/// A ready-to-use credential set for one (tenant, provider).
///
/// Constructed fresh on every broker call. If a session token is present,
/// the expiry is present and was in the future at construction time.
#[derive(Debug, Clone)]
pub struct ResolvedCredential {
    provider: Provider,
    access_id: String,
    secret_material: SecretString,
    session_token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
    context: CredentialContext,
}

impl ResolvedCredential {
    /// A long-lived credential taken directly from tenant secrets.
    pub fn long_lived(
        provider: Provider,
        access_id: impl Into<String>,
        secret_material: SecretString,
        context: CredentialContext,
    ) -> Self {
        Self {
            provider,
            access_id: access_id.into(),
            secret_material,
            session_token: None,
            expires_at: None,
            context,
        }
    }

    /// A temporary session credential. Fails if the expiry is not in the future.
    pub fn session(
        provider: Provider,
        access_id: impl Into<String>,
        secret_material: SecretString,
        session_token: SecretString,
        expires_at: DateTime<Utc>,
        context: CredentialContext,
    ) -> Result<Self, VaultError> {
        if expires_at <= Utc::now() {
            return Err(VaultError::Delegation {
                code: None,
                reason: format!("session credential already expired at {expires_at}"),
            });
        }
        Ok(Self {
            provider,
            access_id: access_id.into(),
            secret_material,
            session_token: Some(session_token),
            expires_at: Some(expires_at),
            context,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub fn secret_material(&self) -> &SecretString {
        &self.secret_material
    }

    pub fn session_token(&self) -> Option<&SecretString> {
        self.session_token.as_ref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn context(&self) -> &CredentialContext {
        &self.context
    }

    pub fn is_session(&self) -> bool {
        self.session_token.is_some()
    }
}

/// A validated IAM role ARN (`arn:<partition>:iam::<account>:role/<name>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleArn {
    arn: String,
    account_id: String,
}

impl RoleArn {
    pub fn parse(input: &str) -> Result<Self, VaultError> {
        let arn = input.trim();
        let malformed = || {
            VaultError::Configuration(format!(
                "`{arn}` is not an IAM role ARN (expected arn:aws:iam::<account>:role/<name>)"
            ))
        };

        let mut parts = arn.splitn(6, ':');
        let (Some("arn"), Some(partition), Some("iam"), Some(""), Some(account), Some(resource)) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(malformed());
        };

        if !partition.starts_with("aws")
            || account.len() != 12
            || !account.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }
        match resource.strip_prefix("role/") {
            Some(name) if !name.is_empty() => {}
            _ => return Err(malformed()),
        }

        Ok(Self {
            arn: arn.to_string(),
            account_id: account.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.arn
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

impl fmt::Display for RoleArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.arn)
    }
}

/// The platform's own long-lived AWS operator credentials (never tenant secrets).
#[derive(Debug, Clone)]
pub struct PlatformIdentity {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub region: String,
}

/// The AWS two-hop trust chain for one call: platform identity assumes the
/// tenant's role, presenting the tenant's external id.
///
/// Built once per broker call and never mutated.
#[derive(Debug, Clone)]
pub struct DelegationChain {
    platform: PlatformIdentity,
    role: RoleArn,
    external_id: SecretString,
    session_name: String,
    duration_secs: i32,
}

impl DelegationChain {
    pub fn new(
        platform: PlatformIdentity,
        role: RoleArn,
        external_id: SecretString,
        tenant: &TenantId,
        purpose: Purpose,
    ) -> Self {
        Self {
            platform,
            role,
            external_id,
            session_name: session_name(tenant, purpose),
            duration_secs: purpose.session_duration_secs(),
        }
    }

    pub fn platform(&self) -> &PlatformIdentity {
        &self.platform
    }

    pub fn role(&self) -> &RoleArn {
        &self.role
    }

    pub fn external_id(&self) -> &SecretString {
        &self.external_id
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn duration_secs(&self) -> i32 {
        self.duration_secs
    }
}

/// STS session names allow `[\w+=,.@-]` and at most 64 characters.
fn session_name(tenant: &TenantId, purpose: Purpose) -> String {
    let raw = format!("cloudvault-{}-{}", purpose, tenant.as_str());
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "_+=,.@-".contains(c) {
                c
            } else {
                '-'
            }
        })
        .take(64)
        .collect()
}

/// Temporary credentials returned by a successful token exchange.
#[derive(Debug, Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub session_token: SecretString,
    pub expiration: DateTime<Utc>,
    /// ARN of the assumed-role session, if the provider returned one.
    pub assumed_role_arn: Option<String>,
}
