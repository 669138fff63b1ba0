// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which secrets each provider needs, and whether a tenant has them.

use std::collections::BTreeMap;
use std::sync::Arc;

use cloudvault_core::{Provider, SecretKey, SecretStatus, TenantId, VaultError};
use cloudvault_vault::SecretStore;
use serde::Serialize;
use tracing::debug;

/// Keys needed to use each provider directly, in the order they are checked.
pub fn required_keys(provider: Provider) -> &'static [SecretKey] {
    match provider {
        Provider::Aws => &[SecretKey::AwsAccessKeyId, SecretKey::AwsSecretAccessKey],
        Provider::Gcp => &[
            SecretKey::GcpProjectId,
            SecretKey::GcpServiceAccountEmail,
            SecretKey::GcpPrivateKey,
        ],
        Provider::Azure => &[
            SecretKey::AzureTenantId,
            SecretKey::AzureSubscriptionId,
            SecretKey::AzureClientId,
            SecretKey::AzureClientSecret,
        ],
        Provider::Oracle => &[
            SecretKey::OracleTenancyOcid,
            SecretKey::OracleUserOcid,
            SecretKey::OracleCompartmentOcid,
            SecretKey::OracleFingerprint,
            SecretKey::OraclePrivateKey,
        ],
    }
}

/// Keys for the delegated (assume-role) path. Only AWS has one.
pub fn delegation_keys(provider: Provider) -> Option<&'static [SecretKey]> {
    match provider {
        Provider::Aws => Some(&[SecretKey::AwsRoleArn, SecretKey::AwsExternalId]),
        _ => None,
    }
}

/// How a configured provider will be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Long-lived tenant keys are used as-is.
    Direct,
    /// The platform identity assumes a tenant role.
    Delegated,
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Delegated => f.write_str("delegated"),
        }
    }
}

/// Configuration summary for one provider of one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub configured: bool,
    pub mode: Option<AccessMode>,
    pub keys: BTreeMap<SecretKey, SecretStatus>,
}

/// Read-only view over the store that reports provider completeness.
#[derive(Debug, Clone)]
pub struct ProviderCredentialSchema {
    store: Arc<SecretStore>,
}

impl ProviderCredentialSchema {
    pub fn new(store: Arc<SecretStore>) -> Self {
        Self { store }
    }

    /// Status of every provider for `tenant`.
    pub async fn resolve_all(
        &self,
        tenant: &TenantId,
    ) -> Result<BTreeMap<Provider, ProviderStatus>, VaultError> {
        let mut all = BTreeMap::new();
        for provider in [Provider::Aws, Provider::Gcp, Provider::Azure, Provider::Oracle] {
            all.insert(provider, self.provider_status(tenant, provider).await?);
        }
        Ok(all)
    }

    /// Status of one provider. A provider is configured only when a whole
    /// key set is present; partial sets report `configured: false`.
    pub async fn provider_status(
        &self,
        tenant: &TenantId,
        provider: Provider,
    ) -> Result<ProviderStatus, VaultError> {
        let mut keys = BTreeMap::new();
        for key in provider.keys() {
            keys.insert(key, self.store.get_secret_status(tenant, key).await?);
        }

        let complete = |set: &[SecretKey]| {
            set.iter()
                .all(|k| keys.get(k).is_some_and(|status| status.exists))
        };

        let mode = if delegation_keys(provider).is_some_and(complete) {
            Some(AccessMode::Delegated)
        } else if complete(required_keys(provider)) {
            Some(AccessMode::Direct)
        } else {
            None
        };

        debug!(tenant = %tenant, provider = %provider, ?mode, "provider status computed");
        Ok(ProviderStatus {
            configured: mode.is_some(),
            mode,
            keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudvault_vault::crypto::generate_random_key;
    use cloudvault_vault::{MemoryAuditSink, MemoryPersistence, SecretCodec};

    fn store() -> Arc<SecretStore> {
        Arc::new(SecretStore::new(
            Arc::new(SecretCodec::from_key(generate_random_key().unwrap())),
            Arc::new(MemoryPersistence::new()),
            Arc::new(MemoryAuditSink::new()),
        ))
    }

    fn acme() -> TenantId {
        TenantId::new("acme").unwrap()
    }

    #[test]
    fn required_keys_belong_to_their_provider() {
        for provider in [Provider::Aws, Provider::Gcp, Provider::Azure, Provider::Oracle] {
            assert!(required_keys(provider).iter().all(|k| k.provider() == provider));
        }
        assert_eq!(delegation_keys(Provider::Gcp), None);
    }

    #[tokio::test]
    async fn empty_tenant_has_nothing_configured() {
        let schema = ProviderCredentialSchema::new(store());
        let all = schema.resolve_all(&acme()).await.unwrap();
        assert_eq!(all.len(), 4);
        for status in all.values() {
            assert!(!status.configured);
            assert!(status.mode.is_none());
            assert!(status.keys.values().all(|s| !s.exists));
        }
    }

    #[tokio::test]
    async fn partial_set_is_not_configured() {
        let store = store();
        let schema = ProviderCredentialSchema::new(store.clone());
        for key in &required_keys(Provider::Azure)[..3] {
            store.set_secret(&acme(), "admin", *key, "value-123456").await.unwrap();
        }

        let status = schema.provider_status(&acme(), Provider::Azure).await.unwrap();
        assert!(!status.configured);
        assert!(status.keys[&SecretKey::AzureClientId].exists);
        assert!(!status.keys[&SecretKey::AzureClientSecret].exists);

        store
            .set_secret(&acme(), "admin", SecretKey::AzureClientSecret, "secret-123456")
            .await
            .unwrap();
        let status = schema.provider_status(&acme(), Provider::Azure).await.unwrap();
        assert!(status.configured);
        assert_eq!(status.mode, Some(AccessMode::Direct));
    }

    #[tokio::test]
    async fn aws_reports_delegated_mode() {
        let store = store();
        let schema = ProviderCredentialSchema::new(store.clone());
        store
            .set_secret(&acme(), "admin", SecretKey::AwsRoleArn, "arn:aws:iam::123456789012:role/Vault")
            .await
            .unwrap();
        let status = schema.provider_status(&acme(), Provider::Aws).await.unwrap();
        assert!(!status.configured);

        store
            .set_secret(&acme(), "admin", SecretKey::AwsExternalId, "ext-123")
            .await
            .unwrap();
        let status = schema.provider_status(&acme(), Provider::Aws).await.unwrap();
        assert_eq!(status.mode, Some(AccessMode::Delegated));
    }

    #[tokio::test]
    async fn status_serializes_with_wire_names() {
        let schema = ProviderCredentialSchema::new(store());
        let status = schema.provider_status(&acme(), Provider::Aws).await.unwrap();
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["configured"], false);
        assert_eq!(json["keys"]["aws.role_arn"]["exists"], false);
        assert!(json["keys"]["aws.role_arn"]["maskedPreview"].is_null());
    }
}
