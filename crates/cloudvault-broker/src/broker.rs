// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential broker: turns stored tenant secrets into usable credentials.
//!
//! Every call re-reads and re-decrypts; nothing is cached. The AWS role path
//! makes exactly one token exchange and never reads the tenant's long-lived
//! keys.

use std::sync::Arc;

use cloudvault_config::model::AwsConfig;
use cloudvault_core::{
    CredentialContext, Provider, Purpose, ResolvedCredential, SecretKey, TenantId,
    TokenExchange, VaultError,
};
use cloudvault_security::redact;
use cloudvault_vault::SecretStore;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::delegation;

/// Resolves (tenant, provider) pairs to [`ResolvedCredential`]s.
pub struct CredentialBroker {
    store: Arc<SecretStore>,
    aws: AwsConfig,
    exchange: Arc<dyn TokenExchange>,
}

impl std::fmt::Debug for CredentialBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBroker")
            .field("store", &self.store)
            .field("region", &self.aws.region)
            .field("delegation_enabled", &self.aws.access_key_id.is_some())
            .finish()
    }
}

impl CredentialBroker {
    /// `aws` supplies the region and the platform identity used as the first
    /// hop of delegation.
    pub fn new(store: Arc<SecretStore>, aws: AwsConfig, exchange: Arc<dyn TokenExchange>) -> Self {
        Self {
            store,
            aws,
            exchange,
        }
    }

    pub fn store(&self) -> &Arc<SecretStore> {
        &self.store
    }

    /// Build a credential for `provider` from the tenant's stored secrets.
    pub async fn resolve(
        &self,
        tenant: &TenantId,
        provider: Provider,
        purpose: Purpose,
    ) -> Result<ResolvedCredential, VaultError> {
        debug!(tenant = %tenant, provider = %provider, purpose = %purpose, "resolving credential");
        match provider {
            Provider::Aws => self.resolve_aws(tenant, purpose).await,
            Provider::Gcp => self.resolve_gcp(tenant).await,
            Provider::Azure => self.resolve_azure(tenant).await,
            Provider::Oracle => self.resolve_oracle(tenant).await,
        }
    }

    async fn require(&self, tenant: &TenantId, key: SecretKey) -> Result<SecretString, VaultError> {
        self.store
            .get_decrypted(tenant, key)
            .await?
            .ok_or_else(|| VaultError::missing_tenant(key.as_str()))
    }

    async fn require_plain(&self, tenant: &TenantId, key: SecretKey) -> Result<String, VaultError> {
        Ok(self.require(tenant, key).await?.expose_secret().to_string())
    }

    async fn resolve_aws(
        &self,
        tenant: &TenantId,
        purpose: Purpose,
    ) -> Result<ResolvedCredential, VaultError> {
        if let Some(role_arn) = self.store.get_decrypted(tenant, SecretKey::AwsRoleArn).await? {
            return self
                .resolve_delegated(tenant, role_arn.expose_secret(), purpose)
                .await;
        }

        let access_key_id = self.require_plain(tenant, SecretKey::AwsAccessKeyId).await?;
        let secret_access_key = self.require(tenant, SecretKey::AwsSecretAccessKey).await?;
        Ok(ResolvedCredential::long_lived(
            Provider::Aws,
            access_key_id,
            secret_access_key,
            CredentialContext::Aws {
                region: self.aws.region.clone(),
                account_id: None,
                delegated_role: None,
            },
        ))
    }

    async fn resolve_delegated(
        &self,
        tenant: &TenantId,
        role_arn: &str,
        purpose: Purpose,
    ) -> Result<ResolvedCredential, VaultError> {
        let external_id = self.require(tenant, SecretKey::AwsExternalId).await?;
        let known = vec![
            external_id.expose_secret().to_string(),
            self.aws.secret_access_key.clone().unwrap_or_default(),
        ];

        let chain = delegation::build_chain(&self.aws, role_arn, external_id, tenant, purpose)?;
        let role = chain.role().clone();

        let temporary = self
            .exchange
            .assume_role(&chain)
            .await
            .map_err(|e| scrub(e, &known))
            .inspect_err(|e| {
                warn!(tenant = %tenant, role = %role, error = %e, "role delegation failed");
            })?;

        info!(
            tenant = %tenant,
            role = %role,
            duration_secs = chain.duration_secs(),
            expires_at = %temporary.expiration,
            "delegated session issued"
        );

        ResolvedCredential::session(
            Provider::Aws,
            temporary.access_key_id,
            temporary.secret_access_key,
            temporary.session_token,
            temporary.expiration,
            CredentialContext::Aws {
                region: chain.platform().region.clone(),
                account_id: Some(role.account_id().to_string()),
                delegated_role: Some(role.as_str().to_string()),
            },
        )
    }

    async fn resolve_gcp(&self, tenant: &TenantId) -> Result<ResolvedCredential, VaultError> {
        let project_id = self.require_plain(tenant, SecretKey::GcpProjectId).await?;
        let email = self.require_plain(tenant, SecretKey::GcpServiceAccountEmail).await?;
        let private_key = self.require(tenant, SecretKey::GcpPrivateKey).await?;
        Ok(ResolvedCredential::long_lived(
            Provider::Gcp,
            email,
            private_key,
            CredentialContext::Gcp { project_id },
        ))
    }

    async fn resolve_azure(&self, tenant: &TenantId) -> Result<ResolvedCredential, VaultError> {
        let tenant_id = self.require_plain(tenant, SecretKey::AzureTenantId).await?;
        let subscription_id = self.require_plain(tenant, SecretKey::AzureSubscriptionId).await?;
        let client_id = self.require_plain(tenant, SecretKey::AzureClientId).await?;
        let client_secret = self.require(tenant, SecretKey::AzureClientSecret).await?;
        Ok(ResolvedCredential::long_lived(
            Provider::Azure,
            client_id,
            client_secret,
            CredentialContext::Azure {
                tenant_id,
                subscription_id,
            },
        ))
    }

    async fn resolve_oracle(&self, tenant: &TenantId) -> Result<ResolvedCredential, VaultError> {
        let tenancy_ocid = self.require_plain(tenant, SecretKey::OracleTenancyOcid).await?;
        let user_ocid = self.require_plain(tenant, SecretKey::OracleUserOcid).await?;
        let compartment_ocid = self
            .require_plain(tenant, SecretKey::OracleCompartmentOcid)
            .await?;
        let fingerprint = self.require_plain(tenant, SecretKey::OracleFingerprint).await?;
        let private_key = self.require(tenant, SecretKey::OraclePrivateKey).await?;
        Ok(ResolvedCredential::long_lived(
            Provider::Oracle,
            user_ocid,
            private_key,
            CredentialContext::Oracle {
                tenancy_ocid,
                compartment_ocid,
                fingerprint,
            },
        ))
    }
}

/// Strip key material out of provider text before it leaves the broker.
fn scrub(err: VaultError, known: &[String]) -> VaultError {
    match err {
        VaultError::Delegation { code, reason } => VaultError::Delegation {
            code,
            reason: redact(&reason, known),
        },
        VaultError::ProviderUnreachable { message } => VaultError::ProviderUnreachable {
            message: redact(&message, known),
        },
        other => other,
    }
}
