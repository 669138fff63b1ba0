// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the vault, broker and verifier over a temp SQLite
//! database with a fixed codec key. The platform AWS identity is absent
//! unless the builder asks for it.

use std::sync::Arc;

use cloudvault_broker::{CredentialBroker, ProviderCredentialSchema};
use cloudvault_config::model::AwsConfig;
use cloudvault_core::{AuditSink, ProviderProbe, Role, SessionContext, TenantId, VaultError};
use cloudvault_vault::persistence::open_connection;
use cloudvault_vault::{SecretAdmin, SecretCodec, SecretStore, SqliteAuditSink, SqlitePersistence};
use cloudvault_verify::ProviderVerifier;

use crate::mock_exchange::MockTokenExchange;

/// Codec key shared by every harness so envelopes are comparable across runs.
pub const TEST_CODEC_KEY: [u8; 32] = [0x5a; 32];

pub const PLATFORM_ACCESS_KEY_ID: &str = "AKIAPLATFORM0TESTKEY";
pub const PLATFORM_SECRET_ACCESS_KEY: &str = "platform/secret/access/key/for/tests/0001";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    tenant: String,
    aws: AwsConfig,
    probes: Vec<Arc<dyn ProviderProbe>>,
    exchange: MockTokenExchange,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            tenant: "tenant-acme".to_string(),
            aws: AwsConfig::default(),
            probes: Vec::new(),
            exchange: MockTokenExchange::new(),
        }
    }

    pub fn with_tenant(mut self, tenant: &str) -> Self {
        self.tenant = tenant.to_string();
        self
    }

    /// Configure the platform base credentials used for delegation.
    pub fn with_platform_identity(mut self) -> Self {
        self.aws.access_key_id = Some(PLATFORM_ACCESS_KEY_ID.to_string());
        self.aws.secret_access_key = Some(PLATFORM_SECRET_ACCESS_KEY.to_string());
        self
    }

    pub fn with_aws_config(mut self, aws: AwsConfig) -> Self {
        self.aws = aws;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn ProviderProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    pub fn with_exchange(mut self, exchange: MockTokenExchange) -> Self {
        self.exchange = exchange;
        self
    }

    /// Build the harness, creating the temp database and all components.
    pub async fn build(self) -> Result<TestHarness, VaultError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| VaultError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("cloudvault-test.db");
        let conn = open_connection(&db_path.to_string_lossy(), true).await?;

        let persistence = Arc::new(SqlitePersistence::new(conn.clone()));
        let audit = Arc::new(SqliteAuditSink::new(conn));
        let store = Arc::new(SecretStore::new(
            Arc::new(SecretCodec::from_key(TEST_CODEC_KEY)),
            persistence.clone(),
            audit.clone() as Arc<dyn AuditSink>,
        ));
        let broker = Arc::new(CredentialBroker::new(
            store.clone(),
            self.aws,
            Arc::new(self.exchange.clone()),
        ));
        let verifier = self
            .probes
            .into_iter()
            .fold(ProviderVerifier::new(broker.clone()), |verifier, probe| {
                verifier.with_probe(probe)
            });
        let tenant = TenantId::new(self.tenant)?;

        Ok(TestHarness {
            admin: SecretAdmin::new(store.clone()),
            schema: ProviderCredentialSchema::new(store.clone()),
            store,
            broker,
            verifier,
            persistence,
            audit,
            exchange: self.exchange,
            admin_ctx: SessionContext::new(tenant.clone(), "alice", Role::Admin),
            member_ctx: SessionContext::new(tenant.clone(), "bob", Role::Member),
            tenant,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment over a temp database.
pub struct TestHarness {
    pub tenant: TenantId,
    /// Admin session for `tenant` (actor `alice`).
    pub admin_ctx: SessionContext,
    /// Non-admin session for `tenant` (actor `bob`).
    pub member_ctx: SessionContext,
    pub admin: SecretAdmin,
    pub store: Arc<SecretStore>,
    pub schema: ProviderCredentialSchema,
    pub broker: Arc<CredentialBroker>,
    pub verifier: ProviderVerifier,
    pub persistence: Arc<SqlitePersistence>,
    pub audit: Arc<SqliteAuditSink>,
    pub exchange: MockTokenExchange,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Store several values through the admin gate.
    pub async fn configure(
        &self,
        values: &[(cloudvault_core::SecretKey, &str)],
    ) -> Result<(), VaultError> {
        for (key, value) in values {
            self.admin.set_secret(&self.admin_ctx, *key, value).await?;
        }
        Ok(())
    }

    /// A session for another tenant, sharing this harness's storage.
    pub fn admin_for(&self, tenant: &str) -> Result<SessionContext, VaultError> {
        Ok(SessionContext::new(TenantId::new(tenant)?, "carol", Role::Admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudvault_core::{Provider, SecretKey};

    #[tokio::test]
    async fn harness_builds_and_stores() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness
            .configure(&[(SecretKey::GcpProjectId, "acme-prod")])
            .await
            .unwrap();
        let status = harness
            .schema
            .provider_status(&harness.tenant, Provider::Gcp)
            .await
            .unwrap();
        assert!(!status.configured);
        assert_eq!(harness.exchange.call_count().await, 0);
    }
}
