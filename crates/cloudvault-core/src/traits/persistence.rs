// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence trait for per-tenant encrypted secret records.

use async_trait::async_trait;

use crate::error::VaultError;
use crate::types::{HealthStatus, SecretKey, TenantId};

/// Opaque key-value persistence keyed by (tenant, key).
///
/// Values are ciphertext envelopes; implementations never see plaintext.
/// Only the secret store calls this trait.
#[async_trait]
pub trait SecretPersistence: Send + Sync + 'static {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Inserts or overwrites the envelope for (tenant, key).
    async fn upsert(
        &self,
        tenant: &TenantId,
        key: SecretKey,
        envelope: String,
    ) -> Result<(), VaultError>;

    /// Returns the stored envelope, or `None` when nothing is stored.
    async fn find(&self, tenant: &TenantId, key: SecretKey) -> Result<Option<String>, VaultError>;

    /// Deletes the record. Returns whether a record existed.
    async fn delete(&self, tenant: &TenantId, key: SecretKey) -> Result<bool, VaultError>;

    /// Checks that the backend can serve requests.
    async fn health_check(&self) -> Result<HealthStatus, VaultError> {
        Ok(HealthStatus::Healthy)
    }
}
