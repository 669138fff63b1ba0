// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for tests and ephemeral deployments.

use async_trait::async_trait;
use cloudvault_core::{SecretKey, SecretPersistence, TenantId, VaultError};
use dashmap::DashMap;

/// Envelopes keyed by (tenant, key), held in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    records: DashMap<(TenantId, SecretKey), String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all tenants.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw envelope lookup for tests that inspect or corrupt stored data.
    pub fn raw(&self, tenant: &TenantId, key: SecretKey) -> Option<String> {
        self.records
            .get(&(tenant.clone(), key))
            .map(|entry| entry.value().clone())
    }

    /// Overwrite a stored envelope without going through the codec.
    pub fn put_raw(&self, tenant: &TenantId, key: SecretKey, envelope: impl Into<String>) {
        self.records.insert((tenant.clone(), key), envelope.into());
    }
}

#[async_trait]
impl SecretPersistence for MemoryPersistence {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upsert(
        &self,
        tenant: &TenantId,
        key: SecretKey,
        envelope: String,
    ) -> Result<(), VaultError> {
        self.records.insert((tenant.clone(), key), envelope);
        Ok(())
    }

    async fn find(&self, tenant: &TenantId, key: SecretKey) -> Result<Option<String>, VaultError> {
        Ok(self.raw(tenant, key))
    }

    async fn delete(&self, tenant: &TenantId, key: SecretKey) -> Result<bool, VaultError> {
        Ok(self.records.remove(&(tenant.clone(), key)).is_some())
    }
}
