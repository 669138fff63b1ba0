// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single capability interface over the closed provider set.

use async_trait::async_trait;

use crate::credential::ResolvedCredential;
use crate::error::VaultError;
use crate::types::{Provider, Purpose, SecretKey, TenantId};
use crate::verification::VerificationResult;

/// Everything a caller can do with a provider: learn its required keys,
/// resolve a credential, and test connectivity.
#[async_trait]
pub trait ProviderCapability: Send + Sync {
    /// Keys required for direct (non-delegated) use, in schema order.
    fn required_keys(&self, provider: Provider) -> &'static [SecretKey];

    async fn resolve(
        &self,
        tenant: &TenantId,
        provider: Provider,
        purpose: Purpose,
    ) -> Result<ResolvedCredential, VaultError>;

    async fn test(
        &self,
        tenant: &TenantId,
        provider: Provider,
    ) -> Result<VerificationResult, VaultError>;
}
