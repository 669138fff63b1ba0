// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security-token exchange trait used by the AWS delegation hop.

use async_trait::async_trait;

use crate::credential::{DelegationChain, TemporaryCredentials};
use crate::error::VaultError;

/// Exchanges the platform identity in a [`DelegationChain`] for temporary
/// credentials scoped to the tenant's role.
///
/// Implementations perform exactly one round trip and never retry. A denial
/// maps to [`VaultError::Delegation`], a transport failure to
/// [`VaultError::ProviderUnreachable`].
#[async_trait]
pub trait TokenExchange: Send + Sync + 'static {
    async fn assume_role(&self, chain: &DelegationChain) -> Result<TemporaryCredentials, VaultError>;
}
