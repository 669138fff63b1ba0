// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin-gated write path over [`SecretStore`].
//!
//! The session context comes from an external collaborator and is trusted as
//! given. Only the role is checked here.

use std::sync::Arc;

use cloudvault_core::{Provider, RoleArn, SecretKey, SessionContext, VaultError};
use tracing::warn;

use crate::store::SecretStore;

/// Upper bound on a stored value, in characters. Large enough for a 4096-bit
/// PEM private key.
pub const MAX_SECRET_CHARS: usize = 16 * 1024;

/// Validates and authorizes secret mutations before they reach the store.
#[derive(Debug, Clone)]
pub struct SecretAdmin {
    store: Arc<SecretStore>,
}

impl SecretAdmin {
    pub fn new(store: Arc<SecretStore>) -> Self {
        Self { store }
    }

    fn authorize(ctx: &SessionContext, operation: &str) -> Result<(), VaultError> {
        if ctx.is_admin() {
            return Ok(());
        }
        warn!(
            tenant = %ctx.tenant_id,
            actor = %ctx.actor_id,
            operation,
            "non-admin secret mutation rejected"
        );
        Err(VaultError::Unauthorized(format!(
            "{operation} requires the admin role"
        )))
    }

    /// Store a value for `ctx.tenant_id`, attributed to `ctx.actor_id`.
    ///
    /// Private keys keep their exact bytes; every other value is trimmed.
    pub async fn set_secret(
        &self,
        ctx: &SessionContext,
        key: SecretKey,
        value: &str,
    ) -> Result<(), VaultError> {
        Self::authorize(ctx, "setting a secret")?;

        let value = match key {
            SecretKey::GcpPrivateKey | SecretKey::OraclePrivateKey => value,
            _ => value.trim(),
        };
        if value.trim().is_empty() {
            return Err(VaultError::Configuration(format!("{key} must not be empty")));
        }
        if value.chars().count() > MAX_SECRET_CHARS {
            return Err(VaultError::Configuration(format!(
                "{key} exceeds {MAX_SECRET_CHARS} characters"
            )));
        }
        if key == SecretKey::AwsRoleArn {
            RoleArn::parse(value)?;
        }

        self.store
            .set_secret(&ctx.tenant_id, &ctx.actor_id, key, value)
            .await
    }

    /// Remove one value. Returns whether it existed.
    pub async fn revoke_secret(
        &self,
        ctx: &SessionContext,
        key: SecretKey,
    ) -> Result<bool, VaultError> {
        Self::authorize(ctx, "revoking a secret")?;
        self.store
            .revoke_secret(&ctx.tenant_id, &ctx.actor_id, key)
            .await
    }

    /// Disconnect a provider: revoke each of its keys, one audit entry per key.
    ///
    /// Returns the keys that actually held a value.
    pub async fn revoke_provider(
        &self,
        ctx: &SessionContext,
        provider: Provider,
    ) -> Result<Vec<SecretKey>, VaultError> {
        Self::authorize(ctx, "disconnecting a provider")?;
        let mut removed = Vec::new();
        for key in provider.keys() {
            if self
                .store
                .revoke_secret(&ctx.tenant_id, &ctx.actor_id, key)
                .await?
            {
                removed.push(key);
            }
        }
        Ok(removed)
    }
}
