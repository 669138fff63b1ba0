// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cloudvault secret` subcommands.

use cloudvault_core::{Provider, SecretKey, SessionContext, VaultError};
use cloudvault_vault::read_secret_value;
use secrecy::{ExposeSecret, SecretString};
use strum::IntoEnumIterator;

use crate::runtime::Runtime;

/// `secret set`: value from `--value`, otherwise stdin or a hidden prompt.
pub async fn run_set(
    runtime: &Runtime,
    ctx: &SessionContext,
    key: SecretKey,
    value: Option<String>,
) -> Result<(), VaultError> {
    let value = match value {
        Some(v) => SecretString::from(v),
        None => read_secret_value(key.as_str())?,
    };
    runtime
        .admin
        .set_secret(ctx, key, value.expose_secret())
        .await?;
    println!("stored {key} for tenant {}", ctx.tenant_id);
    Ok(())
}

/// `secret status`: one key, one provider, or every key of every provider.
pub async fn run_status(
    runtime: &Runtime,
    ctx: &SessionContext,
    key: Option<SecretKey>,
    provider: Option<Provider>,
) -> Result<(), VaultError> {
    let keys: Vec<SecretKey> = match (key, provider) {
        (Some(key), _) => vec![key],
        (None, Some(provider)) => provider.keys().collect(),
        (None, None) => SecretKey::iter().collect(),
    };

    for key in keys {
        let status = runtime.store.get_secret_status(&ctx.tenant_id, key).await?;
        let shown = status.masked_preview.as_deref().unwrap_or("(not set)");
        println!("  {:<30} {shown}", key.as_str());
    }
    Ok(())
}

/// `secret revoke`: one key, or every key of a provider.
pub async fn run_revoke(
    runtime: &Runtime,
    ctx: &SessionContext,
    key: Option<SecretKey>,
    provider: Option<Provider>,
) -> Result<(), VaultError> {
    match (key, provider) {
        (Some(key), _) => {
            if runtime.admin.revoke_secret(ctx, key).await? {
                println!("revoked {key}");
            } else {
                println!("{key} was not set");
            }
        }
        (None, Some(provider)) => {
            let removed = runtime.admin.revoke_provider(ctx, provider).await?;
            println!(
                "disconnected {}: {} key(s) revoked",
                provider.display_name(),
                removed.len()
            );
        }
        (None, None) => {
            return Err(VaultError::Configuration(
                "pass a secret key or --provider".to_string(),
            ));
        }
    }
    Ok(())
}
