// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cloudvault providers`, `resolve` and `test` commands.

use cloudvault_core::{
    CredentialContext, Provider, Purpose, ResolvedCredential, TenantId, VaultError,
};
use cloudvault_vault::mask_preview;

use crate::runtime::Runtime;

/// Print each provider's configuration state.
pub async fn run_providers(
    runtime: &Runtime,
    tenant: &TenantId,
    json: bool,
) -> Result<(), VaultError> {
    let all = runtime.schema.resolve_all(tenant).await?;
    if json {
        let out = serde_json::to_string_pretty(&all)
            .map_err(|e| VaultError::Unknown(format!("failed to render JSON: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    for (provider, status) in &all {
        let state = match (status.configured, status.mode) {
            (true, Some(mode)) => format!("configured ({mode})"),
            _ => {
                let present = status.keys.values().filter(|s| s.exists).count();
                format!("not configured ({present}/{} keys set)", status.keys.len())
            }
        };
        println!("  {:<8} {state}", provider.to_string());
    }
    Ok(())
}

/// Resolve a credential and print a summary without secret material.
pub async fn run_resolve(
    runtime: &Runtime,
    tenant: &TenantId,
    provider: Provider,
    purpose: Purpose,
) -> Result<(), VaultError> {
    let credential = runtime.broker.resolve(tenant, provider, purpose).await?;
    for line in summarize(&credential) {
        println!("  {line}");
    }
    Ok(())
}

/// Non-secret description of a resolved credential, one line per field.
pub fn summarize(credential: &ResolvedCredential) -> Vec<String> {
    let mut lines = vec![
        format!("provider:   {}", credential.provider().display_name()),
        format!("access id:  {}", mask_preview(credential.access_id())),
    ];
    match credential.expires_at() {
        Some(expiry) => lines.push(format!("session:    expires {}", expiry.to_rfc3339())),
        None => lines.push("session:    long-lived".to_string()),
    }
    match credential.context() {
        CredentialContext::Aws {
            region,
            account_id,
            delegated_role,
        } => {
            lines.push(format!("region:     {region}"));
            if let Some(account) = account_id {
                lines.push(format!("account:    {account}"));
            }
            if let Some(role) = delegated_role {
                lines.push(format!("role:       {role}"));
            }
        }
        CredentialContext::Gcp { project_id } => lines.push(format!("project:    {project_id}")),
        CredentialContext::Azure {
            tenant_id,
            subscription_id,
        } => {
            lines.push(format!("tenant:     {tenant_id}"));
            lines.push(format!("subscription: {subscription_id}"));
        }
        CredentialContext::Oracle {
            tenancy_ocid,
            compartment_ocid,
            fingerprint,
        } => {
            lines.push(format!("tenancy:    {tenancy_ocid}"));
            lines.push(format!("compartment: {compartment_ocid}"));
            lines.push(format!("fingerprint: {fingerprint}"));
        }
    }
    lines
}

/// Run a verification and print the result as JSON.
///
/// Returns whether verification succeeded.
pub async fn run_test(
    runtime: &Runtime,
    tenant: &TenantId,
    provider: Provider,
) -> Result<bool, VaultError> {
    let result = runtime.verifier.test(tenant, provider).await?;
    let out = serde_json::to_string_pretty(&result)
        .map_err(|e| VaultError::Unknown(format!("failed to render JSON: {e}")))?;
    println!("{out}");
    Ok(result.success)
}
