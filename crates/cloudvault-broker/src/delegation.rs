// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembly of the AWS delegation chain from tenant secrets and platform
//! configuration.

use cloudvault_config::model::AwsConfig;
use cloudvault_core::{
    DelegationChain, PlatformIdentity, Purpose, RoleArn, TenantId, VaultError,
};
use secrecy::SecretString;

/// Config key names reported when the platform identity is absent.
pub const PLATFORM_ACCESS_KEY_ID: &str = "platform.aws_access_key_id";
pub const PLATFORM_SECRET_ACCESS_KEY: &str = "platform.aws_secret_access_key";

/// The platform identity, if both halves are configured.
///
/// A half-configured pair is rejected by config validation, so here each
/// half is checked separately only to name the missing one.
pub fn platform_identity(aws: &AwsConfig) -> Result<PlatformIdentity, VaultError> {
    let access_key_id = aws
        .access_key_id
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| VaultError::missing_platform(PLATFORM_ACCESS_KEY_ID))?;
    let secret_access_key = aws
        .secret_access_key
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| VaultError::missing_platform(PLATFORM_SECRET_ACCESS_KEY))?;

    Ok(PlatformIdentity {
        access_key_id: access_key_id.to_string(),
        secret_access_key: SecretString::from(secret_access_key.to_string()),
        region: aws.region.clone(),
    })
}

/// Validate the tenant role and pair it with the platform identity.
///
/// The role ARN is checked before the platform identity so that a tenant
/// typo is reported as such even on a platform without delegation keys.
pub fn build_chain(
    aws: &AwsConfig,
    role_arn: &str,
    external_id: SecretString,
    tenant: &TenantId,
    purpose: Purpose,
) -> Result<DelegationChain, VaultError> {
    let role = RoleArn::parse(role_arn)?;
    let platform = platform_identity(aws)?;
    Ok(DelegationChain::new(platform, role, external_id, tenant, purpose))
}
