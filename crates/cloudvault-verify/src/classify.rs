// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of provider error codes into [`FailureKind`].

use cloudvault_core::{FailureKind, VaultError};

/// AWS error codes (STS, IAM, S3) mapped to the failure taxonomy.
pub fn classify_aws_code(code: Option<&str>, message: &str) -> FailureKind {
    match code {
        Some("InvalidAccessKeyId" | "InvalidClientTokenId" | "UnrecognizedClientException") => {
            FailureKind::InvalidKey
        }
        Some("SignatureDoesNotMatch" | "IncompleteSignature") => FailureKind::SignatureMismatch,
        Some("AccessDenied" | "AccessDeniedException" | "AllAccessDisabled") => {
            FailureKind::AccessDenied
        }
        Some("RequestTimeout" | "ServiceUnavailable") => FailureKind::Unreachable,
        Some(other) => FailureKind::Other(format!("{other}: {message}")),
        None => FailureKind::Other(message.to_string()),
    }
}

/// Entra ID token endpoint errors mapped to the failure taxonomy.
///
/// `error` is the OAuth2 error field, `description` carries the `AADSTSnnnn`
/// code.
pub fn classify_azure_token_error(status: u16, error: Option<&str>, description: &str) -> FailureKind {
    // AADSTS7000215: invalid client secret. AADSTS700016: unknown application.
    // AADSTS7000222: expired client secret.
    if ["AADSTS7000215", "AADSTS700016", "AADSTS7000222"]
        .iter()
        .any(|code| description.contains(code))
    {
        return FailureKind::InvalidKey;
    }
    match (status, error) {
        (_, Some("invalid_client")) => FailureKind::InvalidKey,
        (_, Some("unauthorized_client")) | (403, _) => FailureKind::AccessDenied,
        (_, Some(other)) => FailureKind::Other(format!("{other}: {description}")),
        (_, None) => FailureKind::Other(format!("token endpoint returned {status}: {description}")),
    }
}

/// Azure Resource Manager status codes mapped to the failure taxonomy.
pub fn classify_arm_status(status: u16, body: &str) -> FailureKind {
    match status {
        401 => FailureKind::InvalidKey,
        403 => FailureKind::AccessDenied,
        502..=504 => FailureKind::Unreachable,
        _ => FailureKind::Other(format!("resource manager returned {status}: {body}")),
    }
}

/// Failure class for a broker error raised while obtaining the credential,
/// or `None` when the error is not a provider verdict.
pub fn classify_broker_error(err: &VaultError) -> Option<FailureKind> {
    match err {
        VaultError::Delegation { code, reason } => Some(classify_aws_code(code.as_deref(), reason)),
        VaultError::ProviderUnreachable { .. } => Some(FailureKind::Unreachable),
        _ => None,
    }
}
