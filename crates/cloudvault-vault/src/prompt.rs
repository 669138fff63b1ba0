// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master secret and secret value acquisition via config, environment, stdin,
//! or TTY prompt.

use std::io::{IsTerminal, Read};

use cloudvault_core::VaultError;
use secrecy::SecretString;

/// The environment variable name for providing the master secret.
pub const MASTER_SECRET_ENV_VAR: &str = "CLOUDVAULT_VAULT_MASTER_SECRET";

/// Get the master secret.
///
/// Priority:
/// 1. `configured` (the `vault.master_secret` config value, which already
///    includes the env override when loaded through figment)
/// 2. `CLOUDVAULT_VAULT_MASTER_SECRET` environment variable
/// 3. Interactive TTY prompt via `rpassword`
pub fn get_master_secret(configured: Option<&str>) -> Result<SecretString, VaultError> {
    if let Some(secret) = configured
        && !secret.is_empty()
    {
        return Ok(SecretString::from(secret.to_string()));
    }

    if let Ok(secret) = std::env::var(MASTER_SECRET_ENV_VAR)
        && !secret.is_empty()
    {
        return Ok(SecretString::from(secret));
    }

    if std::io::stdin().is_terminal() {
        eprint!("Master secret: ");
        let secret = rpassword::read_password()
            .map_err(|e| VaultError::Configuration(format!("failed to read master secret: {e}")))?;
        if secret.is_empty() {
            return Err(VaultError::Configuration(
                "empty master secret not allowed".to_string(),
            ));
        }
        return Ok(SecretString::from(secret));
    }

    Err(VaultError::Configuration(format!(
        "No master secret provided. Set {MASTER_SECRET_ENV_VAR} or vault.master_secret, or run interactively."
    )))
}

/// Read a secret value to store: hidden TTY prompt when interactive,
/// otherwise all of stdin with one trailing newline removed.
pub fn read_secret_value(label: &str) -> Result<SecretString, VaultError> {
    if std::io::stdin().is_terminal() {
        eprint!("{label}: ");
        let value = rpassword::read_password()
            .map_err(|e| VaultError::Configuration(format!("failed to read {label}: {e}")))?;
        return Ok(SecretString::from(value));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| VaultError::Configuration(format!("failed to read {label} from stdin: {e}")))?;
    Ok(SecretString::from(strip_trailing_newline(buf)))
}

fn strip_trailing_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}
