// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id key derivation from the process-wide master secret.
//!
//! Derives a 32-byte key using Argon2id (Algorithm::Argon2id, Version::V0x13)
//! with parameters from VaultConfig.

use cloudvault_core::VaultError;
use zeroize::Zeroizing;

/// Salt used for every derivation.
///
/// SECURITY: this is a fixed constant, so two deployments sharing a master
/// secret derive the same key, and precomputation against a weak master
/// secret is possible. Existing envelopes depend on it; moving to a
/// per-record random salt requires a new envelope format and a re-encrypt
/// pass over `tenant_secrets`.
pub const STATIC_KDF_SALT: [u8; 16] = *b"cloudvault.kdf.1";

/// Derive a 32-byte key from a passphrase using Argon2id.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory zeroing
/// on drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; 16],
    memory_cost: u32,
    iterations: u32,
    parallelism: u32,
) -> Result<Zeroizing<[u8; 32]>, VaultError> {
    let params = argon2::Params::new(memory_cost, iterations, parallelism, Some(32))
        .map_err(|e| VaultError::Configuration(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(passphrase, salt, output.as_mut())
        .map_err(|e| VaultError::Unknown(format!("Argon2id key derivation failed: {e}")))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_produces_consistent_output() {
        let passphrase = b"test master secret";

        // Use low cost for fast tests.
        let key1 = derive_key(passphrase, &STATIC_KDF_SALT, 32768, 2, 1).unwrap();
        let key2 = derive_key(passphrase, &STATIC_KDF_SALT, 32768, 2, 1).unwrap();

        assert_eq!(*key1, *key2);
    }

    #[test]
    fn derive_key_different_passphrase_produces_different_output() {
        let key1 = derive_key(b"master one", &STATIC_KDF_SALT, 32768, 2, 1).unwrap();
        let key2 = derive_key(b"master two", &STATIC_KDF_SALT, 32768, 2, 1).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn derive_key_different_salt_produces_different_output() {
        let passphrase = b"same passphrase";

        let key1 = derive_key(passphrase, &[1u8; 16], 32768, 2, 1).unwrap();
        let key2 = derive_key(passphrase, &[2u8; 16], 32768, 2, 1).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn zero_iterations_rejected() {
        let result = derive_key(b"x", &STATIC_KDF_SALT, 32768, 0, 1);
        assert!(matches!(result, Err(VaultError::Configuration(_))));
    }
}
