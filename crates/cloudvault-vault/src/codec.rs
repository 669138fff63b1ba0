// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated encryption of individual secret values.
//!
//! [`SecretCodec`] holds the symmetric key derived once at startup from the
//! master secret and turns plaintext into envelope strings and back.

use cloudvault_config::model::VaultConfig;
use cloudvault_core::VaultError;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{crypto, envelope, kdf};

/// Encrypts and decrypts secret values under one derived key.
///
/// The key is immutable after construction. Debug output omits it.
pub struct SecretCodec {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for SecretCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCodec")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SecretCodec {
    /// Derive the codec key from the master secret with Argon2id over
    /// [`kdf::STATIC_KDF_SALT`].
    pub fn from_master_secret(
        master_secret: &SecretString,
        config: &VaultConfig,
    ) -> Result<Self, VaultError> {
        let secret = master_secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(VaultError::Configuration(
                "master secret must not be empty".to_string(),
            ));
        }
        let key = kdf::derive_key(
            secret.as_bytes(),
            &kdf::STATIC_KDF_SALT,
            config.kdf_memory_cost,
            config.kdf_iterations,
            config.kdf_parallelism,
        )?;
        debug!("secret codec key derived");
        Ok(Self { key })
    }

    /// Build a codec from an already-derived key.
    pub fn from_key(key: [u8; 32]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Seal `plaintext` under a fresh nonce and return its envelope string.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, VaultError> {
        let sealed = crypto::seal(&self.key, plaintext.as_bytes())?;
        Ok(envelope::encode(&sealed))
    }

    /// Parse, authenticate and decrypt an envelope string.
    pub fn decrypt(&self, envelope: &str) -> Result<SecretString, VaultError> {
        let sealed = envelope::decode(envelope)?;
        let plaintext = Zeroizing::new(crypto::open(&self.key, &sealed)?);
        let value = std::str::from_utf8(&plaintext)
            .map_err(|e| VaultError::Decryption(format!("decrypted value is not valid UTF-8: {e}")))?;
        Ok(SecretString::from(value.to_string()))
    }
}
