// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the system
//! CSPRNG. Nonce reuse would be catastrophic for GCM security. The tag is kept
//! separate from the ciphertext because the envelope stores it as its own field.

use cloudvault_core::VaultError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

/// Nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Output of [`seal`]: the three parts an envelope carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

fn less_safe_key(key: &[u8; 32]) -> Result<LessSafeKey, VaultError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| VaultError::Unknown("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt plaintext with AES-256-GCM using a random 96-bit nonce.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Sealed, VaultError> {
    let less_safe = less_safe_key(key)?;

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| VaultError::Unknown("failed to generate random nonce".to_string()))?;

    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = plaintext.to_vec();
    let tag = less_safe
        .seal_in_place_separate_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| VaultError::Unknown("AES-256-GCM encryption failed".to_string()))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_ref());

    Ok(Sealed {
        nonce: nonce_bytes,
        tag: tag_bytes,
        ciphertext: in_out,
    })
}

/// Decrypt and authenticate a sealed value.
///
/// Returns [`VaultError::Decryption`] if the key is wrong or any of the three
/// parts was tampered with. Unauthenticated bytes are never returned.
pub fn open(key: &[u8; 32], sealed: &Sealed) -> Result<Vec<u8>, VaultError> {
    let less_safe = less_safe_key(key)?;
    let nonce = Nonce::assume_unique_for_key(sealed.nonce);

    let mut in_out = Vec::with_capacity(sealed.ciphertext.len() + TAG_LEN);
    in_out.extend_from_slice(&sealed.ciphertext);
    in_out.extend_from_slice(&sealed.tag);

    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            VaultError::Decryption("authentication failed: wrong key or corrupted data".to_string())
        })?;

    Ok(plaintext.to_vec())
}

/// Generate a random 32-byte key suitable for AES-256-GCM.
pub fn generate_random_key() -> Result<[u8; 32], VaultError> {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    rng.fill(&mut key)
        .map_err(|_| VaultError::Unknown("failed to generate random key".to_string()))?;
    Ok(key)
}
