// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text envelope for sealed secrets: `<nonceHex>:<tagHex>:<ciphertextHex>`.
//!
//! Lowercase hex only. Parsing is strict so that a stored record has exactly
//! one valid spelling.

use cloudvault_core::VaultError;

use crate::crypto::{Sealed, NONCE_LEN, TAG_LEN};

const SEPARATOR: char = ':';

/// Render a sealed value as an envelope string.
pub fn encode(sealed: &Sealed) -> String {
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}",
        hex::encode(sealed.nonce),
        hex::encode(sealed.tag),
        hex::encode(&sealed.ciphertext)
    )
}

/// Parse an envelope string.
///
/// Fails with [`VaultError::Decryption`] unless the input has exactly three
/// lowercase-hex fields with a 12-byte nonce and a 16-byte tag.
pub fn decode(envelope: &str) -> Result<Sealed, VaultError> {
    let fields: Vec<&str> = envelope.split(SEPARATOR).collect();
    let [nonce_hex, tag_hex, ct_hex] = fields.as_slice() else {
        return Err(VaultError::Decryption(format!(
            "malformed envelope: expected 3 fields, found {}",
            fields.len()
        )));
    };

    let nonce = decode_fixed::<NONCE_LEN>("nonce", nonce_hex)?;
    let tag = decode_fixed::<TAG_LEN>("tag", tag_hex)?;
    let ciphertext = decode_field("ciphertext", ct_hex)?;

    Ok(Sealed {
        nonce,
        tag,
        ciphertext,
    })
}

fn decode_field(name: &str, field: &str) -> Result<Vec<u8>, VaultError> {
    if !field.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(VaultError::Decryption(format!(
            "malformed envelope: {name} is not lowercase hex"
        )));
    }
    hex::decode(field)
        .map_err(|e| VaultError::Decryption(format!("malformed envelope: {name}: {e}")))
}

fn decode_fixed<const N: usize>(name: &str, field: &str) -> Result<[u8; N], VaultError> {
    let bytes = decode_field(name, field)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        VaultError::Decryption(format!(
            "malformed envelope: {name} must be {N} bytes, found {len}"
        ))
    })
}
