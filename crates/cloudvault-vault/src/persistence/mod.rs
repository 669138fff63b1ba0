// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`SecretPersistence`](cloudvault_core::SecretPersistence) backends.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryPersistence;
pub use sqlite::{open_connection, SqlitePersistence};

/// Convert tokio-rusqlite errors to VaultError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> cloudvault_core::VaultError {
    cloudvault_core::VaultError::Storage {
        source: Box::new(e),
    }
}
