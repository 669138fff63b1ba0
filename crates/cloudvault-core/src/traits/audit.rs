// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit sink trait.

use async_trait::async_trait;

use crate::audit::AuditEntry;
use crate::error::VaultError;

/// Receives one entry per secret mutation, synchronously with the write.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    async fn append(&self, entry: AuditEntry) -> Result<(), VaultError>;
}
