// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-tenant encrypted secret vault for Cloudvault.
//!
//! Secrets are sealed with AES-256-GCM under a key derived once from the
//! process-wide master secret via Argon2id, stored as text envelopes keyed by
//! (tenant, key), and every mutation is audited.

pub mod admin;
pub mod audit;
pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod kdf;
pub mod persistence;
pub mod prompt;
pub mod store;

pub use admin::SecretAdmin;
pub use audit::{FanoutAuditSink, MemoryAuditSink, SqliteAuditSink, TracingAuditSink};
pub use codec::SecretCodec;
pub use persistence::{MemoryPersistence, SqlitePersistence};
pub use prompt::{get_master_secret, read_secret_value};
pub use store::{mask_preview, SecretStore};
