// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator seams for the vault, broker, and verifier.
//!
//! All traits use `#[async_trait]` so they can be held as `Arc<dyn Trait>`.

pub mod audit;
pub mod capability;
pub mod exchange;
pub mod persistence;
pub mod probe;

pub use audit::AuditSink;
pub use capability::ProviderCapability;
pub use exchange::TokenExchange;
pub use persistence::SecretPersistence;
pub use probe::ProviderProbe;
