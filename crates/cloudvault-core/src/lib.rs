// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Cloudvault credential vault and broker.
//!
//! This crate provides the data model, the error taxonomy, and the
//! collaborator traits (persistence, audit, token exchange, probes) used
//! throughout the Cloudvault workspace.

pub mod audit;
pub mod credential;
pub mod error;
pub mod traits;
pub mod types;
pub mod verification;

// Re-export key items at crate root for ergonomic imports.
pub use audit::{AuditAction, AuditEntry};
pub use credential::{
    CredentialContext, DelegationChain, PlatformIdentity, ResolvedCredential, RoleArn,
    TemporaryCredentials,
};
pub use error::{CredentialScope, VaultError};
pub use types::{HealthStatus, Provider, Purpose, Role, SecretKey, SecretStatus, SessionContext, TenantId};
pub use verification::{
    FailureKind, ProbeFailure, ProbeReport, VerificationDetails, VerificationMode,
    VerificationResult,
};

pub use traits::{AuditSink, ProviderCapability, ProviderProbe, SecretPersistence, TokenExchange};
