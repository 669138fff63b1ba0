// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-cloud credential broker.
//!
//! Assembles AWS, GCP, Azure and Oracle credentials from a tenant's stored
//! secrets, and performs AWS assume-role delegation through a platform
//! identity when the tenant has configured a role.

pub mod broker;
pub mod delegation;
pub mod schema;
pub mod sts;

pub use broker::CredentialBroker;
pub use schema::{delegation_keys, required_keys, AccessMode, ProviderCredentialSchema, ProviderStatus};
pub use sts::StsTokenExchange;
