// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider credential verification for Cloudvault.
//!
//! [`ProviderVerifier`] resolves a tenant credential through the broker and
//! runs a live probe where one exists, otherwise a structural check.

pub mod classify;
pub mod probes;
pub mod verifier;

pub use classify::{classify_aws_code, classify_broker_error};
pub use probes::{AzureProbe, S3Probe};
pub use verifier::ProviderVerifier;
