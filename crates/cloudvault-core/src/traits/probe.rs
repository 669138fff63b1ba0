// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live connectivity probe trait.

use async_trait::async_trait;

use crate::credential::ResolvedCredential;
use crate::types::Provider;
use crate::verification::{ProbeFailure, ProbeReport};

/// Issues one minimal read-only call against a provider.
///
/// Failures are returned as values already normalized into the closed
/// [`FailureKind`](crate::verification::FailureKind) taxonomy; a probe never
/// panics or returns an unclassified error.
#[async_trait]
pub trait ProviderProbe: Send + Sync + 'static {
    /// The provider this probe talks to.
    fn provider(&self) -> Provider;

    async fn probe(&self, credential: &ResolvedCredential) -> Result<ProbeReport, ProbeFailure>;
}
