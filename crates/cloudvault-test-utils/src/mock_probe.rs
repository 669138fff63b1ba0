// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock connectivity probe.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use cloudvault_core::{
    ProbeFailure, ProbeReport, Provider, ProviderProbe, ResolvedCredential,
};
use tokio::sync::Mutex;

/// A probe for one provider that answers from a FIFO script.
///
/// With an empty script it reports success for `default_account`.
/// Records the access id of every credential it was handed.
#[derive(Clone)]
pub struct MockProbe {
    provider: Provider,
    default_account: String,
    script: Arc<Mutex<VecDeque<Result<ProbeReport, ProbeFailure>>>>,
    seen: Arc<Mutex<Vec<(String, bool)>>>,
}

impl MockProbe {
    pub fn new(provider: Provider, default_account: impl Into<String>) -> Self {
        Self {
            provider,
            default_account: default_account.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn fail_next(&self, failure: ProbeFailure) {
        self.script.lock().await.push_back(Err(failure));
    }

    /// `(access_id, was_session)` for every probed credential.
    pub async fn seen(&self) -> Vec<(String, bool)> {
        self.seen.lock().await.clone()
    }
}

#[async_trait]
impl ProviderProbe for MockProbe {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn probe(&self, credential: &ResolvedCredential) -> Result<ProbeReport, ProbeFailure> {
        self.seen
            .lock()
            .await
            .push((credential.access_id().to_string(), credential.is_session()));
        self.script.lock().await.pop_front().unwrap_or_else(|| {
            Ok(ProbeReport {
                account_id: Some(self.default_account.clone()),
                summary: "mock probe succeeded".to_string(),
            })
        })
    }
}
