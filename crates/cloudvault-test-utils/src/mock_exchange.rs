// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock assume-role exchange for deterministic delegation tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use cloudvault_core::{DelegationChain, TemporaryCredentials, TokenExchange, VaultError};
use secrecy::SecretString;
use tokio::sync::Mutex;

/// Outcome of one scripted exchange.
#[derive(Debug, Clone)]
pub enum ExchangeOutcome {
    Grant,
    Deny { code: String, reason: String },
    Unreachable(String),
}

/// A token exchange that answers from a FIFO script.
///
/// When the script is empty every call is granted with a session that
/// expires after the chain's requested duration.
#[derive(Clone, Default)]
pub struct MockTokenExchange {
    script: Arc<Mutex<VecDeque<ExchangeOutcome>>>,
    calls: Arc<Mutex<Vec<DelegationChain>>>,
}

impl MockTokenExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a denial with a provider error code.
    pub async fn deny_next(&self, code: &str, reason: &str) {
        self.script.lock().await.push_back(ExchangeOutcome::Deny {
            code: code.to_string(),
            reason: reason.to_string(),
        });
    }

    pub async fn push(&self, outcome: ExchangeOutcome) {
        self.script.lock().await.push_back(outcome);
    }

    /// Every chain presented so far, oldest first.
    pub async fn calls(&self) -> Vec<DelegationChain> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl TokenExchange for MockTokenExchange {
    async fn assume_role(
        &self,
        chain: &DelegationChain,
    ) -> Result<TemporaryCredentials, VaultError> {
        self.calls.lock().await.push(chain.clone());
        let outcome = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or(ExchangeOutcome::Grant);

        match outcome {
            ExchangeOutcome::Grant => Ok(TemporaryCredentials {
                access_key_id: "ASIAMOCKSESSION00001".to_string(),
                secret_access_key: SecretString::from("mock-session-secret".to_string()),
                session_token: SecretString::from("mock-session-token".to_string()),
                expiration: Utc::now() + Duration::seconds(i64::from(chain.duration_secs())),
                assumed_role_arn: Some(format!(
                    "{}/{}",
                    chain.role().as_str().replacen(":role/", ":assumed-role/", 1),
                    chain.session_name()
                )),
            }),
            ExchangeOutcome::Deny { code, reason } => Err(VaultError::Delegation {
                code: Some(code),
                reason,
            }),
            ExchangeOutcome::Unreachable(message) => {
                Err(VaultError::ProviderUnreachable { message })
            }
        }
    }
}
