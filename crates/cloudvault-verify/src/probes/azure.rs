// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Azure probe: client-credentials token exchange followed by a read of the
//! configured subscription through Resource Manager.

use std::time::Duration;

use async_trait::async_trait;
use cloudvault_config::model::{AzureConfig, VerifyConfig};
use cloudvault_core::{
    CredentialContext, FailureKind, ProbeFailure, ProbeReport, Provider, ProviderProbe,
    ResolvedCredential, VaultError,
};
use cloudvault_security::redact;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::classify::{classify_arm_status, classify_azure_token_error};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    #[serde(default)]
    error_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Subscription {
    subscription_id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Reads `GET /subscriptions/{id}` with a freshly issued management token.
#[derive(Debug, Clone)]
pub struct AzureProbe {
    client: reqwest::Client,
    authority_url: String,
    management_url: String,
    api_version: String,
}

impl AzureProbe {
    pub fn new(config: &AzureConfig, timeout: Duration) -> Result<Self, VaultError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VaultError::Unknown(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            authority_url: config.authority_url.trim_end_matches('/').to_string(),
            management_url: config.management_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        })
    }

    pub fn from_config(azure: &AzureConfig, verify: &VerifyConfig) -> Result<Self, VaultError> {
        Self::new(azure, Duration::from_secs(verify.timeout_secs))
    }

    async fn acquire_token(
        &self,
        tenant_id: &str,
        client_id: &str,
        client_secret: &SecretString,
        known: &[String],
    ) -> Result<SecretString, ProbeFailure> {
        let url = format!("{}/{tenant_id}/oauth2/v2.0/token", self.authority_url);
        let scope = format!("{}/.default", self.management_url);
        let form = [
            ("client_id", client_id),
            ("client_secret", client_secret.expose_secret()),
            ("scope", scope.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| transport_failure(e, known))?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response.json().await.map_err(|e| {
                ProbeFailure::new(
                    FailureKind::Other("malformed token response".to_string()),
                    redact(&e.to_string(), known),
                )
            })?;
            return Ok(SecretString::from(token.access_token));
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_default();
        let kind = classify_azure_token_error(
            status.as_u16(),
            parsed.error.as_deref(),
            &parsed.error_description,
        );
        let detail = if parsed.error_description.is_empty() {
            body
        } else {
            parsed.error_description
        };
        Err(ProbeFailure::new(redact_kind(kind, known), redact(&detail, known)))
    }
}

#[async_trait]
impl ProviderProbe for AzureProbe {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    async fn probe(&self, credential: &ResolvedCredential) -> Result<ProbeReport, ProbeFailure> {
        let CredentialContext::Azure {
            tenant_id,
            subscription_id,
        } = credential.context()
        else {
            return Err(ProbeFailure::new(
                FailureKind::Other("not an Azure credential".to_string()),
                "credential context does not carry an Azure tenant",
            ));
        };
        let secret = credential.secret_material();
        let known = vec![secret.expose_secret().to_string()];

        let token = self
            .acquire_token(tenant_id, credential.access_id(), secret, &known)
            .await?;
        debug!(tenant_id = %tenant_id, "azure token issued");

        let url = format!("{}/subscriptions/{subscription_id}", self.management_url);
        let response = self
            .client
            .get(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| transport_failure(e, &known))?;

        let status = response.status();
        if !status.is_success() {
            let body = redact(&response.text().await.unwrap_or_default(), &known);
            return Err(ProbeFailure::new(
                classify_arm_status(status.as_u16(), &body),
                body,
            ));
        }

        let subscription: Subscription = response.json().await.map_err(|e| {
            ProbeFailure::new(
                FailureKind::Other("malformed subscription response".to_string()),
                e.to_string(),
            )
        })?;
        let name = subscription
            .display_name
            .unwrap_or_else(|| subscription.subscription_id.clone());
        let state = subscription.state.unwrap_or_else(|| "unknown".to_string());

        Ok(ProbeReport {
            account_id: Some(subscription.subscription_id),
            summary: format!("subscription '{name}' is {state}"),
        })
    }
}

fn transport_failure(err: reqwest::Error, known: &[String]) -> ProbeFailure {
    let detail = redact(&err.to_string(), known);
    if err.is_connect() || err.is_timeout() {
        ProbeFailure::new(FailureKind::Unreachable, detail)
    } else {
        ProbeFailure::new(FailureKind::Other(detail.clone()), detail)
    }
}

fn redact_kind(kind: FailureKind, known: &[String]) -> FailureKind {
    match kind {
        FailureKind::Other(message) => FailureKind::Other(redact(&message, known)),
        other => other,
    }
}
