// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AWS probe: one `s3:ListBuckets` call with the resolved credential.

use std::time::Duration;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use cloudvault_config::model::{AwsConfig, VerifyConfig};
use cloudvault_core::{
    CredentialContext, FailureKind, ProbeFailure, ProbeReport, Provider, ProviderProbe,
    ResolvedCredential,
};
use cloudvault_security::redact;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::classify::classify_aws_code;

/// Lists top-level buckets to prove the credential authenticates.
#[derive(Debug, Clone)]
pub struct S3Probe {
    endpoint: Option<String>,
    default_region: String,
    timeout: Duration,
}

impl S3Probe {
    pub fn new(endpoint: Option<String>, default_region: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint,
            default_region: default_region.into(),
            timeout,
        }
    }

    pub fn from_config(aws: &AwsConfig, verify: &VerifyConfig) -> Self {
        Self::new(
            aws.s3_endpoint.clone(),
            aws.region.clone(),
            Duration::from_secs(verify.timeout_secs),
        )
    }

    fn client(&self, credential: &ResolvedCredential, region: &str) -> aws_sdk_s3::Client {
        let credentials = Credentials::new(
            credential.access_id(),
            credential.secret_material().expose_secret(),
            credential
                .session_token()
                .map(|token| token.expose_secret().to_string()),
            None,
            "cloudvault-tenant",
        );
        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(self.timeout)
                    .build(),
            );
        if let Some(endpoint) = self.endpoint.as_deref() {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        aws_sdk_s3::Client::from_conf(builder.build())
    }
}

#[async_trait]
impl ProviderProbe for S3Probe {
    fn provider(&self) -> Provider {
        Provider::Aws
    }

    async fn probe(&self, credential: &ResolvedCredential) -> Result<ProbeReport, ProbeFailure> {
        let (region, known_account) = match credential.context() {
            CredentialContext::Aws {
                region, account_id, ..
            } => (region.as_str(), account_id.clone()),
            _ => (self.default_region.as_str(), None),
        };
        let known = vec![
            credential.access_id().to_string(),
            credential.secret_material().expose_secret().to_string(),
        ];

        let output = self
            .client(credential, region)
            .list_buckets()
            .send()
            .await
            .map_err(|err| probe_failure(err, &known))?;

        let bucket_count = output.buckets().len();
        let owner_id = output
            .owner()
            .and_then(|owner| owner.id())
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string);
        debug!(bucket_count, has_owner = owner_id.is_some(), "s3:ListBuckets succeeded");

        // An authenticated listing succeeds even when no owner is reported.
        let account_id = known_account.or(owner_id);

        Ok(ProbeReport {
            account_id,
            summary: format!("listed {bucket_count} bucket(s)"),
        })
    }
}

fn probe_failure<E, R>(err: SdkError<E, R>, known: &[String]) -> ProbeFailure
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let (kind, detail) = match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            (FailureKind::Unreachable, DisplayErrorContext(&err).to_string())
        }
        SdkError::ServiceError(context) => {
            let service = context.err();
            let message = redact(service.message().unwrap_or("no message"), known);
            (classify_aws_code(service.code(), &message), message)
        }
        _ => {
            let detail = DisplayErrorContext(&err).to_string();
            (FailureKind::Other(redact(&detail, known)), detail)
        }
    };
    ProbeFailure::new(kind, redact(&detail, known))
}
