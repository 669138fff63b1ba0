// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audit records for secret mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::TenantId;

/// Secret mutations that produce an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum AuditAction {
    #[strum(serialize = "secret.set")]
    #[serde(rename = "secret.set")]
    SecretSet,
    #[strum(serialize = "secret.revoke")]
    #[serde(rename = "secret.revoke")]
    SecretRevoke,
}

/// One append-only audit record. Never contains secret values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub tenant_id: TenantId,
    pub actor_id: String,
    pub action: AuditAction,
    pub resource: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn now(
        tenant_id: TenantId,
        actor_id: impl Into<String>,
        action: AuditAction,
        resource: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            tenant_id,
            actor_id: actor_id.into(),
            action,
            resource: resource.into(),
            details,
            timestamp: Utc::now(),
        }
    }
}
