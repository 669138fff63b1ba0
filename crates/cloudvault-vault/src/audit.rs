// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`AuditSink`] implementations.
//!
//! Entries describe which key was touched and by whom. They never carry
//! secret values.

use std::sync::Arc;

use async_trait::async_trait;
use cloudvault_core::{AuditEntry, AuditSink, TenantId, VaultError};
use rusqlite::params;
use tokio::sync::Mutex;
use tracing::info;

use crate::persistence::map_tr_err;

/// Emits each entry as a structured `tracing` event on `cloudvault::audit`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn append(&self, entry: AuditEntry) -> Result<(), VaultError> {
        info!(
            target: "cloudvault::audit",
            tenant_id = %entry.tenant_id,
            actor_id = %entry.actor_id,
            action = %entry.action,
            resource = %entry.resource,
            details = %entry.details,
            timestamp = %entry.timestamp.to_rfc3339(),
            "audit"
        );
        Ok(())
    }
}

/// Appends entries to the `audit_log` table.
#[derive(Clone)]
pub struct SqliteAuditSink {
    conn: tokio_rusqlite::Connection,
}

impl SqliteAuditSink {
    /// Create a sink on a connection opened by
    /// [`open_connection`](crate::persistence::open_connection).
    pub fn new(conn: tokio_rusqlite::Connection) -> Self {
        Self { conn }
    }

    /// `(actor, action, resource)` for every entry of `tenant`, oldest first.
    pub async fn entries_for(&self, tenant: &TenantId) -> Result<Vec<(String, String, String)>, VaultError> {
        let tenant = tenant.as_str().to_string();
        self.conn
            .call(move |conn| -> Result<Vec<(String, String, String)>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT actor_id, action, resource FROM audit_log WHERE tenant_id = ?1 ORDER BY id",
                )?;
                let rows = stmt.query_map(params![tenant], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row?);
                }
                Ok(out)
            })
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl AuditSink for SqliteAuditSink {
    async fn append(&self, entry: AuditEntry) -> Result<(), VaultError> {
        let tenant = entry.tenant_id.as_str().to_string();
        let actor = entry.actor_id;
        let action = entry.action.to_string();
        let resource = entry.resource;
        let details = entry.details.to_string();
        let created_at = entry.timestamp.to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO audit_log (tenant_id, actor_id, action, resource, details, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![tenant, actor, action, resource, details, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Collects entries in memory. Used by tests to assert on the audit trail.
#[derive(Debug, Default, Clone)]
pub struct MemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded entry in append order.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, entry: AuditEntry) -> Result<(), VaultError> {
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

/// Fans one entry out to several sinks; the first failure wins.
pub struct FanoutAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl FanoutAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }
}

#[async_trait]
impl AuditSink for FanoutAuditSink {
    async fn append(&self, entry: AuditEntry) -> Result<(), VaultError> {
        for sink in &self.sinks {
            sink.append(entry.clone()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudvault_core::AuditAction;
    use tempfile::tempdir;

    fn entry(tenant: &str, action: AuditAction) -> AuditEntry {
        AuditEntry::now(
            TenantId::new(tenant).unwrap(),
            "user-1",
            action,
            "aws.role_arn",
            serde_json::json!({ "provider": "aws" }),
        )
    }

    #[tokio::test]
    async fn sqlite_sink_appends_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.db");
        let conn = crate::persistence::open_connection(path.to_str().unwrap(), true)
            .await
            .unwrap();
        let sink = SqliteAuditSink::new(conn);

        sink.append(entry("acme", AuditAction::SecretSet)).await.unwrap();
        sink.append(entry("acme", AuditAction::SecretRevoke)).await.unwrap();
        sink.append(entry("other", AuditAction::SecretSet)).await.unwrap();

        let rows = sink.entries_for(&TenantId::new("acme").unwrap()).await.unwrap();
        assert_eq!(
            rows,
            vec![
                ("user-1".to_string(), "secret.set".to_string(), "aws.role_arn".to_string()),
                ("user-1".to_string(), "secret.revoke".to_string(), "aws.role_arn".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn fanout_reaches_every_sink() {
        let a = MemoryAuditSink::new();
        let b = MemoryAuditSink::new();
        let fanout = FanoutAuditSink::new(vec![
            Arc::new(a.clone()),
            Arc::new(b.clone()),
            Arc::new(TracingAuditSink),
        ]);

        fanout.append(entry("acme", AuditAction::SecretSet)).await.unwrap();

        assert_eq!(a.entries().await.len(), 1);
        assert_eq!(b.entries().await.len(), 1);
    }
}
