// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for tenant secret envelopes.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The audit sink may share the same connection.

use async_trait::async_trait;
use cloudvault_core::{HealthStatus, SecretKey, SecretPersistence, TenantId, VaultError};
use rusqlite::params;
use tracing::debug;

use super::map_tr_err;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tenant_secrets (
    tenant_id   TEXT NOT NULL,
    secret_key  TEXT NOT NULL,
    envelope    TEXT NOT NULL,
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    PRIMARY KEY (tenant_id, secret_key)
);

CREATE TABLE IF NOT EXISTS audit_log (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id   TEXT NOT NULL,
    actor_id    TEXT NOT NULL,
    action      TEXT NOT NULL,
    resource    TEXT NOT NULL,
    details     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audit_log_tenant ON audit_log (tenant_id, created_at);
";

/// Open a database file, apply PRAGMAs, and create the Cloudvault tables.
pub async fn open_connection(
    path: &str,
    wal_mode: bool,
) -> Result<tokio_rusqlite::Connection, VaultError> {
    if let Some(parent) = std::path::Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| VaultError::Storage {
            source: Box::new(e),
        })?;
    }

    let conn = tokio_rusqlite::Connection::open(path)
        .await
        .map_err(|e| VaultError::Storage {
            source: Box::new(e),
        })?;

    conn.call(move |conn| -> Result<(), rusqlite::Error> {
        if wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", 5000)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    })
    .await
    .map_err(map_tr_err)?;

    debug!(path = %path, wal_mode, "database opened");
    Ok(conn)
}

/// Secret persistence backed by the `tenant_secrets` table.
#[derive(Clone)]
pub struct SqlitePersistence {
    conn: tokio_rusqlite::Connection,
}

impl SqlitePersistence {
    /// Wrap an already-opened connection (see [`open_connection`]).
    pub fn new(conn: tokio_rusqlite::Connection) -> Self {
        Self { conn }
    }

    /// Open the database at `path` and wrap it.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, VaultError> {
        Ok(Self::new(open_connection(path, wal_mode).await?))
    }

    /// Returns a reference to the underlying database connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

#[async_trait]
impl SecretPersistence for SqlitePersistence {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn upsert(
        &self,
        tenant: &TenantId,
        key: SecretKey,
        envelope: String,
    ) -> Result<(), VaultError> {
        let tenant = tenant.as_str().to_string();
        let key = key.as_str();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO tenant_secrets (tenant_id, secret_key, envelope) VALUES (?1, ?2, ?3)
                     ON CONFLICT (tenant_id, secret_key) DO UPDATE SET
                         envelope = excluded.envelope,
                         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                    params![tenant, key, envelope],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn find(&self, tenant: &TenantId, key: SecretKey) -> Result<Option<String>, VaultError> {
        let tenant = tenant.as_str().to_string();
        let key = key.as_str();
        self.conn
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                let result = conn.query_row(
                    "SELECT envelope FROM tenant_secrets WHERE tenant_id = ?1 AND secret_key = ?2",
                    params![tenant, key],
                    |row| row.get::<_, String>(0),
                );
                match result {
                    Ok(envelope) => Ok(Some(envelope)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete(&self, tenant: &TenantId, key: SecretKey) -> Result<bool, VaultError> {
        let tenant = tenant.as_str().to_string();
        let key = key.as_str();
        self.conn
            .call(move |conn| -> Result<bool, rusqlite::Error> {
                let removed = conn.execute(
                    "DELETE FROM tenant_secrets WHERE tenant_id = ?1 AND secret_key = ?2",
                    params![tenant, key],
                )?;
                Ok(removed > 0)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn health_check(&self) -> Result<HealthStatus, VaultError> {
        let probe = self
            .conn
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM tenant_secrets", [], |row| row.get(0))
            })
            .await;
        Ok(match probe {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("tenant_secrets unreadable: {e}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open_test_db() -> (SqlitePersistence, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("test.db");
        let store = SqlitePersistence::open(db_path.to_str().unwrap(), true)
            .await
            .unwrap();
        (store, dir)
    }

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).unwrap()
    }

    #[tokio::test]
    async fn upsert_find_delete_lifecycle() {
        let (store, _dir) = open_test_db().await;
        let t = tenant("acme");

        assert!(store.find(&t, SecretKey::AwsRoleArn).await.unwrap().is_none());

        store
            .upsert(&t, SecretKey::AwsRoleArn, "aa:bb:cc".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.find(&t, SecretKey::AwsRoleArn).await.unwrap().as_deref(),
            Some("aa:bb:cc")
        );

        assert!(store.delete(&t, SecretKey::AwsRoleArn).await.unwrap());
        assert!(!store.delete(&t, SecretKey::AwsRoleArn).await.unwrap());
        assert!(store.find(&t, SecretKey::AwsRoleArn).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_overwrites_last_write_wins() {
        let (store, _dir) = open_test_db().await;
        let t = tenant("acme");
        store
            .upsert(&t, SecretKey::GcpProjectId, "01:02:03".to_string())
            .await
            .unwrap();
        store
            .upsert(&t, SecretKey::GcpProjectId, "04:05:06".to_string())
            .await
            .unwrap();

        assert_eq!(
            store.find(&t, SecretKey::GcpProjectId).await.unwrap().as_deref(),
            Some("04:05:06")
        );
        let rows: i64 = store
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM tenant_secrets", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn tenants_are_isolated() {
        let (store, _dir) = open_test_db().await;
        store
            .upsert(&tenant("a"), SecretKey::AzureClientSecret, "aa:aa:aa".to_string())
            .await
            .unwrap();

        assert!(
            store
                .find(&tenant("b"), SecretKey::AzureClientSecret)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete(&tenant("b"), SecretKey::AzureClientSecret).await.unwrap());
    }

    #[tokio::test]
    async fn reopen_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let path = path.to_str().unwrap();
        {
            let store = SqlitePersistence::open(path, false).await.unwrap();
            store
                .upsert(&tenant("acme"), SecretKey::OracleFingerprint, "ab:cd:ef".to_string())
                .await
                .unwrap();
        }
        let store = SqlitePersistence::open(path, false).await.unwrap();
        assert!(
            store
                .find(&tenant("acme"), SecretKey::OracleFingerprint)
                .await
                .unwrap()
                .is_some()
        );
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
