// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of the vault, broker and verifier from loaded configuration.

use std::sync::{Arc, RwLock};

use cloudvault_broker::{CredentialBroker, ProviderCredentialSchema, StsTokenExchange};
use cloudvault_config::CloudvaultConfig;
use cloudvault_core::{AuditSink, VaultError};
use cloudvault_security::RedactingWriter;
use cloudvault_vault::persistence::open_connection;
use cloudvault_vault::{
    get_master_secret, FanoutAuditSink, SecretAdmin, SecretCodec, SecretStore, SqliteAuditSink,
    SqlitePersistence, TracingAuditSink,
};
use cloudvault_verify::ProviderVerifier;
use secrecy::ExposeSecret;
use tracing::debug;

/// Everything a command needs, built once per invocation.
pub struct Runtime {
    pub store: Arc<SecretStore>,
    pub admin: SecretAdmin,
    pub schema: ProviderCredentialSchema,
    pub broker: Arc<CredentialBroker>,
    pub verifier: ProviderVerifier,
}

impl Runtime {
    /// Open the database, derive the codec key, and assemble the components.
    ///
    /// The master secret and platform secret are added to `redaction` so the
    /// log writer masks them.
    pub async fn open(
        config: &CloudvaultConfig,
        redaction: &Arc<RwLock<Vec<String>>>,
    ) -> Result<Self, VaultError> {
        let master = get_master_secret(config.vault.master_secret.as_deref())?;
        RedactingWriter::<std::io::Stderr>::add_known_value(
            redaction,
            master.expose_secret().to_string(),
        );
        if let Some(secret) = &config.aws.secret_access_key {
            RedactingWriter::<std::io::Stderr>::add_known_value(redaction, secret.clone());
        }

        let codec = Arc::new(SecretCodec::from_master_secret(&master, &config.vault)?);
        let conn = open_connection(&config.storage.database_path, config.storage.wal_mode).await?;
        debug!(path = %config.storage.database_path, "database opened");

        let audit: Arc<dyn AuditSink> = Arc::new(FanoutAuditSink::new(vec![
            Arc::new(SqliteAuditSink::new(conn.clone())),
            Arc::new(TracingAuditSink),
        ]));
        let store = Arc::new(SecretStore::new(
            codec,
            Arc::new(SqlitePersistence::new(conn)),
            audit,
        ));

        let exchange = Arc::new(StsTokenExchange::from_config(&config.aws, &config.verify));
        let broker = Arc::new(CredentialBroker::new(
            store.clone(),
            config.aws.clone(),
            exchange,
        ));
        let verifier = ProviderVerifier::from_config(broker.clone(), config)?;

        Ok(Self {
            admin: SecretAdmin::new(store.clone()),
            schema: ProviderCredentialSchema::new(store.clone()),
            store,
            broker,
            verifier,
        })
    }
}
