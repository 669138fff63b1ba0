// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloudvault operator CLI.
//!
//! Stores tenant cloud credentials encrypted at rest, reports which providers
//! are configured, resolves credentials and verifies connectivity.

mod doctor;
mod providers;
mod runtime;
mod secret;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use clap::{Parser, Subcommand};
use cloudvault_config::CloudvaultConfig;
use cloudvault_core::{Provider, Purpose, Role, SecretKey, SessionContext, TenantId, VaultError};
use cloudvault_security::RedactingWriter;

use crate::runtime::Runtime;

/// Cloudvault - per-tenant cloud credential vault and broker.
#[derive(Parser, Debug)]
#[command(name = "cloudvault", version, about, long_about = None)]
struct Cli {
    /// Tenant to act on.
    #[arg(long, global = true)]
    tenant: Option<String>,

    /// Actor recorded in the audit log.
    #[arg(long, global = true, default_value = "operator")]
    actor: String,

    /// Session role (admin or member).
    #[arg(long, global = true, default_value = "admin")]
    role: Role,

    /// Configuration file, replacing the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage stored secrets.
    Secret {
        #[command(subcommand)]
        action: SecretCommand,
    },
    /// Show which providers are configured for the tenant.
    Providers {
        /// Print the full status as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Resolve a credential and print a non-secret summary.
    Resolve {
        provider: Provider,
        /// verification (15 min session) or data_plane (1 h session).
        #[arg(long, default_value = "verification")]
        purpose: Purpose,
    },
    /// Verify connectivity for a provider and print the result as JSON.
    Test { provider: Provider },
    /// Run diagnostic checks.
    Doctor {
        /// Also run a database integrity check.
        #[arg(long)]
        deep: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SecretCommand {
    /// Store a value (read from stdin or a prompt unless --value is given).
    Set {
        key: SecretKey,
        #[arg(long)]
        value: Option<String>,
    },
    /// Show presence and masked preview.
    Status {
        key: Option<SecretKey>,
        #[arg(long, conflicts_with = "key")]
        provider: Option<Provider>,
    },
    /// Delete a value, or every value of a provider.
    Revoke {
        key: Option<SecretKey>,
        #[arg(long, conflicts_with = "key")]
        provider: Option<Provider>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => cloudvault_config::load_and_validate_path(path),
        None => cloudvault_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            cloudvault_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let redaction = Arc::new(RwLock::new(Vec::new()));
    init_tracing(&config.log.level, redaction.clone());

    let code = match run(cli, &config, &redaction).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_actionable() {
                eprintln!("hint: run `cloudvault secret status` to see what is configured");
            }
            1
        }
    };
    std::process::exit(code);
}

async fn run(
    cli: Cli,
    config: &CloudvaultConfig,
    redaction: &Arc<RwLock<Vec<String>>>,
) -> Result<i32, VaultError> {
    if let Commands::Doctor { deep, plain } = cli.command {
        let failed = doctor::run_doctor(config, deep, plain).await;
        return Ok(i32::from(failed));
    }

    let tenant = TenantId::new(cli.tenant.clone().ok_or_else(|| {
        VaultError::Configuration("--tenant is required for this command".to_string())
    })?)?;
    let ctx = SessionContext::new(tenant.clone(), cli.actor, cli.role);
    let runtime = Runtime::open(config, redaction).await?;

    match cli.command {
        Commands::Secret { action } => match action {
            SecretCommand::Set { key, value } => secret::run_set(&runtime, &ctx, key, value).await?,
            SecretCommand::Status { key, provider } => {
                secret::run_status(&runtime, &ctx, key, provider).await?
            }
            SecretCommand::Revoke { key, provider } => {
                secret::run_revoke(&runtime, &ctx, key, provider).await?
            }
        },
        Commands::Providers { json } => providers::run_providers(&runtime, &tenant, json).await?,
        Commands::Resolve { provider, purpose } => {
            providers::run_resolve(&runtime, &tenant, provider, purpose).await?
        }
        Commands::Test { provider } => {
            if !providers::run_test(&runtime, &tenant, provider).await? {
                return Ok(2);
            }
        }
        Commands::Doctor { .. } => {}
    }
    Ok(0)
}

/// Install the global subscriber. Output goes through [`RedactingWriter`] so
/// values registered in `redaction` never reach stderr.
fn init_tracing(log_level: &str, redaction: Arc<RwLock<Vec<String>>>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cloudvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), redaction.clone()))
        .init();
}
