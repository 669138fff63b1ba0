// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cloudvault doctor` command implementation.
//!
//! Checks configuration, master secret availability, the database and the
//! platform delegation identity without touching any tenant secret.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use cloudvault_config::CloudvaultConfig;
use cloudvault_vault::prompt::MASTER_SECRET_ENV_VAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name,
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run every check and print a report. Returns whether any check failed.
pub async fn run_doctor(config: &CloudvaultConfig, deep: bool, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![
        check_master_secret(config),
        check_database(&config.storage.database_path).await,
        check_platform_identity(config),
    ];
    if deep {
        results.push(check_db_integrity(&config.storage.database_path).await);
    }

    println!();
    println!("  cloudvault doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result, use_color));
    }
    println!();

    let failures = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
    let warnings = results.iter().filter(|r| r.status == CheckStatus::Warn).count();
    match failures + warnings {
        0 => println!("  All checks passed."),
        1 => println!("  1 issue found."),
        n => println!("  {n} issues found."),
    }
    println!();

    failures > 0
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<20} {} ({ms}ms)", result.name, result.message)
    }
}

/// The master secret must be available without prompting.
fn check_master_secret(config: &CloudvaultConfig) -> CheckResult {
    let start = Instant::now();
    let from_config = config
        .vault
        .master_secret
        .as_deref()
        .is_some_and(|s| !s.is_empty());
    let from_env = std::env::var(MASTER_SECRET_ENV_VAR).is_ok_and(|s| !s.is_empty());

    if from_config || from_env {
        CheckResult::new("Master secret", CheckStatus::Pass, "available", start)
    } else if std::io::stdin().is_terminal() {
        CheckResult::new(
            "Master secret",
            CheckStatus::Warn,
            "not configured; commands will prompt for it",
            start,
        )
    } else {
        CheckResult::new(
            "Master secret",
            CheckStatus::Fail,
            format!("not configured; set {MASTER_SECRET_ENV_VAR}"),
            start,
        )
    }
}

/// Database file exists, opens, and holds the secrets table.
async fn check_database(db_path: &str) -> CheckResult {
    let start = Instant::now();
    if !std::path::Path::new(db_path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first write)"),
            start,
        );
    }

    let conn = match tokio_rusqlite::Connection::open(db_path).await {
        Ok(conn) => conn,
        Err(e) => {
            return CheckResult::new("Database", CheckStatus::Fail, format!("open failed: {e}"), start);
        }
    };
    let counted = conn
        .call(|conn| -> Result<(i64, i64), rusqlite::Error> {
            let secrets = conn.query_row("SELECT COUNT(*) FROM tenant_secrets", [], |r| r.get(0))?;
            let tenants = conn.query_row(
                "SELECT COUNT(DISTINCT tenant_id) FROM tenant_secrets",
                [],
                |r| r.get(0),
            )?;
            Ok((secrets, tenants))
        })
        .await;

    match counted {
        Ok((secrets, tenants)) => CheckResult::new(
            "Database",
            CheckStatus::Pass,
            format!("{secrets} secret(s) across {tenants} tenant(s)"),
            start,
        ),
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, format!("query failed: {e}"), start),
    }
}

/// Delegation needs both platform keys; direct access works without them.
fn check_platform_identity(config: &CloudvaultConfig) -> CheckResult {
    let start = Instant::now();
    match (&config.aws.access_key_id, &config.aws.secret_access_key) {
        (Some(_), Some(_)) => CheckResult::new(
            "Platform identity",
            CheckStatus::Pass,
            format!("configured (region {})", config.aws.region),
            start,
        ),
        _ => CheckResult::new(
            "Platform identity",
            CheckStatus::Warn,
            "not configured; AWS role delegation is unavailable",
            start,
        ),
    }
}

/// Deep check: SQLite integrity check.
async fn check_db_integrity(db_path: &str) -> CheckResult {
    let start = Instant::now();
    if !std::path::Path::new(db_path).exists() {
        return CheckResult::new("DB integrity", CheckStatus::Warn, "database not found (skipped)", start);
    }

    let conn = match tokio_rusqlite::Connection::open(db_path).await {
        Ok(conn) => conn,
        Err(e) => {
            return CheckResult::new("DB integrity", CheckStatus::Fail, format!("open failed: {e}"), start);
        }
    };
    let rows = conn
        .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare("PRAGMA integrity_check")?;
            let rows = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(rows)
        })
        .await;

    match rows {
        Ok(rows) if rows.len() == 1 && rows[0] == "ok" => {
            CheckResult::new("DB integrity", CheckStatus::Pass, "ok", start)
        }
        Ok(rows) => CheckResult::new(
            "DB integrity",
            CheckStatus::Fail,
            format!("{} issue(s) found", rows.len()),
            start,
        ),
        Err(e) => CheckResult::new("DB integrity", CheckStatus::Fail, format!("check failed: {e}"), start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_database_warns() {
        let result = check_database("/tmp/nonexistent-cloudvault-test-xyz.db").await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.contains("not found"));
    }

    #[tokio::test]
    async fn initialized_database_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doctor.db");
        let path = path.to_string_lossy().to_string();
        cloudvault_vault::persistence::open_connection(&path, true)
            .await
            .unwrap();

        let result = check_database(&path).await;
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.contains("0 secret(s)"));

        let integrity = check_db_integrity(&path).await;
        assert_eq!(integrity.status, CheckStatus::Pass);
    }

    #[test]
    fn half_platform_identity_warns() {
        let mut config = CloudvaultConfig::default();
        config.aws.access_key_id = Some("AKIAPLATFORM".to_string());
        assert_eq!(check_platform_identity(&config).status, CheckStatus::Warn);
        config.aws.secret_access_key = Some("secret".to_string());
        assert_eq!(check_platform_identity(&config).status, CheckStatus::Pass);
    }

    #[test]
    fn plain_rendering_tags_status() {
        let result = CheckResult {
            name: "Database",
            status: CheckStatus::Fail,
            message: "open failed".to_string(),
            duration: Duration::from_millis(3),
        };
        let line = render_line(&result, false);
        assert!(line.contains("[FAIL]"));
        assert!(line.contains("open failed"));
    }
}
