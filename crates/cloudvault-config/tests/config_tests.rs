// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Cloudvault configuration system.

use cloudvault_config::diagnostic::ConfigError;
use cloudvault_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[log]
level = "debug"

[vault]
master_secret = "0123456789abcdef0123"
kdf_memory_cost = 32768
kdf_iterations = 2
kdf_parallelism = 1

[storage]
database_path = "/tmp/cloudvault-test.db"
wal_mode = false

[aws]
access_key_id = "AKIAPLATFORMEXAMPLE"
secret_access_key = "platform-secret"
region = "eu-central-1"

[azure]
authority_url = "http://127.0.0.1:9000"

[verify]
timeout_secs = 5
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should load");
    assert_eq!(config.log.level, "debug");
    assert_eq!(
        config.vault.master_secret.as_deref(),
        Some("0123456789abcdef0123")
    );
    assert_eq!(config.vault.kdf_iterations, 2);
    assert_eq!(config.storage.database_path, "/tmp/cloudvault-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.aws.region, "eu-central-1");
    assert_eq!(config.azure.authority_url, "http://127.0.0.1:9000");
    assert_eq!(config.azure.management_url, "https://management.azure.com");
    assert_eq!(config.verify.timeout_secs, 5);
}

/// Empty input falls back to compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.aws.region, "us-east-1");
    assert!(config.aws.access_key_id.is_none());
}

/// Unknown field in [vault] is reported with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[vault]
master_secert = "0123456789abcdef"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "master_secret"
        )
    });
    assert!(found, "expected a master_secret suggestion, got: {errors:?}");
}

/// Wrong value type is reported as InvalidType.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[verify]
timeout_secs = "fast"
"#;

    let err = load_config_from_str(toml).expect_err("should reject string timeout");
    assert!(format!("{err}").contains("timeout_secs") || format!("{err}").contains("invalid type"));
}

/// Semantic validation failures surface through the high-level loader.
#[test]
fn validation_errors_surface() {
    let toml = r#"
[aws]
secret_access_key = "only-half"
"#;

    let errors = load_and_validate_str(toml).expect_err("half pair should fail");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("set together"))));
}

/// `CLOUDVAULT_*` env vars override file values, splitting on the section only.
#[test]
#[serial_test::serial]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "cloudvault.toml",
            r#"
[aws]
region = "us-west-2"
"#,
        )?;
        jail.set_env("CLOUDVAULT_AWS_REGION", "ap-southeast-2");
        jail.set_env("CLOUDVAULT_AWS_ACCESS_KEY_ID", "AKIAFROMENV");
        jail.set_env("CLOUDVAULT_AWS_SECRET_ACCESS_KEY", "secret-from-env");

        let config = cloudvault_config::load_config_from_path(std::path::Path::new(
            "cloudvault.toml",
        ))?;
        assert_eq!(config.aws.region, "ap-southeast-2");
        assert_eq!(config.aws.access_key_id.as_deref(), Some("AKIAFROMENV"));
        assert_eq!(
            config.aws.secret_access_key.as_deref(),
            Some("secret-from-env")
        );
        Ok(())
    });
}
