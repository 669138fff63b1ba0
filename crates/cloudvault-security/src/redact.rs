// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: Catches known cloud credential formats (AWS key ids,
//!    40-character secret keys, PEM private keys, Bearer tokens).
//! 2. **Exact-match**: Catches tenant values known at call time, such as an
//!    external id or a client secret that has no recognisable shape.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

/// Known secret patterns to redact from output.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // PEM private key blocks (GCP service accounts, OCI API keys).
        Regex::new(r"(?s)-----BEGIN [A-Z ]*PRIVATE KEY-----.*?-----END [A-Z ]*PRIVATE KEY-----")
            .unwrap(),
        // AWS access key ids, long-lived (AKIA) and session (ASIA).
        Regex::new(r"\b(?:AKIA|ASIA)[A-Z0-9]{16}\b").unwrap(),
        // Bearer tokens in headers
        Regex::new(r"Bearer\s+[a-zA-Z0-9._\-]{10,}").unwrap(),
    ]
});

/// AWS secret access keys: exactly 40 chars of `[A-Za-z0-9/+]`. The `regex`
/// crate has no lookaround, so the neighbours are matched and put back.
static SECRET_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^A-Za-z0-9/+])[A-Za-z0-9/+]{40}($|[^A-Za-z0-9/+])").unwrap()
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Redact secrets from a string using regex patterns and exact-match values.
///
/// `known_values` are compared verbatim, longest first, so a value that
/// contains another known value is removed whole.
pub fn redact(input: &str, known_values: &[String]) -> String {
    let mut result = input.to_string();

    // Exact values first: a known value may be shorter than any pattern would catch.
    let mut sorted_values: Vec<&String> = known_values.iter().collect();
    sorted_values.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted_values {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    for pattern in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).into_owned();
    }
    result = SECRET_KEY_PATTERN
        .replace_all(&result, format!("${{1}}{REDACTED}${{2}}").as_str())
        .into_owned();

    result
}

/// A writer wrapper that redacts secrets from output.
///
/// Wraps any `Write` implementor and replaces known secret patterns and
/// registered exact values with `[REDACTED]`.
pub struct RedactingWriter<W> {
    inner: W,
    known_values: Arc<RwLock<Vec<String>>>,
}

impl<W: Write> RedactingWriter<W> {
    /// Create a new redacting writer.
    pub fn new(inner: W, known_values: Arc<RwLock<Vec<String>>>) -> Self {
        Self {
            inner,
            known_values,
        }
    }

    /// Add a value to the shared redaction list.
    pub fn add_known_value(known_values: &Arc<RwLock<Vec<String>>>, value: String) {
        if value.is_empty() {
            return;
        }
        if let Ok(mut values) = known_values.write()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let known = self
            .known_values
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        let redacted = redact(&input, &known);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
