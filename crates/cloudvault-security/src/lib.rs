// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output hygiene for Cloudvault.
//!
//! Scrubs cloud credential material out of log lines and provider error
//! messages before they reach an operator or a tenant.

pub mod redact;

pub use redact::{redact, RedactingWriter, REDACTED};
