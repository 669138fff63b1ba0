// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live, read-only connectivity probes.

pub mod azure;
pub mod s3;

pub use azure::AzureProbe;
pub use s3::S3Probe;
