// SPDX-FileCopyrightText: 2026 Cloudvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Cloudvault integration tests.
//!
//! Provides mock collaborators and a harness that wires a complete vault,
//! broker and verifier over a temporary SQLite database, so tests run
//! without cloud accounts.
//!
//! # Components
//!
//! - [`MockTokenExchange`] - scripted assume-role outcomes, records every chain
//! - [`MockProbe`] - scripted probe outcomes for one provider
//! - [`TestHarness`] - the full stack with an admin and a member session

pub mod harness;
pub mod mock_exchange;
pub mod mock_probe;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_exchange::{ExchangeOutcome, MockTokenExchange};
pub use mock_probe::MockProbe;
