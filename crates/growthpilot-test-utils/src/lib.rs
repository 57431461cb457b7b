// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Growth Pilot workspace.
//!
//! Mock adapters (generative provider, record store) and record fixtures
//! for fast, CI-runnable tests without external services.

pub mod fixtures;
pub mod mock_provider;
pub mod mock_store;

pub use mock_provider::{MockProvider, MockReply};
pub use mock_store::MockRecordStore;
