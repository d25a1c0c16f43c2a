// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Recording collaborators that count every call made by a form

mod fixtures;
mod recorders;

#[allow(unused_imports)]
pub use fixtures::{hola_mundo, local, stored_event, test_now};
#[allow(unused_imports)]
pub use recorders::{RecordingAlerts, RecordingDispatcher};
