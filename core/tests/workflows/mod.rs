// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the classday-core crate.
//!
//! These tests drive the schedule builder across sessions sharing one state
//! directory, the way the command line uses it.

mod config_driven;
mod persistence_recovery;
mod schedule_lifecycle;
