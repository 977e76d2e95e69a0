// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the daycal-core crate.
//!
//! These tests drive the calendar view, the editor draft and the event store
//! together, the way the terminal screens do.

mod calendar_navigation;
mod config_driven;
mod event_lifecycle;
