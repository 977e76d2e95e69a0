// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod app_store;
mod calendar;
mod component;
mod component_form;
mod component_page;
mod dispatcher;
mod event_editor;
mod splash;

pub use app::run_calendar;
