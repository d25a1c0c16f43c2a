// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod component;
mod component_alert;
mod component_form;
mod component_page;
mod dispatcher;
mod event_editor;
mod event_store;

pub use app::{draft_event, edit_event};
