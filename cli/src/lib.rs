// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface for calmodal: create, edit, list and delete
//! calendar events, with a terminal modal for interactive editing.

mod cli;
mod cmd_event;
mod config;
mod event_formatter;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew, EventArgs};
