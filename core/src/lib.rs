// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of calmodal: the calendar event form, its validation rules and the
//! calendar store that acts on the form's intents.

mod config;
mod datetime;
mod error;
mod event;
mod form;
mod io;
mod ports;
mod store;

pub use crate::config::{APP_NAME, Config};
pub use crate::datetime::{default_range, format_datetime, parse_datetime};
pub use crate::error::{StoreError, ValidationError};
pub use crate::event::{
    ActiveEvent, CalendarEvent, DraftOrigin, EventDraft, EventField, SubmitIntent, initialize,
    submit, update_end, update_field, update_start,
};
pub use crate::form::{
    DATE_RANGE_ERROR_KIND, DATE_RANGE_ERROR_MESSAGE, DATE_RANGE_ERROR_TITLE, EventForm, FormState,
};
pub use crate::io::{load_events, save_events};
pub use crate::ports::{ActionDispatcher, ActiveEventSource, Alert, AlertPresenter, StoreAction};
pub use crate::store::CalendarStore;
