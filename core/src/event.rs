// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::datetime::default_range;
use crate::error::ValidationError;

/// An event kept in the calendar store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The unique identifier of the event.
    pub id: String,

    /// The title of the event.
    pub title: String,

    /// Free-form notes, may be empty.
    #[serde(default)]
    pub notes: String,

    /// The start date and time of the event.
    pub start: DateTime<Local>,

    /// The end date and time of the event.
    pub end: DateTime<Local>,
}

/// The event currently loaded for editing, supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEvent {
    /// The identifier of the stored event, if it has one.
    pub id: Option<String>,

    pub title: String,
    pub notes: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl From<&CalendarEvent> for ActiveEvent {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            notes: event.notes.clone(),
            start: event.start,
            end: event.end,
        }
    }
}

/// Where a draft came from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DraftOrigin {
    /// Created from defaults, submitting it creates a new event.
    #[default]
    New,

    /// Seeded from an active event, submitting it updates that event.
    Existing,
}

/// The in-progress, not-yet-submitted event record being edited in the form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The identifier of the event being edited, `None` for new events.
    pub id: Option<String>,

    pub title: String,
    pub notes: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,

    pub origin: DraftOrigin,
}

impl EventDraft {
    /// A blank draft for a new event, starting at the next full hour.
    pub fn new(now: &DateTime<Local>) -> Self {
        let (start, end) = default_range(now);
        Self {
            id: None,
            title: String::new(),
            notes: String::new(),
            start,
            end,
            origin: DraftOrigin::New,
        }
    }

    /// Whether submitting this draft updates an existing event.
    pub fn is_existing(&self) -> bool {
        self.origin == DraftOrigin::Existing || self.id.is_some()
    }
}

impl From<&ActiveEvent> for EventDraft {
    fn from(active: &ActiveEvent) -> Self {
        Self {
            id: active.id.clone(),
            title: active.title.clone(),
            notes: active.notes.clone(),
            start: active.start,
            end: active.end,
            origin: DraftOrigin::Existing,
        }
    }
}

/// The free-text fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Title,
    Notes,
}

impl Display for EventField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventField::Title => write!(f, "title"),
            EventField::Notes => write!(f, "notes"),
        }
    }
}

/// The instruction emitted by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitIntent {
    Create(EventDraft),
    Update(EventDraft),
}

impl SubmitIntent {
    pub fn draft(&self) -> &EventDraft {
        match self {
            SubmitIntent::Create(draft) | SubmitIntent::Update(draft) => draft,
        }
    }
}

/// Seeds a draft from the active event, or from defaults when there is none.
pub fn initialize(active: Option<&ActiveEvent>, now: &DateTime<Local>) -> EventDraft {
    match active {
        Some(active) => EventDraft::from(active),
        None => EventDraft::new(now),
    }
}

/// Replaces one text field. Validation is deferred to [`submit`].
pub fn update_field(mut draft: EventDraft, field: EventField, value: impl Into<String>) -> EventDraft {
    match field {
        EventField::Title => draft.title = value.into(),
        EventField::Notes => draft.notes = value.into(),
    }
    draft
}

pub fn update_start(mut draft: EventDraft, start: DateTime<Local>) -> EventDraft {
    draft.start = start;
    draft
}

pub fn update_end(mut draft: EventDraft, end: DateTime<Local>) -> EventDraft {
    draft.end = end;
    draft
}

/// Validates the draft and decides whether it creates or updates an event.
///
/// The title is checked before the date range, so a draft that breaks both
/// rules reports [`ValidationError::MissingTitle`].
pub fn submit(draft: &EventDraft) -> Result<SubmitIntent, ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    if draft.end <= draft.start {
        return Err(ValidationError::InvalidDateRange);
    }

    Ok(match draft.is_existing() {
        true => SubmitIntent::Update(draft.clone()),
        false => SubmitIntent::Create(draft.clone()),
    })
}
