// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Local};

use crate::error::ValidationError;
use crate::event::{self, EventDraft, EventField, SubmitIntent};
use crate::ports::{ActionDispatcher, ActiveEventSource, AlertPresenter};

pub const DATE_RANGE_ERROR_TITLE: &str = "Error";
pub const DATE_RANGE_ERROR_MESSAGE: &str = "La Fecha Fin debe ser mayor a la Fecha Inicio";
pub const DATE_RANGE_ERROR_KIND: &str = "error";

/// The lifecycle of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// The draft is being edited, initial state.
    Editing,

    /// The draft passed validation and its intent was dispatched.
    Submitted,

    /// The form was closed without submitting, the draft is discarded.
    Cancelled,
}

/// Event creation/edit form.
///
/// Owns the draft, enforces the submission rules and reports the outcome to
/// the injected dispatcher and alert presenter.
#[derive(Debug)]
pub struct EventForm<D: ActionDispatcher, A: AlertPresenter> {
    draft: EventDraft,
    state: FormState,
    title_invalid: bool,
    dispatcher: D,
    alert: A,
}

impl<D: ActionDispatcher, A: AlertPresenter> EventForm<D, A> {
    /// Opens the form on the source's active event, or on a blank draft.
    pub fn open(source: &impl ActiveEventSource, now: &DateTime<Local>, dispatcher: D, alert: A) -> Self {
        let draft = event::initialize(source.active_event().as_ref(), now);
        tracing::debug!(?draft.origin, "opening event form");
        Self {
            draft,
            state: FormState::Editing,
            title_invalid: false,
            dispatcher,
            alert,
        }
    }

    /// Re-seeds the draft and returns to editing, e.g. when a closed modal opens again.
    pub fn reopen(&mut self, source: &impl ActiveEventSource, now: &DateTime<Local>) {
        self.draft = event::initialize(source.active_event().as_ref(), now);
        self.state = FormState::Editing;
        self.title_invalid = false;
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether the title field should be shown as invalid.
    pub fn is_title_invalid(&self) -> bool {
        self.title_invalid
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    pub fn alert_mut(&mut self) -> &mut A {
        &mut self.alert
    }

    pub fn into_parts(self) -> (D, A) {
        (self.dispatcher, self.alert)
    }

    pub fn update_field(&mut self, field: EventField, value: impl Into<String>) {
        if !self.is_editing() {
            tracing::warn!(%field, state = ?self.state, "ignoring update on a closed form");
            return;
        }

        self.draft = event::update_field(std::mem::take(&mut self.draft), field, value);
        if field == EventField::Title {
            self.title_invalid = false;
        }
        tracing::debug!(%field, "field updated");
    }

    pub fn update_start(&mut self, start: DateTime<Local>) {
        if !self.is_editing() {
            tracing::warn!(state = ?self.state, "ignoring start update on a closed form");
            return;
        }

        self.draft = event::update_start(std::mem::take(&mut self.draft), start);
        tracing::debug!(%start, "start updated");
    }

    pub fn update_end(&mut self, end: DateTime<Local>) {
        if !self.is_editing() {
            tracing::warn!(state = ?self.state, "ignoring end update on a closed form");
            return;
        }

        self.draft = event::update_end(std::mem::take(&mut self.draft), end);
        tracing::debug!(%end, "end updated");
    }

    /// Validates the draft and, when valid, dispatches its intent and clears
    /// the active event.
    ///
    /// Only a form in [`FormState::Editing`] has side effects. A submitted form
    /// returns its intent again without dispatching it twice, and a cancelled
    /// form reports [`ValidationError::Cancelled`].
    pub fn submit(&mut self) -> Result<SubmitIntent, ValidationError> {
        if self.state == FormState::Cancelled {
            tracing::debug!("submit on a cancelled form");
            return Err(ValidationError::Cancelled);
        }

        let result = event::submit(&self.draft);
        if !self.is_editing() {
            tracing::debug!(state = ?self.state, "submit on a closed form has no effect");
            return result;
        }

        match &result {
            Ok(intent) => {
                self.title_invalid = false;
                match intent {
                    SubmitIntent::Create(draft) => {
                        tracing::info!(title = %draft.title, "dispatching new event");
                        self.dispatcher.dispatch_create(draft.clone());
                    }
                    SubmitIntent::Update(draft) => {
                        tracing::info!(id = ?draft.id, title = %draft.title, "dispatching event update");
                        self.dispatcher.dispatch_update(draft.clone());
                    }
                }
                self.dispatcher.clear_active_event();
                self.state = FormState::Submitted;
            }
            Err(ValidationError::MissingTitle) => {
                tracing::debug!("submit refused, title is missing");
                self.title_invalid = true;
            }
            Err(ValidationError::InvalidDateRange) => {
                tracing::debug!(start = %self.draft.start, end = %self.draft.end, "submit refused, invalid range");
                self.alert.show_error(
                    DATE_RANGE_ERROR_TITLE,
                    DATE_RANGE_ERROR_MESSAGE,
                    DATE_RANGE_ERROR_KIND,
                );
            }
            Err(ValidationError::Cancelled) => {}
        }
        result
    }

    /// Closes the form without submitting. Nothing is dispatched.
    pub fn cancel(&mut self) {
        if self.is_editing() {
            tracing::debug!("event form cancelled");
            self.state = FormState::Cancelled;
        }
    }

    fn is_editing(&self) -> bool {
        self.state == FormState::Editing
    }
}
