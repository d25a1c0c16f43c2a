// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The collaborators an event form talks to.

use crate::event::{ActiveEvent, EventDraft};

/// Receives the intents of a submitted form. Fire-and-forget.
pub trait ActionDispatcher {
    /// Asks for a new event to be created from the draft.
    fn dispatch_create(&mut self, event: EventDraft);

    /// Asks for the event the draft was seeded from to be updated.
    fn dispatch_update(&mut self, event: EventDraft);

    /// Asks for the edit session to end.
    fn clear_active_event(&mut self);
}

/// Shows blocking error dialogs.
pub trait AlertPresenter {
    fn show_error(&mut self, title: &str, message: &str, kind: &str);
}

/// Read-only access to the event currently being edited.
pub trait ActiveEventSource {
    /// The active event, or `None` when a new event is being created.
    fn active_event(&self) -> Option<ActiveEvent>;
}

impl<T: ActionDispatcher + ?Sized> ActionDispatcher for &mut T {
    fn dispatch_create(&mut self, event: EventDraft) {
        (**self).dispatch_create(event);
    }

    fn dispatch_update(&mut self, event: EventDraft) {
        (**self).dispatch_update(event);
    }

    fn clear_active_event(&mut self) {
        (**self).clear_active_event();
    }
}

impl<T: AlertPresenter + ?Sized> AlertPresenter for &mut T {
    fn show_error(&mut self, title: &str, message: &str, kind: &str) {
        (**self).show_error(title, message, kind);
    }
}

impl<T: ActiveEventSource + ?Sized> ActiveEventSource for &T {
    fn active_event(&self) -> Option<ActiveEvent> {
        (**self).active_event()
    }
}

impl ActiveEventSource for Option<ActiveEvent> {
    fn active_event(&self) -> Option<ActiveEvent> {
        self.clone()
    }
}

/// A dispatched intent in recorded form, to be applied to a store later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Create(EventDraft),
    Update(EventDraft),
    ClearActiveEvent,
}

/// Queues intents in dispatch order.
impl ActionDispatcher for Vec<StoreAction> {
    fn dispatch_create(&mut self, event: EventDraft) {
        self.push(StoreAction::Create(event));
    }

    fn dispatch_update(&mut self, event: EventDraft) {
        self.push(StoreAction::Update(event));
    }

    fn clear_active_event(&mut self) {
        self.push(StoreAction::ClearActiveEvent);
    }
}

/// An error dialog in recorded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub kind: String,
}

/// Keeps the most recent alert, for hosts that show one dialog at a time.
impl AlertPresenter for Option<Alert> {
    fn show_error(&mut self, title: &str, message: &str, kind: &str) {
        *self = Some(Alert {
            title: title.to_owned(),
            message: message.to_owned(),
            kind: kind.to_owned(),
        });
    }
}

impl AlertPresenter for Vec<Alert> {
    fn show_error(&mut self, title: &str, message: &str, kind: &str) {
        self.push(Alert {
            title: title.to_owned(),
            message: message.to_owned(),
            kind: kind.to_owned(),
        });
    }
}
