// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calmodal_core::{ActionDispatcher, AlertPresenter, EventDraft};

/// Records every intent, like a mocked store dispatch.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pub created: Vec<EventDraft>,
    pub updated: Vec<EventDraft>,
    pub cleared: usize,
}

impl RecordingDispatcher {
    /// Number of create and update intents received.
    pub fn intents(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch_create(&mut self, event: EventDraft) {
        self.created.push(event);
    }

    fn dispatch_update(&mut self, event: EventDraft) {
        self.updated.push(event);
    }

    fn clear_active_event(&mut self) {
        self.cleared += 1;
    }
}

/// Records every alert as its literal `(title, message, kind)` triple.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    pub calls: Vec<(String, String, String)>,
}

impl AlertPresenter for RecordingAlerts {
    fn show_error(&mut self, title: &str, message: &str, kind: &str) {
        self.calls
            .push((title.to_owned(), message.to_owned(), kind.to_owned()));
    }
}
