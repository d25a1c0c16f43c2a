// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::Path;

use crate::error::StoreError;
use crate::event::{ActiveEvent, CalendarEvent, EventDraft};
use crate::io::{load_events, save_events};
use crate::ports::{ActionDispatcher, ActiveEventSource, StoreAction};

/// Application state of the calendar: the events, the one being edited and
/// whether the event modal is open.
#[derive(Debug, Default, Clone)]
pub struct CalendarStore {
    events: Vec<CalendarEvent>,
    active: Option<String>,
    modal_open: bool,
}

impl CalendarStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            active: None,
            modal_open: false,
        }
    }

    /// Loads the events file at `path`, a missing file gives an empty store.
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(load_events(path).await?))
    }

    pub async fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        save_events(path, &self.events).await
    }

    /// The events, in insertion order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// The events ordered by start time.
    pub fn events_by_start(&self) -> Vec<&CalendarEvent> {
        let mut events: Vec<_> = self.events.iter().collect();
        events.sort_by_key(|e| e.start);
        events
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Marks the event as the one being edited.
    pub fn set_active(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::EventNotFound(id.to_owned()));
        }
        self.active = Some(id.to_owned());
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn remove(&mut self, id: &str) -> Result<CalendarEvent, StoreError> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::EventNotFound(id.to_owned()))?;

        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(self.events.remove(index))
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Applies a recorded intent.
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::Create(draft) => self.create(draft),
            StoreAction::Update(draft) => self.update(draft),
            StoreAction::ClearActiveEvent => self.clear_active(),
        }
    }

    fn create(&mut self, draft: EventDraft) {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::info!(%id, title = %draft.title, "event created");
        self.events.push(CalendarEvent {
            id,
            title: draft.title,
            notes: draft.notes,
            start: draft.start,
            end: draft.end,
        });
    }

    fn update(&mut self, draft: EventDraft) {
        let Some(id) = draft.id else {
            tracing::warn!(title = %draft.title, "update without event id, ignoring");
            return;
        };

        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                tracing::info!(%id, title = %draft.title, "event updated");
                event.title = draft.title;
                event.notes = draft.notes;
                event.start = draft.start;
                event.end = draft.end;
            }
            None => tracing::warn!(%id, "update for unknown event, ignoring"),
        }
    }
}

impl ActionDispatcher for CalendarStore {
    fn dispatch_create(&mut self, event: EventDraft) {
        self.apply(StoreAction::Create(event));
    }

    fn dispatch_update(&mut self, event: EventDraft) {
        self.apply(StoreAction::Update(event));
    }

    fn clear_active_event(&mut self) {
        self.apply(StoreAction::ClearActiveEvent);
    }
}

impl ActiveEventSource for CalendarStore {
    fn active_event(&self) -> Option<ActiveEvent> {
        self.active
            .as_deref()
            .and_then(|id| self.get(id))
            .map(ActiveEvent::from)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, TimeDelta, TimeZone};

    use super::*;
    use crate::event::DraftOrigin;

    fn at(h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 9, 2, h, 0, 0).single().unwrap()
    }

    fn event(id: &str, title: &str, h: u32) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            notes: String::new(),
            start: at(h),
            end: at(h) + TimeDelta::hours(1),
        }
    }

    fn draft(id: Option<&str>, title: &str) -> EventDraft {
        EventDraft {
            id: id.map(str::to_string),
            title: title.to_string(),
            notes: "n".to_string(),
            start: at(12),
            end: at(13),
            origin: match id {
                Some(_) => DraftOrigin::Existing,
                None => DraftOrigin::New,
            },
        }
    }

    #[test]
    fn create_assigns_fresh_id() {
        let mut store = CalendarStore::default();
        store.apply(StoreAction::Create(draft(None, "a")));
        store.apply(StoreAction::Create(draft(None, "b")));

        let events = store.events();
        assert_eq!(events.len(), 2);
        assert_ne!(events[0].id, events[1].id);
        assert_eq!(events[1].title, "b");
        assert_eq!(events[1].notes, "n");
    }

    #[test]
    fn update_replaces_fields_by_id() {
        let mut store = CalendarStore::new(vec![event("e1", "old", 9), event("e2", "other", 10)]);
        store.apply(StoreAction::Update(draft(Some("e1"), "new")));

        let e1 = store.get("e1").unwrap();
        assert_eq!(e1.title, "new");
        assert_eq!(e1.start, at(12));
        assert_eq!(store.get("e2").unwrap().title, "other");
    }

    #[test]
    fn update_for_unknown_or_missing_id_is_ignored() {
        let mut store = CalendarStore::new(vec![event("e1", "old", 9)]);
        store.apply(StoreAction::Update(draft(Some("nope"), "new")));
        store.apply(StoreAction::Update(draft(None, "new")));

        assert_eq!(store.events().len(), 1);
        assert_eq!(store.get("e1").unwrap().title, "old");
    }

    #[test]
    fn active_event_follows_selection() {
        let mut store = CalendarStore::new(vec![event("e1", "standup", 9)]);
        assert_eq!(store.active_event(), None);

        store.set_active("e1").unwrap();
        let active = store.active_event().unwrap();
        assert_eq!(active.id.as_deref(), Some("e1"));
        assert_eq!(active.title, "standup");

        store.clear_active_event();
        assert_eq!(store.active_event(), None);
    }

    #[test]
    fn set_active_rejects_unknown_id() {
        let mut store = CalendarStore::default();
        assert_eq!(
            store.set_active("missing"),
            Err(StoreError::EventNotFound("missing".to_string()))
        );
    }

    #[test]
    fn remove_clears_active_selection() {
        let mut store = CalendarStore::new(vec![event("e1", "a", 9), event("e2", "b", 10)]);
        store.set_active("e1").unwrap();

        let removed = store.remove("e1").unwrap();
        assert_eq!(removed.title, "a");
        assert_eq!(store.active_id(), None);
        assert!(store.remove("e1").is_err());
    }

    #[test]
    fn events_by_start_sorts() {
        let store = CalendarStore::new(vec![event("late", "b", 15), event("early", "a", 8)]);
        let ids: Vec<_> = store.events_by_start().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn modal_flag_toggles() {
        let mut store = CalendarStore::default();
        assert!(!store.is_modal_open());
        store.open_modal();
        assert!(store.is_modal_open());
        store.close_modal();
        assert!(!store.is_modal_open());
    }
}
