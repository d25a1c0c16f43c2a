// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use calmodal_core::{
    ActiveEventSource, Alert, EventField, EventForm, FormState, StoreAction, format_datetime,
    parse_datetime,
};
use chrono::{DateTime, Local};

use crate::tui::component_alert::AlertSource;
use crate::tui::dispatcher::{Action, Dispatcher};

pub trait FormStoreLike {
    fn form_store(&self) -> &FormStore;
}

/// State of the event modal: the form plus the raw text of the date inputs.
#[derive(Debug)]
pub struct FormStore {
    form: EventForm<Vec<StoreAction>, Option<Alert>>,
    now: DateTime<Local>,
    pub start: String,
    pub end: String,
    pub start_invalid: bool,
    pub end_invalid: bool,
}

impl FormStore {
    pub fn new(source: &impl ActiveEventSource, now: &DateTime<Local>) -> Self {
        let form = EventForm::open(source, now, Vec::new(), None);
        let start = format_datetime(&form.draft().start);
        let end = format_datetime(&form.draft().end);
        Self {
            form,
            now: *now,
            start,
            end,
            start_invalid: false,
            end_invalid: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.form.draft().title
    }

    pub fn notes(&self) -> &str {
        &self.form.draft().notes
    }

    pub fn is_title_invalid(&self) -> bool {
        self.form.is_title_invalid()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.form.alert().as_ref()
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    /// Whether the modal is done, either submitted or cancelled.
    pub fn is_closed(&self) -> bool {
        self.form.state() != FormState::Editing
    }

    /// The actions queued by a successful submit, empty otherwise.
    pub fn into_actions(self) -> Vec<StoreAction> {
        let (actions, _) = self.form.into_parts();
        actions
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| match action {
            Action::UpdateTitle(v) => {
                let mut that = that.borrow_mut();
                that.form.update_field(EventField::Title, v.clone());
            }
            Action::UpdateNotes(v) => {
                let mut that = that.borrow_mut();
                that.form.update_field(EventField::Notes, v.clone());
            }
            Action::UpdateStart(v) => {
                let mut that = that.borrow_mut();
                that.start = v.clone();
                match parse_datetime(v, &that.now) {
                    Ok(start) => {
                        that.start_invalid = false;
                        that.form.update_start(start);
                    }
                    Err(_) => that.start_invalid = true,
                }
            }
            Action::UpdateEnd(v) => {
                let mut that = that.borrow_mut();
                that.end = v.clone();
                match parse_datetime(v, &that.now) {
                    Ok(end) => {
                        that.end_invalid = false;
                        that.form.update_end(end);
                    }
                    Err(_) => that.end_invalid = true,
                }
            }
            Action::Submit => {
                let mut that = that.borrow_mut();
                if that.start_invalid || that.end_invalid {
                    tracing::debug!("submit refused, a date field does not parse");
                    return;
                }
                if let Err(err) = that.form.submit() {
                    tracing::debug!(%err, "submit refused");
                }
            }
            Action::Cancel => that.borrow_mut().form.cancel(),
            Action::DismissAlert => *that.borrow_mut().form.alert_mut() = None,
        }));
        dispatcher.register(callback);
    }
}

impl FormStoreLike for FormStore {
    fn form_store(&self) -> &FormStore {
        self
    }
}

impl AlertSource for FormStore {
    fn current_alert(&self) -> Option<Alert> {
        self.alert().cloned()
    }
}

#[cfg(test)]
mod tests {
    use calmodal_core::ActiveEvent;
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 12, 10, 37, 0).unwrap()
    }

    fn setup(source: Option<ActiveEvent>) -> (Rc<RefCell<FormStore>>, Dispatcher) {
        let store = Rc::new(RefCell::new(FormStore::new(&source, &now())));
        let mut dispatcher = Dispatcher::new();
        FormStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher)
    }

    fn hola_mundo() -> ActiveEvent {
        ActiveEvent {
            id: Some("e1".to_string()),
            title: "Hola mundo".to_string(),
            notes: "Alguna nota".to_string(),
            start: Local.with_ymd_and_hms(2025, 6, 12, 11, 0, 0).unwrap(),
            end: Local.with_ymd_and_hms(2025, 6, 12, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_new_formats_default_range() {
        let (store, _) = setup(None);
        let store = store.borrow();
        assert_eq!(store.title(), "");
        assert_eq!(store.start, "2025-06-12 11:00");
        assert_eq!(store.end, "2025-06-12 12:00");
        assert!(!store.is_closed());
    }

    #[test]
    fn test_update_actions_reach_the_draft() {
        let (store, mut dispatcher) = setup(None);
        dispatcher.dispatch(Action::UpdateTitle("Hola pruebas".to_string()));
        dispatcher.dispatch(Action::UpdateNotes("nota".to_string()));
        dispatcher.dispatch(Action::UpdateEnd("2025-06-12 13:30".to_string()));

        let store = store.borrow();
        assert_eq!(store.title(), "Hola pruebas");
        assert_eq!(store.notes(), "nota");
        assert_eq!(store.end, "2025-06-12 13:30");
        assert!(!store.end_invalid);
    }

    #[test]
    fn test_unparsable_date_is_flagged_and_blocks_submit() {
        let (store, mut dispatcher) = setup(Some(hola_mundo()));
        dispatcher.dispatch(Action::UpdateStart("2025-06-".to_string()));
        assert!(store.borrow().start_invalid);
        assert_eq!(store.borrow().start, "2025-06-");

        dispatcher.dispatch(Action::Submit);
        assert!(!store.borrow().is_closed());
        assert!(store.borrow().alert().is_none());

        dispatcher.dispatch(Action::UpdateStart("2025-06-12 11:15".to_string()));
        assert!(!store.borrow().start_invalid);
        dispatcher.dispatch(Action::Submit);
        assert_eq!(store.borrow().state(), FormState::Submitted);
    }

    #[test]
    fn test_half_typed_time_is_flagged() {
        let (store, mut dispatcher) = setup(Some(hola_mundo()));
        dispatcher.dispatch(Action::UpdateEnd("12:7x".to_string()));
        assert!(store.borrow().end_invalid);

        dispatcher.dispatch(Action::Submit);
        assert_eq!(store.borrow().state(), FormState::Editing);
    }

    #[test]
    fn test_single_digit_day_is_accepted() {
        let (store, mut dispatcher) = setup(Some(hola_mundo()));
        dispatcher.dispatch(Action::UpdateStart("2025-06-1".to_string()));
        assert!(!store.borrow().start_invalid);
        assert_eq!(
            store.borrow().form.draft().start,
            Local.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_submit_edit_queues_update_and_clear() {
        let (store, mut dispatcher) = setup(Some(hola_mundo()));
        dispatcher.dispatch(Action::Submit);
        drop(dispatcher);

        let store = Rc::try_unwrap(store).unwrap().into_inner();
        let actions = store.into_actions();
        assert_eq!(actions.len(), 2);
        let StoreAction::Update(draft) = &actions[0] else {
            panic!("expected an update action");
        };
        assert_eq!(draft.title, "Hola mundo");
        assert_eq!(actions[1], StoreAction::ClearActiveEvent);
    }

    #[test]
    fn test_invalid_range_shows_alert_until_dismissed() {
        let (store, mut dispatcher) = setup(None);
        dispatcher.dispatch(Action::UpdateTitle("Hola pruebas".to_string()));
        dispatcher.dispatch(Action::UpdateEnd("10:37".to_string()));
        dispatcher.dispatch(Action::Submit);

        {
            let store = store.borrow();
            let alert = store.alert().unwrap();
            assert_eq!(alert.title, "Error");
            assert_eq!(alert.message, "La Fecha Fin debe ser mayor a la Fecha Inicio");
            assert_eq!(alert.kind, "error");
            assert!(!store.is_closed());
        }

        dispatcher.dispatch(Action::DismissAlert);
        assert!(store.borrow().alert().is_none());
    }

    #[test]
    fn test_missing_title_marks_field() {
        let (store, mut dispatcher) = setup(None);
        dispatcher.dispatch(Action::Submit);
        assert!(store.borrow().is_title_invalid());

        dispatcher.dispatch(Action::UpdateTitle("x".to_string()));
        assert!(!store.borrow().is_title_invalid());
    }

    #[test]
    fn test_cancel_closes_without_actions() {
        let (store, mut dispatcher) = setup(Some(hola_mundo()));
        dispatcher.dispatch(Action::UpdateTitle("changed".to_string()));
        dispatcher.dispatch(Action::Cancel);
        drop(dispatcher);

        let store = Rc::try_unwrap(store).unwrap().into_inner();
        assert_eq!(store.state(), FormState::Cancelled);
        assert!(store.into_actions().is_empty());
    }

    #[test]
    fn test_submit_intent_matches_origin() {
        let (store, mut dispatcher) = setup(None);
        dispatcher.dispatch(Action::UpdateTitle("Nuevo".to_string()));
        dispatcher.dispatch(Action::Submit);
        drop(dispatcher);

        let store = Rc::try_unwrap(store).unwrap().into_inner();
        let actions = store.into_actions();
        assert!(matches!(&actions[0], StoreAction::Create(d) if d.title == "Nuevo"));
    }
}
