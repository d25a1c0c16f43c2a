// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use crate::tui::component_alert::{AlertPopup, AlertSource};
use crate::tui::component_form::{Access, Form, FormItem, Input};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::FormStoreLike;

pub type EventEditor<S> = AlertPopup<S, SinglePage<S, Form<S, Box<dyn FormItem<S>>>>>;

pub fn new_event_editor<S>(title: &str) -> EventEditor<S>
where
    S: FormStoreLike + AlertSource + 'static,
{
    AlertPopup::new(SinglePage::new(title.to_owned(), new_event_form()))
}

pub fn new_event_form<S: FormStoreLike + 'static>() -> Form<S, Box<dyn FormItem<S>>> {
    Form::new(vec![
        Box::new(new_title()),
        Box::new(new_notes()),
        Box::new(new_start()),
        Box::new(new_end()),
    ])
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $action: ident, |$s: ident| $get: expr, |$i: ident| $invalid: expr) => {
        fn $fn<S: FormStoreLike>() -> Input<S, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl<S: FormStoreLike> Access<S, String> for $acc {
            fn get(store: &RefCell<S>) -> String {
                let store = store.borrow();
                let $s = store.form_store();
                $get.to_owned()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }

            fn is_invalid(store: &RefCell<S>) -> bool {
                let store = store.borrow();
                let $i = store.form_store();
                $invalid
            }
        }
    };
}

new_input!(
    new_title,
    "Title",
    TitleAccess,
    UpdateTitle,
    |s| s.title(),
    |s| s.is_title_invalid()
);
new_input!(
    new_notes,
    "Notes",
    NotesAccess,
    UpdateNotes,
    |s| s.notes(),
    |_s| false
);
new_input!(
    new_start,
    "Start (YYYY-MM-DD HH:MM)",
    StartAccess,
    UpdateStart,
    |s| s.start.as_str(),
    |s| s.start_invalid
);
new_input!(
    new_end,
    "End (YYYY-MM-DD HH:MM)",
    EndAccess,
    UpdateEnd,
    |s| s.end.as_str(),
    |s| s.end_invalid
);

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use calmodal_core::ActiveEvent;
    use chrono::{DateTime, Local, TimeZone};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::prelude::*;

    use super::*;
    use crate::tui::component::{Component, Message};
    use crate::tui::event_store::FormStore;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 12, 10, 37, 0).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (Rc<RefCell<FormStore>>, Dispatcher, EventEditor<FormStore>) {
        let store = Rc::new(RefCell::new(FormStore::new(&None::<ActiveEvent>, &now())));
        let mut dispatcher = Dispatcher::new();
        FormStore::register_to(store.clone(), &mut dispatcher);
        let mut editor = new_event_editor("New Event");
        editor.activate(&mut dispatcher, &store);
        (store, dispatcher, editor)
    }

    fn type_str(
        editor: &mut EventEditor<FormStore>,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<FormStore>>,
        text: &str,
    ) {
        for c in text.chars() {
            editor.on_key(dispatcher, store, area(), key(KeyCode::Char(c)));
        }
    }

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_typing_title_and_submit() {
        let (store, mut dispatcher, mut editor) = setup();
        type_str(&mut editor, &mut dispatcher, &store, "Hola pruebas");
        assert_eq!(store.borrow().title(), "Hola pruebas");

        editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Enter));
        assert!(store.borrow().is_closed());
    }

    #[test]
    fn test_enter_on_empty_title_marks_it_invalid() {
        let (store, mut dispatcher, mut editor) = setup();
        editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Enter));
        assert!(!store.borrow().is_closed());
        assert!(store.borrow().is_title_invalid());
    }

    #[test]
    fn test_bad_end_text_marks_end_invalid() {
        let (store, mut dispatcher, mut editor) = setup();
        for _ in 0..3 {
            editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Down));
        }
        type_str(&mut editor, &mut dispatcher, &store, "x");
        assert_eq!(store.borrow().end, "2025-06-12 12:00x");
        assert!(store.borrow().end_invalid);
    }

    #[test]
    fn test_invalid_range_alert_then_dismiss() {
        let (store, mut dispatcher, mut editor) = setup();
        type_str(&mut editor, &mut dispatcher, &store, "Retro");
        for _ in 0..3 {
            editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Down));
        }
        for _ in 0.."2025-06-12 12:00".len() {
            editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Backspace));
        }
        type_str(&mut editor, &mut dispatcher, &store, "10:37");
        editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Enter));
        assert!(store.borrow().alert().is_some());

        let msg = editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Esc));
        assert_eq!(msg, Some(Message::CursorUpdated));
        assert!(store.borrow().alert().is_none());
        assert!(!store.borrow().is_closed());
    }

    #[test]
    fn test_esc_cancels() {
        let (store, mut dispatcher, mut editor) = setup();
        let msg = editor.on_key(&mut dispatcher, &store, area(), key(KeyCode::Esc));
        assert_eq!(msg, Some(Message::Exit));
        assert_eq!(store.borrow().state(), calmodal_core::FormState::Cancelled);
    }

    #[test]
    fn test_render_draws_fields() {
        let (store, _dispatcher, editor) = setup();
        let mut buf = Buffer::empty(area());
        editor.render(&store, area(), &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("New Event"));
        assert!(text.contains("Title"));
        assert!(text.contains("2025-06-12 11:00"));
    }
}
