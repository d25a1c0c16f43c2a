// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use calmodal_core::CalendarStore;
use chrono::{DateTime, Local};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_editor::{EventEditor, new_event_editor};
use crate::tui::event_store::FormStore;

/// Opens the modal on a blank draft. Returns whether the store changed.
pub fn draft_event(
    calendar: &mut CalendarStore,
    now: &DateTime<Local>,
) -> Result<bool, Box<dyn Error>> {
    calendar.clear_active();
    run_event_modal(calendar, now, "New Event")
}

/// Opens the modal on the event `id`. Returns whether the store changed.
pub fn edit_event(
    calendar: &mut CalendarStore,
    id: &str,
    now: &DateTime<Local>,
) -> Result<bool, Box<dyn Error>> {
    calendar.set_active(id)?;
    run_event_modal(calendar, now, "Edit Event")
}

fn run_event_modal(
    calendar: &mut CalendarStore,
    now: &DateTime<Local>,
    title: &str,
) -> Result<bool, Box<dyn Error>> {
    calendar.open_modal();
    let store = FormStore::new(&*calendar, now);
    let result = run_event_editor(store, title);
    calendar.close_modal();

    let actions = match result {
        Ok(store) => store.into_actions(),
        Err(e) => {
            calendar.clear_active();
            return Err(e);
        }
    };

    let changed = !actions.is_empty();
    for action in actions {
        calendar.apply(action);
    }
    // a cancelled modal ends the edit session too
    calendar.clear_active();
    Ok(changed)
}

fn run_event_editor(store: FormStore, title: &str) -> Result<FormStore, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result: Result<(), Box<dyn Error>> = {
        let mut dispatcher = Dispatcher::new();
        FormStore::register_to(store.clone(), &mut dispatcher);
        let mut view: EventEditor<FormStore> = new_event_editor(title);
        view.activate(&mut dispatcher, &store);

        let mut area = Rect::default();
        loop {
            if let Err(e) = terminal.draw(|frame| {
                area = frame.area();
                draw(&view, &store, frame);
            }) {
                break Err(e.into());
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let msg = view.on_key(&mut dispatcher, &store, area, key);
                    if msg == Some(Message::Exit) || store.borrow().is_closed() {
                        break Ok(());
                    }
                }
                Ok(_) => {} // Resize and mouse events only need a redraw
                Err(e) => break Err(e.into()),
            }
        }
    }; // release dispatcher and view here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    tracing::debug!(state = ?owned_store.state(), "event modal closed");
    Ok(owned_store)
}

fn draw(view: &EventEditor<FormStore>, store: &RefCell<FormStore>, frame: &mut Frame) {
    let area = frame.area();
    view.render(store, area, frame.buffer_mut());

    if let Some(pos) = view.get_cursor_position(store, area) {
        frame.set_cursor_position(pos);
    }
}
