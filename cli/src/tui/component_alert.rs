// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use calmodal_core::Alert;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};

const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 7;

/// Where the popup finds the alert to show.
pub trait AlertSource {
    fn current_alert(&self) -> Option<Alert>;
}

/// Shows the pending alert over the inner component. While it is open, keys
/// never reach the inner component.
pub struct AlertPopup<S: AlertSource, C: Component<S>> {
    inner: C,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: AlertSource, C: Component<S>> AlertPopup<S, C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S: AlertSource, C: Component<S>> Component<S> for AlertPopup<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.inner.render(store, area, buf);

        let Some(alert) = store.borrow().current_alert() else {
            return;
        };

        let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
        let color = match alert.kind.as_str() {
            "error" => Color::Red,
            "warning" => Color::Yellow,
            _ => Color::Blue,
        };
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title(Line::from(format!(" {} ", alert.title).bold()).centered())
            .title_bottom(Line::from(vec![" OK ".into(), "<Enter> ".blue().bold()]).centered())
            .fg(color);

        Clear.render(popup, buf);
        let inner_area = block.inner(popup);
        block.render(popup, buf);
        Paragraph::new(alert.message)
            .wrap(Wrap { trim: true })
            .centered()
            .white()
            .render(inner_area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if store.borrow().current_alert().is_some() {
            return None;
        }
        self.inner.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let has_alert = store.borrow().current_alert().is_some();
        if !has_alert {
            return self.inner.on_key(dispatcher, store, area, event);
        }

        if matches!(event.code, KeyCode::Enter | KeyCode::Esc) {
            dispatcher.dispatch(Action::DismissAlert);
            return Some(Message::CursorUpdated);
        }
        Some(Message::Handled)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.deactivate(dispatcher, store);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
