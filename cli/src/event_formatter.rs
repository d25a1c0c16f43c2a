// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use calmodal_core::{CalendarEvent, format_datetime};
use chrono::{DateTime, Local};
use colored::Color;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

const SHORT_ID_LEN: usize = 8;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            columns: vec![
                EventColumn::Id { full: false },
                EventColumn::TimeRange { now },
                EventColumn::Title,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        if format == ArgOutputFormat::Json {
            self.columns[0] = EventColumn::Id { full: true };
        }
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.columns[0] = EventColumn::Id { full: true };
            self.columns.push(EventColumn::Notes);
        }
        self
    }

    pub fn format<'a>(&'a self, events: &'a [&'a CalendarEvent]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [&'a CalendarEvent],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.events)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Id { full: bool },
    TimeRange { now: DateTime<Local> },
    Title,
    Notes,
}

impl<'e> TableColumn<&'e CalendarEvent> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id { .. } => "id",
            EventColumn::TimeRange { .. } => "time",
            EventColumn::Title => "title",
            EventColumn::Notes => "notes",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a &'e CalendarEvent) -> Cow<'a, str> {
        match self {
            EventColumn::Id { full: true } => event.id.as_str().into(),
            EventColumn::Id { full: false } => short_id(&event.id).into(),
            EventColumn::TimeRange { .. } => format_time_range(event).into(),
            EventColumn::Title => event.title.as_str().into(),
            EventColumn::Notes => event.notes.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id { .. } => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, event: &&'e CalendarEvent) -> Option<Color> {
        match self {
            EventColumn::TimeRange { now } if event.end <= *now => Some(Color::BrightBlack),
            EventColumn::TimeRange { now } if event.start <= *now => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// The prefix of the id shown in tables, enough to address an event.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

fn format_time_range(event: &CalendarEvent) -> String {
    match event.start.date_naive() == event.end.date_naive() {
        true => format!(
            "{} {}~{}",
            event.start.format("%Y-%m-%d"),
            event.start.format("%H:%M"),
            event.end.format("%H:%M")
        ),
        false => format!(
            "{}~{}",
            format_datetime(&event.start),
            format_datetime(&event.end)
        ),
    }
}
