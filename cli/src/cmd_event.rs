// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calmodal_core::{
    ActiveEventSource, AlertPresenter, CalendarEvent, CalendarStore, EventField, EventForm,
    StoreError, SubmitIntent, ValidationError,
};
use chrono::{DateTime, Local};
use clap::{Arg, ArgMatches, Command, arg};
use colored::Colorize;

use crate::event_formatter::EventFormatter;
use crate::tui;
use crate::util::{ArgOutputFormat, arg_verbose, get_verbose, parse_datetime_arg};

/// Field values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct EventArgs {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl EventArgs {
    fn args() -> [Arg; 4] {
        [
            arg!(--title <TITLE> "Title of the event"),
            arg!(--notes <NOTES> "Free-form notes"),
            arg!(--start <START> "Start time")
                .long_help("Start time, as \"YYYY-MM-DD HH:MM\", \"HH:MM\" (today) or \"YYYY-MM-DD\""),
            arg!(--end <END> "End time, same formats as --start"),
        ]
    }

    fn from(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned();
        Self {
            title: get("title"),
            notes: get("notes"),
            start: get("start"),
            end: get("end"),
        }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.notes.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Fills the form from the flags and submits it, as the modal would.
    ///
    /// Returns whether the store changed. An invalid range is reported through
    /// the alert and leaves the store untouched.
    fn submit(&self, store: &mut CalendarStore, now: &DateTime<Local>) -> Result<bool, Box<dyn Error>> {
        let start = parse_datetime_arg("start", self.start.as_deref(), now)?;
        let end = parse_datetime_arg("end", self.end.as_deref(), now)?;

        let active = store.active_event();
        let mut form = EventForm::open(&active, now, &mut *store, ConsoleAlert);
        if let Some(title) = &self.title {
            form.update_field(EventField::Title, title.as_str());
        }
        if let Some(notes) = &self.notes {
            form.update_field(EventField::Notes, notes.as_str());
        }
        if let Some(start) = start {
            form.update_start(start);
        }
        if let Some(end) = end {
            form.update_end(end);
        }

        match form.submit() {
            Ok(SubmitIntent::Create(_)) => tracing::debug!("event created from flags"),
            Ok(SubmitIntent::Update(_)) => tracing::debug!("event updated from flags"),
            Err(ValidationError::InvalidDateRange) => return Ok(false),
            Err(err) => return Err(err.into()),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub args: EventArgs,
    pub output_format: ArgOutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event, opens the editor when no field is given")
            .args(EventArgs::args())
            .arg(ArgOutputFormat::arg())
            .arg(arg_verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            args: EventArgs::from(matches),
            output_format: ArgOutputFormat::from(matches),
            verbose: get_verbose(matches),
        }
    }

    pub fn run(self, store: &mut CalendarStore, now: &DateTime<Local>) -> Result<bool, Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let before = store.events().len();
        store.clear_active();

        let changed = if self.args.is_empty() {
            tui::draft_event(store, now)?
        } else {
            self.args.submit(store, now)?
        };

        match store.events().get(before..) {
            Some(created) if changed && !created.is_empty() => {
                let created: Vec<_> = created.iter().collect();
                print_events(&created, self.output_format, self.verbose, now);
            }
            _ => tracing::info!("no event created"),
        }
        Ok(changed)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub args: EventArgs,
    pub output_format: ArgOutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event, opens the editor when no field is given")
            .arg(arg_id())
            .args(EventArgs::args())
            .arg(ArgOutputFormat::arg())
            .arg(arg_verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            args: EventArgs::from(matches),
            output_format: ArgOutputFormat::from(matches),
            verbose: get_verbose(matches),
        }
    }

    pub fn run(self, store: &mut CalendarStore, now: &DateTime<Local>) -> Result<bool, Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let id = resolve_id(store, &self.id)?;

        let result = if self.args.is_empty() {
            tui::edit_event(store, &id, now)
        } else {
            store.set_active(&id)?;
            self.args.submit(store, now)
        };
        store.clear_active();
        let changed = result?;

        match store.get(&id) {
            Some(event) if changed => print_events(&[event], self.output_format, self.verbose, now),
            _ => tracing::info!(%id, "event unchanged"),
        }
        Ok(changed)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub output_format: ArgOutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn new() -> Self {
        Self {
            output_format: ArgOutputFormat::Table,
            verbose: false,
        }
    }

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events by start time")
            .arg(ArgOutputFormat::arg())
            .arg(arg_verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
            verbose: get_verbose(matches),
        }
    }

    pub fn run(self, store: &CalendarStore, now: &DateTime<Local>) -> Result<bool, Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        print_events(&store.events_by_start(), self.output_format, self.verbose, now);
        Ok(false)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(arg_id())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub fn run(self, store: &mut CalendarStore) -> Result<bool, Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let id = resolve_id(store, &self.id)?;
        let event = store.remove(&id)?;
        println!("{} {}", "Deleted:".green(), event.title);
        Ok(true)
    }
}

/// Prints the alert of a form to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleAlert;

impl AlertPresenter for ConsoleAlert {
    fn show_error(&mut self, title: &str, message: &str, kind: &str) {
        let title = format!("{title}:");
        let title = match kind {
            "error" => title.red(),
            _ => title.yellow(),
        };
        eprintln!("{title} {message}");
    }
}

fn arg_id() -> Arg {
    arg!(id: <ID> "The id of the event, or a unique prefix of it")
}

fn get_id(matches: &ArgMatches) -> String {
    matches.get_one::<String>("id").cloned().unwrap_or_default()
}

/// Finds the event whose id is `id` or uniquely starts with it.
fn resolve_id(store: &CalendarStore, id: &str) -> Result<String, Box<dyn Error>> {
    if store.get(id).is_some() {
        return Ok(id.to_owned());
    }
    if id.is_empty() {
        return Err(StoreError::EventNotFound(id.to_owned()).into());
    }

    let mut candidates = store.events().iter().filter(|e| e.id.starts_with(id));
    match (candidates.next(), candidates.next()) {
        (Some(event), None) => Ok(event.id.clone()),
        (Some(_), Some(_)) => Err(format!("Ambiguous event id prefix: {id}").into()),
        (None, _) => Err(StoreError::EventNotFound(id.to_owned()).into()),
    }
}

fn print_events(
    events: &[&CalendarEvent],
    output_format: ArgOutputFormat,
    verbose: bool,
    now: &DateTime<Local>,
) {
    let formatter = EventFormatter::new(*now)
        .with_output_format(output_format)
        .with_verbose(verbose);
    print!("{}", formatter.format(events));
}
