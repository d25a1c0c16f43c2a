// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calmodal_core::parse_datetime;
use chrono::{DateTime, Local};
use clap::{Arg, ArgMatches, arg, value_parser};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Show more detailed information")
}

pub fn get_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

/// Parses an optional date-time flag, naming the flag in the error.
pub fn parse_datetime_arg(
    name: &str,
    value: Option<&str>,
    now: &DateTime<Local>,
) -> Result<Option<DateTime<Local>>, Box<dyn Error>> {
    value
        .map(|v| {
            parse_datetime(v, now)
                .map_err(|e| Box::<dyn Error>::from(format!("Invalid --{name} '{v}': {e}")))
        })
        .transpose()
}

/// Display width of the first `first_n_graphemes` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n_graphemes: usize) -> usize {
    if first_n_graphemes == 0 || s.is_empty() {
        0
    } else {
        s[..byte_index_of_grapheme(s, first_n_graphemes)].width()
    }
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(byte_start, g)| byte_start..byte_start + g.len())
}

/// Byte offset where the grapheme cluster `g_idx` starts, `s.len()` past the end.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}
