use riv_core::dates::{format_legacy_date, parse_legacy_date};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DateArgs;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct DateResponse {
    input: String,
    display: String,
    /// ISO-8601 local timestamp, absent when the input did not parse.
    parsed: Option<String>,
}

fn describe(text: &str) -> DateResponse {
    DateResponse {
        input: text.to_string(),
        display: format_legacy_date(text),
        parsed: parse_legacy_date(text)
            .ok()
            .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
    }
}

/// Handle `riv date`.
pub fn handle(args: &DateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&describe(&args.text), flags.format)
}
