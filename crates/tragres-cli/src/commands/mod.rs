//! CLI command implementations
//!
//! Each subcommand drives one controller and prints its state. Failures are
//! returned rather than printed; `main` reports them and exits non-zero.

pub mod assignments;
pub mod attendance;
pub mod dashboard;
pub mod status;
pub mod students;

use crate::controllers::{today, NoticeLevel, Notifications, ViewState};
use crate::error::{CliError, Result};
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use tragres_common::types::parse_date;

/// Print success notices and discard the rest
///
/// Error notices always accompany a returned error, which `main` prints.
pub(crate) fn print_notices(notices: &mut Notifications) {
    for notice in notices.drain() {
        if notice.level == NoticeLevel::Success {
            println!("{} {}", "✓".green(), notice.description);
        }
    }
}

/// Turn a failed load into an error
pub(crate) fn ensure_loaded<T>(state: &ViewState<T>) -> Result<()> {
    match state {
        ViewState::Failed(reason) => Err(CliError::Other(anyhow::anyhow!("{}", reason))),
        _ => Ok(()),
    }
}

/// Warn when the re-fetch after a committed write failed
///
/// The write stands, so this is not an error; the shown data may be stale.
pub(crate) fn warn_if_stale<T>(state: &ViewState<T>) {
    if let ViewState::Failed(reason) = state {
        eprintln!("{} Saved, but reloading failed: {}", "!".yellow(), reason);
    }
}

/// `--date` value, or today when omitted
pub(crate) fn date_arg(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(value) => Ok(parse_date(value)?),
        None => Ok(today()),
    }
}

pub(crate) fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

pub(crate) fn heading(text: &str) {
    println!("{}", text.cyan().bold());
}
