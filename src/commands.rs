//! Commands
//!
//! TigerStyle: One function per front-end command.
//!
//! Labels reach the user through the attached [`CounterView`](crate::CounterView);
//! everything else (logs, prompts, warnings, JSON) goes to the writer the
//! caller hands in.

use crate::app::App;
use crate::counter::CounterError;
use crate::log_sink::LogError;
use std::io::{BufRead, Write};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Interactive prompt
pub const PROMPT: &str = "> ";

// =============================================================================
// Commands
// =============================================================================

/// Print the current label, or a JSON snapshot.
pub fn show<W: Write>(app: &App, json: bool, out: &mut W) -> Result<(), CommandError> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&app.snapshot())?)?;
    } else {
        writeln!(out, "{}", app.display_text())?;
    }
    Ok(())
}

/// Increment `times` times, stopping at the first failed write.
pub fn increment(app: &mut App, times: u32) -> Result<u64, CommandError> {
    let mut count = app.snapshot().count;
    for _ in 0..times {
        count = app.on_increment_requested()?;
    }
    Ok(count)
}

/// Print the activity log.
pub fn logs<W: Write>(app: &App, out: &mut W) -> Result<(), CommandError> {
    let text = app.show_logs()?;
    write!(out, "{}", text)?;
    Ok(())
}

/// Line-driven session: empty line or `+` taps, `l` shows logs when a log
/// destination exists, `q` quits. A failed write is reported and the
/// session continues; the next tap retries it.
pub fn run_session<R: BufRead, W: Write>(
    app: &mut App,
    input: R,
    out: &mut W,
) -> Result<(), CommandError> {
    app.refresh();
    write_help(app, out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match line?.trim() {
            "" | "+" => {
                if let Err(e) = app.on_increment_requested() {
                    writeln!(out, "warning: {}", e)?;
                }
            }
            "l" if app.log_viewer_available() => match app.show_logs() {
                Ok(text) => write!(out, "{}", text)?,
                Err(e) => writeln!(out, "warning: {}", e)?,
            },
            "q" => break,
            _ => write_help(app, out)?,
        }
    }

    Ok(())
}

fn write_help<W: Write>(app: &App, out: &mut W) -> std::io::Result<()> {
    if app.log_viewer_available() {
        writeln!(out, "Enter or + to tap, l to show logs, q to quit")
    } else {
        writeln!(out, "Enter or + to tap, q to quit")
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Command errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Counter(#[from] CounterError),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Tests
// =============================================================================
