use std::io::{self, Write};

use colored::Colorize;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tracing::{debug, info};

use super::keys::{key_action, HELP_LINE};
use super::model::{update, Outcome, PickerModel};
use crate::errors::{EnumerateError, EnumerateResult};
use crate::matcher::FuzzyMatcher;

/// Width of the separator under the query line
const SEPARATOR_WIDTH: usize = 50;

/// Puts the terminal back into cooked mode however the session ends
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> EnumerateResult<Self> {
        enable_raw_mode()
            .map_err(|e| EnumerateError::terminal_error(format!("Failed to enable raw mode: {}", e)))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Runs the interactive picker over `paths` until the user selects or quits.
///
/// Returns the selected path, or `None` when the user cancelled.
pub fn run_picker(
    paths: Vec<String>,
    list_height: usize,
    matcher: &mut dyn FuzzyMatcher,
    use_color: bool,
) -> EnumerateResult<Option<String>> {
    info!("Starting picker with {} paths", paths.len());
    let mut model = PickerModel::new(paths, list_height);

    let _raw = RawModeGuard::enable()?;
    let mut out = io::stderr();

    loop {
        render(&mut out, &model, use_color)?;

        let evt = event::read()
            .map_err(|e| EnumerateError::terminal_error(format!("Failed to read event: {}", e)))?;
        let Event::Key(key) = evt else {
            continue;
        };
        let Some(action) = key_action(&key) else {
            continue;
        };
        debug!("Key pressed: {:?} -> {:?}", key.code, action);

        let (next, outcome) = update(model, action, matcher);
        model = next;
        match outcome {
            Outcome::Pending => {}
            Outcome::Selected(path) => {
                clear(&mut out)?;
                info!("File selected: {} (cursor {})", path, model.cursor());
                return Ok(Some(path));
            }
            Outcome::Cancelled => {
                clear(&mut out)?;
                info!("User quit picker");
                return Ok(None);
            }
        }
    }
}

fn clear(out: &mut impl Write) -> EnumerateResult<()> {
    write!(out, "{}\x1B[H", Clear(ClearType::All))?;
    out.flush()?;
    Ok(())
}

/// Draws the query line, the list and the help line.
///
/// The screen is written to stderr so stdout stays free for the selection.
/// Raw mode needs explicit carriage returns.
fn render(out: &mut impl Write, model: &PickerModel, use_color: bool) -> EnumerateResult<()> {
    clear(out)?;

    let prompt = if model.query().is_empty() && use_color {
        format!("> {}", "Search files...".dimmed())
    } else if model.query().is_empty() {
        "> Search files...".to_string()
    } else {
        format!("> {}", model.query())
    };
    write!(out, "{}\r\n", prompt)?;

    let counts = format!("{}/{}", model.total_matches(), model.total());
    let rule = "─".repeat(SEPARATOR_WIDTH);
    if use_color {
        write!(out, "{} {}\r\n", rule.bright_black(), counts.bright_black())?;
    } else {
        write!(out, "{} {}\r\n", rule, counts)?;
    }

    for row in 0..model.list_height() {
        match model.visible().get(row) {
            Some(path) if row == model.cursor() => {
                if use_color {
                    write!(out, "{} {}\r\n", ">".bright_blue().bold(), path.bold())?;
                } else {
                    write!(out, "> {}\r\n", path)?;
                }
            }
            Some(path) => write!(out, "  {}\r\n", path)?,
            None => write!(out, "\r\n")?,
        }
    }

    if use_color {
        write!(out, "\r\n{}\r\n", HELP_LINE.bright_black())?;
    } else {
        write!(out, "\r\n{}\r\n", HELP_LINE)?;
    }
    out.flush()?;
    Ok(())
}
