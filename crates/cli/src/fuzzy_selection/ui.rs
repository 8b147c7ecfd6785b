use std::io::{stdout, Write};

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use log::debug;

use super::colors::SelectorTheme;
use super::input::to_selector_event;
use super::types::{update, SelectorState, Step};
use azcx_core::error::Result;

const PROMPT: &str = "> ";
const SELECTED_MARKER: &str = "→ ";
const UNSELECTED_MARKER: &str = "  ";
const NO_MATCHES: &str = "  No matches";
const KEY_HINT: &str = "↑/↓: navigate • enter: select • esc: cancel";

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// One line of selector output.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Prompt(&'a str),
    Blank,
    Item { text: &'a str, is_selected: bool },
    NoMatches,
    Hint,
}

/// Lays out the whole selector for the current state.
pub fn render_lines(state: &SelectorState) -> Vec<Line<'_>> {
    let mut lines = vec![Line::Prompt(state.query()), Line::Blank];

    lines.extend(
        state
            .visible_rows()
            .map(|(text, is_selected)| Line::Item { text, is_selected }),
    );

    if state.filtered_len() == 0 {
        lines.push(Line::NoMatches);
    }

    lines.push(Line::Blank);
    lines.push(Line::Hint);
    lines
}

fn redraw_ui(state: &SelectorState, theme: &SelectorTheme) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    for line in render_lines(state) {
        match line {
            Line::Prompt(query) => queue!(
                stdout,
                SetForegroundColor(theme.prompt),
                Print(PROMPT),
                SetForegroundColor(Color::Reset),
                Print(query),
            )?,
            Line::Blank => {}
            Line::Item { text, is_selected } if is_selected => {
                if theme.bold_selected {
                    queue!(stdout, SetAttribute(Attribute::Bold))?;
                }
                queue!(
                    stdout,
                    SetForegroundColor(theme.selected),
                    Print(SELECTED_MARKER),
                    Print(text),
                    SetAttribute(Attribute::Reset),
                )?;
            }
            Line::Item { text, .. } => queue!(
                stdout,
                SetForegroundColor(theme.normal),
                Print(UNSELECTED_MARKER),
                Print(text),
            )?,
            Line::NoMatches => queue!(stdout, SetForegroundColor(theme.normal), Print(NO_MATCHES))?,
            Line::Hint => queue!(stdout, SetForegroundColor(theme.hint), Print(KEY_HINT))?,
        }

        queue!(stdout, SetForegroundColor(Color::Reset), cursor::MoveToNextLine(1))?;
    }

    stdout.flush()?;
    Ok(())
}

/// Lets the user pick one of `candidates` with an incremental fuzzy filter.
///
/// Blocks on one key event at a time until the user confirms or cancels.
/// Returns the chosen candidate, or an empty string if nothing was chosen.
///
/// # Errors
///
/// Only terminal I/O failures are errors; cancelling is not.
pub fn fuzzy_select(candidates: &[String], theme: &SelectorTheme) -> Result<String> {
    if candidates.is_empty() {
        return Ok(String::new());
    }

    stdout().execute(EnterAlternateScreen)?;
    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode is disabled
    enable_raw_mode()?;

    let mut state = SelectorState::new(candidates.to_vec());

    loop {
        redraw_ui(&state, theme)?;

        let Event::Key(key_event) = event::read()? else {
            // Resizes and the like just redraw
            continue;
        };

        let Some(selector_event) = to_selector_event(key_event) else {
            continue;
        };

        state = match update(state, selector_event) {
            Step::Continue(next_state) => next_state,
            Step::Done(selection) => {
                debug!("Selector finished with {selection:?}");
                return Ok(selection);
            }
        };
    }
}
