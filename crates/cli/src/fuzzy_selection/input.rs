use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::SelectorEvent;

/// Maps a terminal key event onto a selector event.
///
/// Returns `None` for key releases/repeats and for anything the selector
/// ignores (function keys, Tab, modified characters other than the
/// Ctrl bindings below).
#[must_use]
pub fn to_selector_event(key_event: KeyEvent) -> Option<SelectorEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Esc => Some(SelectorEvent::Cancel),
        KeyCode::Char('c') if control => Some(SelectorEvent::Cancel),
        KeyCode::Enter => Some(SelectorEvent::Confirm),
        KeyCode::Up => Some(SelectorEvent::Up),
        KeyCode::Char('p') if control => Some(SelectorEvent::Up),
        KeyCode::Down => Some(SelectorEvent::Down),
        KeyCode::Char('n') if control => Some(SelectorEvent::Down),
        KeyCode::Backspace => Some(SelectorEvent::Backspace),
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(SelectorEvent::Input(c))
        }
        _ => None,
    }
}
