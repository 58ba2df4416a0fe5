use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::model::PickerAction;

/// Help line shown under the list
pub const HELP_LINE: &str = "ctrl+c/esc: quit | enter: select | ↑↓/ctrl+p/ctrl+n: navigate";

/// Converts a key event into a picker action.
///
/// Cursor movement within the query is deliberately not bound; the query is
/// only ever edited at its end.
pub fn key_action(event: &KeyEvent) -> Option<PickerAction> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('c') if ctrl => Some(PickerAction::Quit),
        KeyCode::Char('p') if ctrl => Some(PickerAction::Up),
        KeyCode::Char('n') if ctrl => Some(PickerAction::Down),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(PickerAction::Insert(c)),
        KeyCode::Esc => Some(PickerAction::Quit),
        KeyCode::Enter => Some(PickerAction::Select),
        KeyCode::Up => Some(PickerAction::Up),
        KeyCode::Down => Some(PickerAction::Down),
        KeyCode::Backspace => Some(PickerAction::Backspace),
        _ => None,
    }
}
