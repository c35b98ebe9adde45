use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::keymap::KeyAction;
use crate::state::AppState;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: nothing to do once the dialog is closed
    if state.dialog.is_closed() {
        return None;
    }

    // Priority 1: help popup swallows everything but its own toggles
    if state.help_visible {
        return match key {
            Key::F(1) | Key::Esc => Some(AppCommand::ToggleHelp),
            _ => None,
        };
    }
    if key == Key::F(1) {
        return Some(AppCommand::ToggleHelp);
    }

    // Priority 2: configured bindings
    if let Some(action) = state.keymap.action_for(&event) {
        return handle_action(action, state);
    }

    // Priority 3: field editing
    handle_form_keys(event, state)
}

fn handle_action(action: KeyAction, state: &AppState) -> Option<AppCommand> {
    let dialog = &state.dialog;

    if action.is_split_edit() && dialog.is_editing() {
        tracing::debug!("{} is disabled while editing a record", action.name());
        return None;
    }

    match action {
        KeyAction::AddSplit => Some(AppCommand::AddSplit { paid: false }),
        KeyAction::AddPaidSplit => Some(AppCommand::AddSplit { paid: true }),
        KeyAction::DeleteLastSplit => Some(AppCommand::DeleteLastSplit),
        // An open dropdown takes the submit key as "pick this entry"
        KeyAction::Submit if dialog.autocomplete.is_open() => {
            Some(AppCommand::ConfirmAutocompleteSelection)
        }
        KeyAction::Submit => Some(AppCommand::Submit),
        KeyAction::Cancel => Some(AppCommand::Cancel),
    }
}

fn handle_form_keys(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let dialog = &state.dialog;
    let key = event.key;

    // Ctrl+U to clear current field
    if event.modifiers.ctrl && matches!(key, Key::Char('u')) {
        return Some(AppCommand::ClearField);
    }

    let on_checkbox = dialog.focused_field().is_some_and(|f| f.is_boolean());

    match key {
        // Tab to navigate to next field
        Key::Tab => Some(AppCommand::NavigateField { forward: true }),

        // Shift+Tab to navigate to previous field
        Key::BackTab => Some(AppCommand::NavigateField { forward: false }),

        // Arrow keys move through the dropdown when one is open, otherwise between fields
        Key::Up if dialog.autocomplete.is_open() => {
            Some(AppCommand::SelectAutocompleteItem { up: true })
        }
        Key::Down if dialog.autocomplete.is_open() => {
            Some(AppCommand::SelectAutocompleteItem { up: false })
        }
        Key::Up => Some(AppCommand::NavigateField { forward: false }),
        Key::Down => Some(AppCommand::NavigateField { forward: true }),

        Key::Enter if dialog.autocomplete.is_open() => {
            Some(AppCommand::ConfirmAutocompleteSelection)
        }

        Key::Backspace if !on_checkbox => Some(AppCommand::DeleteChar),

        Key::Char(' ') if on_checkbox => Some(AppCommand::ToggleField),

        // Regular character input
        Key::Char(c)
            if !on_checkbox && c != '\0' && !event.modifiers.ctrl && !event.modifiers.alt =>
        {
            Some(AppCommand::AppendChar { c })
        }

        // Ignore other keys
        _ => None,
    }
}
