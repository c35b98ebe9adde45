use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::state::AppState;
use crate::ui::{components::render_popup_frame, layouts::popup_sizes, theme};

/// Keys handled by the form itself rather than the configurable bindings
const FORM_KEYS: [(&str, &str); 6] = [
    ("Tab", "Next field"),
    ("Shift+Tab", "Previous field"),
    ("Up/Down", "Move field or dropdown entry"),
    ("Space", "Toggle checkbox"),
    ("Ctrl+U", "Clear field"),
    ("F1", "Toggle this help"),
];

pub fn help_entries(state: &AppState) -> Vec<(String, &'static str)> {
    let editing = state.dialog.is_editing();
    let mut entries: Vec<(String, &'static str)> = state
        .keymap
        .entries()
        .filter(|(action, _)| !(editing && action.is_split_edit()))
        .map(|(action, chord)| (chord.to_string(), action.description()))
        .collect();
    entries.extend(
        FORM_KEYS
            .iter()
            .map(|(key, description)| (key.to_string(), *description)),
    );
    entries
}

pub fn render_help_popup(f: &mut Frame, area: Rect, state: &AppState) {
    let inner = render_popup_frame(
        f,
        area,
        popup_sizes::LARGE,
        "Keyboard Shortcuts",
        theme::accent_border_style(),
    );

    let items: Vec<ListItem> = help_entries(state)
        .into_iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(description),
            ]))
        })
        .collect();

    f.render_widget(List::new(items), inner);
}
