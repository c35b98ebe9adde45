use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::keymap::{KeyAction, KeyMap};
use crate::ui::theme;

/// One-line hint built from the configured bindings
pub fn help_text(keymap: &KeyMap, editing: bool) -> String {
    let mut hints: Vec<String> = vec!["Tab: Next field".to_string()];
    hints.extend(
        keymap
            .entries()
            .filter(|(action, _)| !(editing && action.is_split_edit()))
            .map(|(action, chord)| format!("{}: {}", chord, short_label(action))),
    );
    hints.push("F1: Help".to_string());
    hints.join(" | ")
}

fn short_label(action: KeyAction) -> &'static str {
    match action {
        KeyAction::AddSplit => "Split",
        KeyAction::AddPaidSplit => "Paid split",
        KeyAction::DeleteLastSplit => "Remove split",
        KeyAction::Submit => "Save",
        KeyAction::Cancel => "Cancel",
    }
}

/// Render the bordered help bar at the bottom of the screen
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(text, theme::help_text_style())))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
