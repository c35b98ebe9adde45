pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use ratatui::Frame;

use crate::state::AppState;

/// Draw the whole dialog for the current state
pub fn render_app(f: &mut Frame, state: &AppState) {
    screens::record_dialog::render(f, state);

    if state.help_visible {
        components::render_help_popup(f, f.area(), state);
    }
}
