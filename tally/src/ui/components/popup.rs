use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::layouts::centered_popup;

/// Clear a centered area and draw a titled border around it.
///
/// Returns the inner area for the popup content.
pub fn render_popup_frame(
    f: &mut Frame,
    parent: Rect,
    size: (u16, u16),
    title: &str,
    border_style: Style,
) -> Rect {
    let area = centered_popup(size.0, size.1, parent);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}
