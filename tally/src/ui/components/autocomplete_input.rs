use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::ui::theme;

/// A choice field with its dropdown overlay
pub struct AutocompleteInput<'a> {
    pub value: &'a str,
    /// Shown when value is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub items: &'a [String],
    pub selected_index: usize,
    /// Optional hint text at bottom of dropdown
    pub hint: Option<&'a str>,
}

impl<'a> AutocompleteInput<'a> {
    pub fn new(value: &'a str, placeholder: &'a str) -> Self {
        Self {
            value,
            placeholder,
            is_focused: false,
            items: &[],
            selected_index: 0,
            hint: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn items(mut self, items: &'a [String]) -> Self {
        self.items = items;
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    /// Redraw the input line and open the dropdown next to it
    pub fn render(self, f: &mut Frame, area: Rect) {
        let (text, style) = if self.value.is_empty() {
            (self.placeholder, theme::placeholder_style())
        } else if self.is_focused {
            (self.value, theme::form_field_focused_style())
        } else {
            (self.value, theme::form_field_style())
        };

        f.render_widget(Clear, area);
        f.render_widget(Span::from(text).style(style), area);

        if !self.items.is_empty() {
            self.render_dropdown(f, area);
        }
    }

    fn render_dropdown(&self, f: &mut Frame, input_area: Rect) {
        let content_height = self.items.len() + usize::from(self.hint.is_some());
        // Two rows for the borders
        let dropdown_height = (content_height + 2) as u16;
        let dropdown_width = input_area.width.max(24);

        let frame = f.area();
        let x = input_area.x;
        let below = input_area.y + 1;

        let (y, height) = if below + dropdown_height <= frame.height {
            (below, dropdown_height)
        } else if input_area.y >= dropdown_height {
            (input_area.y - dropdown_height, dropdown_height)
        } else {
            (below, frame.height.saturating_sub(below).max(3))
        };

        let width = dropdown_width.min(frame.width.saturating_sub(x));
        let dropdown_area = Rect::new(x, y, width, height);
        f.render_widget(Clear, dropdown_area);

        let mut list_items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let style = if i == self.selected_index {
                    theme::selection_style()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::from(label.as_str()).style(style)))
            })
            .collect();

        if let Some(hint) = self.hint {
            list_items.push(ListItem::new(Line::from(
                Span::from(hint).style(theme::placeholder_style()),
            )));
        }

        let list = List::new(list_items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::accent_border_style()),
        );
        f.render_widget(list, dropdown_area);
    }
}
