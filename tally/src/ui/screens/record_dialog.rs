use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::Field;
use crate::state::{AppState, DialogMode, RecordDialog};
use crate::ui::components::{help_bar, render_help_bar, AutocompleteInput};
use crate::ui::layouts::{field_columns, field_rows, screen_layout};
use crate::ui::theme;

const DROPDOWN_HINT: &str = "Enter to pick, Up/Down to move";

pub fn render(f: &mut Frame, state: &AppState) {
    let dialog = &state.dialog;
    let (title_area, content_area, help_area) = screen_layout(f.area());

    let title = match dialog.mode {
        DialogMode::Creating => "New record".to_string(),
        DialogMode::Editing { record_id } => format!("Edit record #{}", record_id),
    };
    f.render_widget(
        Paragraph::new(Span::styled(title, theme::title_style())),
        title_area,
    );

    // Record block, one block per split, then the total and status lines
    let mut constraints = vec![Constraint::Length(dialog.record_form.len() as u16 + 2)];
    constraints.extend(
        dialog
            .splits
            .groups()
            .iter()
            .map(|_| Constraint::Length(theme::SPLIT_BLOCK_HEIGHT)),
    );
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(content_area);

    let mut dropdown_anchor = None;

    let record_block = Block::default()
        .title(" Record ")
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style());
    let inner = record_block.inner(chunks[0]);
    f.render_widget(record_block, chunks[0]);
    render_fields(f, inner, &dialog.record_form, dialog, &mut dropdown_anchor);

    for (group, area) in dialog.splits.groups().iter().zip(chunks.iter().skip(1)) {
        // Groups past the bottom of the screen get a zero-height area
        if area.height == 0 {
            continue;
        }
        let paid = group.paid_default();
        let block = Block::default()
            .title(if paid { "> Paid split <" } else { "> Split <" })
            .borders(Borders::ALL)
            .border_style(theme::split_border_style(paid));
        let inner = block.inner(*area);
        f.render_widget(block, *area);
        render_fields(f, inner, group.fields(), dialog, &mut dropdown_anchor);
    }

    let split_count = dialog.splits.split_count();
    if let Some(label) = dialog.total_label() {
        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(dialog.total.map_or(theme::COLOR_ERROR, theme::amount_color))
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(line), chunks[split_count + 1]);
    }

    if let Some(status) = &state.status {
        f.render_widget(
            Paragraph::new(Span::styled(status.as_str(), theme::status_style())),
            chunks[split_count + 2],
        );
    }

    render_help_bar(
        f,
        help_area,
        &help_bar::help_text(&state.keymap, dialog.is_editing()),
    );

    // Dropdown last so it overlays whatever is below it
    if let (Some(anchor), Some(field)) = (dropdown_anchor, dialog.focused_field()) {
        let items: Vec<String> = dialog
            .autocomplete
            .items
            .iter()
            .map(|item| item.label())
            .collect();
        AutocompleteInput::new(field.input(), "Type to search")
            .focused(true)
            .items(&items)
            .selected_index(dialog.autocomplete.selection_index)
            .hint(Some(DROPDOWN_HINT))
            .render(f, anchor);
    }
}

fn render_fields(
    f: &mut Frame,
    area: Rect,
    fields: &[Field],
    dialog: &RecordDialog,
    dropdown_anchor: &mut Option<Rect>,
) {
    for (field, row) in fields.iter().zip(field_rows(area, fields.len())) {
        let (label_area, value_area, error_area) = field_columns(row);
        let focused = dialog.current_field == Some(field.key);

        let marker = if field.required { "*" } else { "" };
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("{}{}", field.label, marker),
                theme::label_style(),
            )),
            label_area,
        );

        let style = if focused {
            theme::form_field_focused_style()
        } else {
            theme::form_field_style()
        };
        let mut value = field.display_value();
        if focused && !field.is_boolean() {
            value.push('_');
        }
        f.render_widget(Paragraph::new(Span::styled(value, style)), value_area);

        if focused && dialog.autocomplete.is_open() {
            *dropdown_anchor = Some(value_area);
        }

        if let Some(error) = dialog.errors.get(&field.key) {
            f.render_widget(
                Paragraph::new(Span::styled(error.as_str(), theme::error_style())),
                error_area,
            );
        }
    }
}
