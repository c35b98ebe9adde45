//! Centralized theme constants and style functions for consistent UI styling.
//!
//! All colors, layout constants, and common styles should be defined here
//! to ensure visual consistency across the dialog.

use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

// =============================================================================
// Colors
// =============================================================================

/// Color for positive amounts
pub const COLOR_POSITIVE: Color = Color::Green;

/// Color for negative amounts
pub const COLOR_NEGATIVE: Color = Color::Red;

/// Color for zero amounts
pub const COLOR_ZERO: Color = Color::DarkGray;

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for field labels
pub const COLOR_LABEL: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for inline validation errors
pub const COLOR_ERROR: Color = Color::Red;

/// Color for status messages
pub const COLOR_STATUS: Color = Color::Yellow;

/// Border color for unpaid split groups
pub const COLOR_BORDER_SPLIT: Color = Color::Blue;

/// Border color for paid split groups
pub const COLOR_BORDER_PAID: Color = Color::Green;

/// Border color for accent/highlighted elements
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Background for form fields when focused
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Width of the label column in form rows
pub const LABEL_WIDTH: u16 = 12;

/// Height of one split group (five rows plus borders)
pub const SPLIT_BLOCK_HEIGHT: u16 = 7;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for field labels
pub fn label_style() -> Style {
    Style::default().fg(COLOR_LABEL)
}

/// Style for keys in the help popup
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_LABEL)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// Style for inline validation errors
pub fn error_style() -> Style {
    Style::default().fg(COLOR_ERROR)
}

pub fn status_style() -> Style {
    Style::default()
        .fg(COLOR_STATUS)
        .add_modifier(Modifier::ITALIC)
}

/// Style for form fields when focused
pub fn form_field_focused_style() -> Style {
    Style::default()
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when not focused
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for placeholder text in empty fields
pub fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Border style for a split group
pub fn split_border_style(paid: bool) -> Style {
    Style::default().fg(if paid {
        COLOR_BORDER_PAID
    } else {
        COLOR_BORDER_SPLIT
    })
}

/// Style for accent borders
pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

// =============================================================================
// Amount Color Helper
// =============================================================================

/// Get the appropriate color for an amount value.
/// Positive = green, negative = red, zero = gray
pub fn amount_color(amount: Decimal) -> Color {
    if amount > Decimal::ZERO {
        COLOR_POSITIVE
    } else if amount < Decimal::ZERO {
        COLOR_NEGATIVE
    } else {
        COLOR_ZERO
    }
}
