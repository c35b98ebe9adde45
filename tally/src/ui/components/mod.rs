pub mod autocomplete_input;
pub mod help_bar;
pub mod help_popup;
pub mod popup;

pub use autocomplete_input::AutocompleteInput;
pub use help_bar::render_help_bar;
pub use help_popup::render_help_popup;
pub use popup::render_popup_frame;
