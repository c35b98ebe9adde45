mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{KeyBindings, Settings, CONFIG_ENV_VAR};
