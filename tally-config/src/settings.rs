use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file
pub const CONFIG_ENV_VAR: &str = "TALLY_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Store file; the store picks its own default location when unset
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Key chords for the record dialog actions, e.g. "ctrl+a" or "enter"
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct KeyBindings {
    #[serde(default = "default_add_split")]
    pub add_split: String,
    #[serde(default = "default_add_paid_split")]
    pub add_paid_split: String,
    #[serde(default = "default_delete_last_split")]
    pub delete_last_split: String,
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_cancel")]
    pub cancel: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_add_split() -> String {
    "ctrl+a".to_string()
}

fn default_add_paid_split() -> String {
    "ctrl+s".to_string()
}

fn default_delete_last_split() -> String {
    "ctrl+d".to_string()
}

fn default_submit() -> String {
    "enter".to_string()
}

fn default_cancel() -> String {
    "esc".to_string()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            add_split: default_add_split(),
            add_paid_split: default_add_paid_split(),
            delete_last_split: default_delete_last_split(),
            submit: default_submit(),
            cancel: default_cancel(),
        }
    }
}

impl KeyBindings {
    /// (action name, chord) pairs in a stable order
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("add_split", &self.add_split),
            ("add_paid_split", &self.add_paid_split),
            ("delete_last_split", &self.delete_last_split),
            ("submit", &self.submit),
            ("cancel", &self.cancel),
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keybindings: KeyBindings::default(),
            data_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the file named by `TALLY_CONFIG`, then `./config.toml`,
    /// then `<config dir>/tally/config.toml`, with `TALLY__*` environment overrides
    pub fn new() -> Result<Self, ConfigError> {
        let path = match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let local = PathBuf::from("config.toml");
                match dirs::config_dir() {
                    Some(dir) if !local.exists() => dir.join("tally").join("config.toml"),
                    _ => local,
                }
            }
        };
        Self::from_path(&path)
    }

    /// Load settings from `path` (which may be missing) plus environment overrides
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!("Loading settings from {}", path.display());

        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level cannot be empty".to_string()));
        }

        let entries = self.keybindings.entries();
        for (i, (name, chord)) in entries.iter().enumerate() {
            if chord.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "keybindings.{name} cannot be empty"
                )));
            }
            if let Some((other, _)) = entries[..i]
                .iter()
                .find(|(_, c)| c.trim().eq_ignore_ascii_case(chord.trim()))
            {
                return Err(ConfigError::Invalid(format!(
                    "keybindings.{name} and keybindings.{other} are both bound to '{chord}'"
                )));
            }
        }
        Ok(())
    }
}
