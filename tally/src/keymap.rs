use crate::error::KeyMapError;
use crate::input::KeyEvent;
use tally_config::KeyBindings;

/// Dialog actions whose keys come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    AddSplit,
    AddPaidSplit,
    DeleteLastSplit,
    Submit,
    Cancel,
}

impl KeyAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSplit => "add_split",
            Self::AddPaidSplit => "add_paid_split",
            Self::DeleteLastSplit => "delete_last_split",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::AddSplit => "Add split",
            Self::AddPaidSplit => "Add paid split",
            Self::DeleteLastSplit => "Delete last split",
            Self::Submit => "Save record",
            Self::Cancel => "Cancel",
        }
    }

    /// Add and delete are unavailable while editing a stored record
    pub fn is_split_edit(&self) -> bool {
        matches!(
            self,
            Self::AddSplit | Self::AddPaidSplit | Self::DeleteLastSplit
        )
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "add_split" => Some(Self::AddSplit),
            "add_paid_split" => Some(Self::AddPaidSplit),
            "delete_last_split" => Some(Self::DeleteLastSplit),
            "submit" => Some(Self::Submit),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Parsed key bindings, built once when the dialog opens
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    bindings: Vec<(KeyAction, KeyEvent)>,
}

impl KeyMap {
    pub fn from_bindings(config: &KeyBindings) -> Result<Self, KeyMapError> {
        let mut bindings: Vec<(KeyAction, KeyEvent)> = Vec::new();

        for (name, spec) in config.entries() {
            let Some(action) = KeyAction::from_name(name) else {
                continue;
            };
            let chord = spec
                .parse::<KeyEvent>()
                .map_err(|reason| KeyMapError::InvalidBinding {
                    action: action.name(),
                    binding: spec.to_string(),
                    reason,
                })?;

            if let Some((existing, _)) = bindings.iter().find(|(_, c)| c.matches(&chord)) {
                return Err(KeyMapError::Conflict {
                    chord: chord.to_string(),
                    first: existing.name(),
                    second: action.name(),
                });
            }
            bindings.push((action, chord));
        }

        tracing::debug!("Key map: {:?}", bindings);
        Ok(Self { bindings })
    }

    /// Action bound to `event`, if any
    pub fn action_for(&self, event: &KeyEvent) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|(_, chord)| chord.matches(event))
            .map(|(action, _)| *action)
    }

    pub fn chord(&self, action: KeyAction) -> Option<&KeyEvent> {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, chord)| chord)
    }

    pub fn entries(&self) -> impl Iterator<Item = (KeyAction, &KeyEvent)> {
        self.bindings.iter().map(|(action, chord)| (*action, chord))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        use crate::input::Key;

        Self {
            bindings: vec![
                (KeyAction::AddSplit, KeyEvent::with_ctrl(Key::Char('a'))),
                (KeyAction::AddPaidSplit, KeyEvent::with_ctrl(Key::Char('s'))),
                (KeyAction::DeleteLastSplit, KeyEvent::with_ctrl(Key::Char('d'))),
                (KeyAction::Submit, KeyEvent::new(Key::Enter)),
                (KeyAction::Cancel, KeyEvent::new(Key::Esc)),
            ],
        }
    }
}
