use crate::form::FieldKey;
use thiserror::Error;

/// Broken invariants between the split count and the split fields.
///
/// These never come from user input; they surface a defect and end the dialog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    #[error("Resolved values are missing field {key}")]
    MissingField { key: FieldKey },

    #[error("Field {key} resolved to an unexpected value")]
    UnexpectedValue { key: FieldKey },

    #[error("Split form holds {len} fields, which is not a multiple of {per_split}")]
    RaggedSplitForm { len: usize, per_split: usize },

    #[error("Split form has field {found} where {expected} was expected")]
    MisplacedField { expected: FieldKey, found: FieldKey },
}

/// A configured key binding that cannot be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyMapError {
    #[error("Invalid key binding '{binding}' for {action}: {reason}")]
    InvalidBinding {
        action: &'static str,
        binding: String,
        reason: String,
    },

    #[error("Key {chord} is bound to both {first} and {second}")]
    Conflict {
        chord: String,
        first: &'static str,
        second: &'static str,
    },
}
