mod field;
mod key;
mod validators;

pub use field::{Field, FieldKind, FieldOption, FieldValue};
pub use key::{FieldKey, RecordField, SplitField, PER_SPLIT_FIELD_COUNT};
pub use validators::*;
