use super::field::{Field, FieldKind};
use super::key::FieldKey;
use crate::error::ConsistencyError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Format dates are entered and displayed in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed value of a field after validation
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Empty,
    Text(String),
    Amount(Decimal),
    Date(NaiveDate),
    Bool(bool),
    Id(i64),
}

impl ResolvedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

pub type ResolvedValues = BTreeMap<FieldKey, ResolvedValue>;
pub type FieldErrors = BTreeMap<FieldKey, String>;

/// Outcome of validating one form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    pub values: ResolvedValues,
    pub errors: FieldErrors,
    pub is_valid: bool,
}

/// Validate `fields`, resolving each to a typed value or an error message.
///
/// `overrides` replaces the entered text of the named fields for this
/// validation only; the fields themselves are never modified.
pub fn validate_fields<'a, I>(
    fields: I,
    overrides: &[(FieldKey, String)],
    today: NaiveDate,
) -> FormValidation
where
    I: IntoIterator<Item = &'a Field>,
{
    let mut values = ResolvedValues::new();
    let mut errors = FieldErrors::new();

    for field in fields {
        let input = overrides
            .iter()
            .find(|(key, _)| *key == field.key)
            .map(|(_, text)| text.as_str());

        match resolve_field(field, input, today) {
            Ok(value) => {
                values.insert(field.key, value);
            }
            Err(message) => {
                errors.insert(field.key, message);
            }
        }
    }

    let is_valid = errors.is_empty();
    FormValidation {
        values,
        errors,
        is_valid,
    }
}

fn resolve_field(
    field: &Field,
    input_override: Option<&str>,
    today: NaiveDate,
) -> Result<ResolvedValue, String> {
    if field.is_boolean() {
        return Ok(ResolvedValue::Bool(field.checked()));
    }

    // Choices resolved through the dropdown carry their id
    if input_override.is_none() {
        if let Some(id) = field.held() {
            return Ok(ResolvedValue::Id(id));
        }
    }

    let input = input_override.unwrap_or_else(|| field.input()).trim();
    if input.is_empty() {
        return if field.required {
            Err("Required".to_string())
        } else {
            Ok(ResolvedValue::Empty)
        };
    }

    match &field.kind {
        FieldKind::Text => Ok(ResolvedValue::Text(input.to_string())),
        FieldKind::Number => validate_amount(input).map(ResolvedValue::Amount),
        FieldKind::Date => validate_date(input, today).map(ResolvedValue::Date),
        FieldKind::Choice {
            options,
            allow_create,
        } => options
            .iter()
            .find(|o| o.text.eq_ignore_ascii_case(input))
            .map(|o| ResolvedValue::Id(o.value))
            .ok_or_else(|| {
                if *allow_create {
                    "Pick an existing entry or create a new one".to_string()
                } else {
                    "Pick one of the listed entries".to_string()
                }
            }),
        FieldKind::Boolean => Ok(ResolvedValue::Bool(field.checked())),
    }
}

pub fn validate_amount(amount_str: &str) -> Result<Decimal, String> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    Decimal::from_str(amount_str)
        .map_err(|_| "Invalid amount. Enter a number (e.g., 12.50)".to_string())
}

/// Parse a date in `DATE_FORMAT`, accepting "today"/"t" as shortcuts
pub fn validate_date(date_str: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let date_str = date_str.trim();
    if date_str.eq_ignore_ascii_case("today") || date_str.eq_ignore_ascii_case("t") {
        return Ok(today);
    }

    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| "Invalid date. Use format: YYYY-MM-DD".to_string())
}

/// Lenient amount parse: empty or unparseable input counts as zero
pub fn amount_or_zero(input: &str) -> Decimal {
    Decimal::from_str(input.trim()).unwrap_or(Decimal::ZERO)
}

/// Look up a resolved value that must exist
pub fn read_value(
    values: &ResolvedValues,
    key: FieldKey,
) -> Result<&ResolvedValue, ConsistencyError> {
    values
        .get(&key)
        .ok_or(ConsistencyError::MissingField { key })
}
