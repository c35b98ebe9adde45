use super::splits::ResolvedSplit;
use super::total;
use super::{DialogOutcome, RecordDialog};
use crate::error::ConsistencyError;
use crate::form::{
    read_value, validate_amount, validate_fields, FieldErrors, FieldKey, RecordField,
    ResolvedValues,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_store::models::{AccountId, NewRecord, NewSplit};

/// Typed values of the record form
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub is_income: bool,
}

impl ResolvedRecord {
    fn from_values(values: &ResolvedValues) -> Result<Self, ConsistencyError> {
        let read = move |field: RecordField| read_value(values, field.into());
        let unexpected = |field: RecordField| ConsistencyError::UnexpectedValue { key: field.into() };

        Ok(Self {
            label: read(RecordField::Label)?
                .as_text()
                .ok_or_else(|| unexpected(RecordField::Label))?
                .to_string(),
            amount: read(RecordField::Amount)?
                .as_amount()
                .ok_or_else(|| unexpected(RecordField::Amount))?,
            date: read(RecordField::Date)?
                .as_date()
                .ok_or_else(|| unexpected(RecordField::Date))?,
            account_id: read(RecordField::AccountId)?
                .as_id()
                .map(AccountId::new)
                .ok_or_else(|| unexpected(RecordField::AccountId))?,
            is_income: read(RecordField::IsIncome)?
                .as_bool()
                .ok_or_else(|| unexpected(RecordField::IsIncome))?,
        })
    }
}

/// Everything the dialog hands over on a successful submit
#[derive(Debug, Clone, PartialEq)]
pub struct DialogResult {
    pub record: ResolvedRecord,
    pub splits: Vec<ResolvedSplit>,
}

impl DialogResult {
    /// Convert into the store's creation payloads
    pub fn into_new(self) -> (NewRecord, Vec<NewSplit>) {
        let record = NewRecord::new(
            self.record.label,
            self.record.amount,
            self.record.date,
            self.record.account_id,
        )
        .is_income(self.record.is_income);

        let splits = self
            .splits
            .into_iter()
            .map(|split| NewSplit {
                account_id: split.account_id,
                paid_date: split.paid_date,
                ..NewSplit::new(split.person_id, split.amount).is_paid(split.is_paid)
            })
            .collect();

        (record, splits)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(DialogResult),
    /// Merged record and split errors, keyed by field
    Rejected(FieldErrors),
}

impl RecordDialog {
    /// Validate the record form and the split form, then either close the
    /// dialog with a result or replace the displayed errors.
    ///
    /// The record amount is validated as the current total while splits
    /// exist; the visible amount field keeps what the user typed.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ConsistencyError> {
        let overrides = self.amount_override().into_iter().collect::<Vec<_>>();

        let mut record = validate_fields(&self.record_form, &overrides, self.today());
        if self.total.is_none() {
            record
                .errors
                .insert(RecordField::Amount.into(), total::TOO_LARGE.to_string());
            record.is_valid = false;
        }
        let splits = validate_fields(self.splits.flat_fields(), &[], self.today());

        if record.is_valid && splits.is_valid {
            let result = DialogResult {
                record: ResolvedRecord::from_values(&record.values)?,
                splits: self.splits.extract_splits(&splits.values)?,
            };

            tracing::info!(
                "Record submitted: {} ({} split(s))",
                result.record.label,
                result.splits.len()
            );
            self.errors.clear();
            self.outcome = Some(DialogOutcome::Submitted(result.clone()));
            return Ok(SubmitOutcome::Accepted(result));
        }

        let mut errors = record.errors;
        errors.extend(splits.errors);
        tracing::info!("Record rejected with {} error(s)", errors.len());
        tracing::debug!("Validation errors: {:?}", errors);

        self.errors = errors.clone();
        Ok(SubmitOutcome::Rejected(errors))
    }

    /// Text the record amount is validated as.
    ///
    /// Entered text that does not parse is left alone so the user sees the
    /// real error, as is an empty amount with no splits to stand in for it.
    fn amount_override(&self) -> Option<(FieldKey, String)> {
        let key = FieldKey::Record(RecordField::Amount);
        let entered = self.field(key).map(|f| f.input().trim()).unwrap_or_default();

        if !entered.is_empty() && validate_amount(entered).is_err() {
            return None;
        }
        if entered.is_empty() && self.splits.is_empty() {
            return None;
        }
        self.total.map(|total| (key, total.to_string()))
    }
}
