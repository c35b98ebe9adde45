use crate::error::ConsistencyError;
use crate::form::{
    read_value, Field, FieldKey, FieldValue, ResolvedValue, ResolvedValues, SplitField,
    DATE_FORMAT, PER_SPLIT_FIELD_COUNT,
};
use crate::state::template::SplitTemplate;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_store::models::{AccountId, PersonId};

/// What the presentation layer needs to react to after a split mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSignal {
    Added { index: usize },
    Removed { index: usize },
    FocusFirstField { index: usize },
    /// First split appeared; the total line becomes visible
    TotalShown,
    /// Last split went away; the total line is hidden
    TotalHidden,
}

/// One split's fields, owned as a unit
#[derive(Debug, Clone, PartialEq)]
pub struct SplitGroup {
    index: usize,
    fields: Vec<Field>,
}

impl SplitGroup {
    pub(crate) fn generated(index: usize, fields: Vec<Field>) -> Self {
        debug_assert_eq!(fields.len(), PER_SPLIT_FIELD_COUNT);
        Self { index, fields }
    }

    /// Take ownership of a pre-populated group, checking its shape
    fn adopt(index: usize, fields: Vec<Field>) -> Result<Self, ConsistencyError> {
        if fields.len() != PER_SPLIT_FIELD_COUNT {
            return Err(ConsistencyError::RaggedSplitForm {
                len: fields.len(),
                per_split: PER_SPLIT_FIELD_COUNT,
            });
        }
        for (field, expected) in fields.iter().zip(SplitField::ALL) {
            let expected = FieldKey::split(index, expected);
            if field.key != expected {
                return Err(ConsistencyError::MisplacedField {
                    expected,
                    found: field.key,
                });
            }
        }
        Ok(Self { index, fields })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, field: SplitField) -> &Field {
        &self.fields[field.position()]
    }

    pub fn field_mut(&mut self, field: SplitField) -> &mut Field {
        &mut self.fields[field.position()]
    }

    /// Paid flag the group was created with
    pub fn paid_default(&self) -> bool {
        self.field(SplitField::IsPaid)
            .default_value
            .as_bool()
            .unwrap_or(false)
    }

    /// Current state of the paid checkbox
    pub fn is_paid(&self) -> bool {
        self.field(SplitField::IsPaid).checked()
    }

    /// Bring account and date requirements in line with the paid checkbox.
    ///
    /// A split that becomes paid gets the default account and today's date
    /// when those are still empty.
    pub fn sync_paid(&mut self, template: &SplitTemplate) {
        let paid = self.is_paid();

        let account = self.field_mut(SplitField::AccountId);
        account.required = paid;
        if paid && account.input().is_empty() {
            if let Some(first) = template.default_account() {
                account.select(first);
            }
        }

        let paid_date = self.field_mut(SplitField::PaidDate);
        paid_date.required = paid;
        if paid && paid_date.input().is_empty() {
            paid_date.value = FieldValue::Text(template.today().format(DATE_FORMAT).to_string());
        }
    }
}

/// A split assembled from resolved values
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSplit {
    pub person_id: PersonId,
    pub amount: Decimal,
    pub is_paid: bool,
    pub account_id: Option<AccountId>,
    pub paid_date: Option<NaiveDate>,
}

/// Ordered, contiguous list of split groups.
///
/// Group `i` always sits at position `i` and holds the fields keyed
/// `<field>-<i>`; the add and delete operations are the only mutators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitList {
    groups: Vec<SplitGroup>,
}

impl SplitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a pre-populated flat field list, as stored for an existing record
    pub fn from_existing(fields: Vec<Field>) -> Result<Self, ConsistencyError> {
        if fields.len() % PER_SPLIT_FIELD_COUNT != 0 {
            return Err(ConsistencyError::RaggedSplitForm {
                len: fields.len(),
                per_split: PER_SPLIT_FIELD_COUNT,
            });
        }

        let count = fields.len() / PER_SPLIT_FIELD_COUNT;
        let mut fields = fields.into_iter();
        let mut groups = Vec::with_capacity(count);
        for index in 0..count {
            let group: Vec<Field> = fields.by_ref().take(PER_SPLIT_FIELD_COUNT).collect();
            groups.push(SplitGroup::adopt(index, group)?);
        }

        Ok(Self { groups })
    }

    pub fn split_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[SplitGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> impl Iterator<Item = &mut SplitGroup> {
        self.groups.iter_mut()
    }

    pub fn group(&self, index: usize) -> Option<&SplitGroup> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut SplitGroup> {
        self.groups.get_mut(index)
    }

    /// Every split field, group by group
    pub fn flat_fields(&self) -> impl Iterator<Item = &Field> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    pub fn flat_len(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }

    /// Per-index paid flags the groups were created with
    pub fn paid_flags(&self) -> Vec<bool> {
        self.groups.iter().map(SplitGroup::paid_default).collect()
    }

    /// Entered amount text of each split, in index order
    pub fn amount_inputs(&self) -> Vec<&str> {
        self.groups
            .iter()
            .map(|g| g.field(SplitField::Amount).input())
            .collect()
    }

    pub fn add_split(&mut self, template: &SplitTemplate, paid: bool) -> (usize, Vec<SplitSignal>) {
        let index = self.groups.len();
        self.groups.push(template.generate(index, paid));

        let mut signals = vec![
            SplitSignal::Added { index },
            SplitSignal::FocusFirstField { index },
        ];
        if index == 0 {
            signals.push(SplitSignal::TotalShown);
        }

        tracing::debug!("Added split {} (paid: {})", index, paid);
        (index, signals)
    }

    pub fn delete_last_split(&mut self) -> Vec<SplitSignal> {
        let Some(removed) = self.groups.pop() else {
            return Vec::new();
        };

        let mut signals = vec![SplitSignal::Removed {
            index: removed.index,
        }];
        if self.groups.is_empty() {
            signals.push(SplitSignal::TotalHidden);
        }

        tracing::debug!("Deleted split {}", removed.index);
        signals
    }

    /// Assemble one split per group from the split form's resolved values
    pub fn extract_splits(
        &self,
        values: &ResolvedValues,
    ) -> Result<Vec<ResolvedSplit>, ConsistencyError> {
        (0..self.groups.len())
            .map(|index| extract_split(values, index))
            .collect()
    }
}

fn extract_split(values: &ResolvedValues, index: usize) -> Result<ResolvedSplit, ConsistencyError> {
    let key = |field| FieldKey::split(index, field);
    let unexpected = |field| ConsistencyError::UnexpectedValue { key: key(field) };

    let person_id = read_value(values, key(SplitField::PersonId))?
        .as_id()
        .ok_or_else(|| unexpected(SplitField::PersonId))?;
    let amount = read_value(values, key(SplitField::Amount))?
        .as_amount()
        .ok_or_else(|| unexpected(SplitField::Amount))?;
    let is_paid = read_value(values, key(SplitField::IsPaid))?
        .as_bool()
        .ok_or_else(|| unexpected(SplitField::IsPaid))?;

    let account_id = match read_value(values, key(SplitField::AccountId))? {
        ResolvedValue::Empty => None,
        ResolvedValue::Id(id) => Some(AccountId::new(*id)),
        _ => return Err(unexpected(SplitField::AccountId)),
    };
    let paid_date = match read_value(values, key(SplitField::PaidDate))? {
        ResolvedValue::Empty => None,
        ResolvedValue::Date(date) => Some(*date),
        _ => return Err(unexpected(SplitField::PaidDate)),
    };

    Ok(ResolvedSplit {
        person_id: PersonId::new(person_id),
        amount,
        is_paid,
        account_id,
        paid_date,
    })
}
