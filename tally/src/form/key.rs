use std::fmt::Display;

/// Fields of the primary record form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordField {
    Label,
    Amount,
    Date,
    AccountId,
    IsIncome,
}

impl RecordField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::AccountId => "accountId",
            Self::IsIncome => "isIncome",
        }
    }
}

/// Fields making up one split
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SplitField {
    PersonId,
    Amount,
    IsPaid,
    AccountId,
    PaidDate,
}

impl SplitField {
    /// Every split field, in the order a split group holds them
    pub const ALL: [SplitField; 5] = [
        SplitField::PersonId,
        SplitField::Amount,
        SplitField::IsPaid,
        SplitField::AccountId,
        SplitField::PaidDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PersonId => "personId",
            Self::Amount => "amount",
            Self::IsPaid => "isPaid",
            Self::AccountId => "accountId",
            Self::PaidDate => "paidDate",
        }
    }

    /// Position of this field inside its split group
    pub fn position(&self) -> usize {
        match self {
            Self::PersonId => 0,
            Self::Amount => 1,
            Self::IsPaid => 2,
            Self::AccountId => 3,
            Self::PaidDate => 4,
        }
    }
}

/// Number of fields in every split group
pub const PER_SPLIT_FIELD_COUNT: usize = SplitField::ALL.len();

/// Address of a field in either the record form or the split form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Record(RecordField),
    Split { index: usize, field: SplitField },
}

impl FieldKey {
    pub fn split(index: usize, field: SplitField) -> Self {
        Self::Split { index, field }
    }

    pub fn split_index(&self) -> Option<usize> {
        match self {
            Self::Split { index, .. } => Some(*index),
            Self::Record(_) => None,
        }
    }

    pub fn is_amount(&self) -> bool {
        matches!(
            self,
            Self::Record(RecordField::Amount)
                | Self::Split {
                    field: SplitField::Amount,
                    ..
                }
        )
    }
}

impl From<RecordField> for FieldKey {
    fn from(field: RecordField) -> Self {
        FieldKey::Record(field)
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Record(field) => f.write_str(field.name()),
            Self::Split { index, field } => write!(f, "{}-{}", field.name(), index),
        }
    }
}
