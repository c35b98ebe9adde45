use crate::form::{
    Field, FieldKey, FieldOption, FieldValue, SplitField, DATE_FORMAT,
};
use crate::state::splits::SplitGroup;
use chrono::NaiveDate;
use tally_store::models::{AccountBalance, Person, Split};

/// Builds the fixed-shape field group for one split.
///
/// Person and account options are captured once when the dialog opens;
/// generating a group never touches existing dialog state.
#[derive(Debug, Clone)]
pub struct SplitTemplate {
    persons: Vec<FieldOption>,
    accounts: Vec<FieldOption>,
    today: NaiveDate,
}

impl SplitTemplate {
    pub fn new(persons: &[Person], accounts: &[AccountBalance], today: NaiveDate) -> Self {
        Self {
            persons: persons
                .iter()
                .map(|p| FieldOption::new(p.name.clone(), p.id.inner()))
                .collect(),
            accounts: account_options(accounts),
            today,
        }
    }

    pub fn person_options(&self) -> &[FieldOption] {
        &self.persons
    }

    pub fn account_options(&self) -> &[FieldOption] {
        &self.accounts
    }

    /// Account a paid split is received into unless the user picks another
    pub fn default_account(&self) -> Option<&FieldOption> {
        self.accounts.first()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Fresh group for split `index`; a paid split pre-fills account and date
    pub fn generate(&self, index: usize, is_paid: bool) -> SplitGroup {
        SplitGroup::generated(index, self.fields(index, is_paid))
    }

    /// Flat fields of a persisted split, used when editing a record
    pub fn prefilled(&self, index: usize, split: &Split) -> Vec<Field> {
        let mut fields = self.fields(index, split.is_paid);

        fields[SplitField::PersonId.position()] = fields[SplitField::PersonId.position()]
            .clone()
            .with_selected_default(split.person_id.inner());
        fields[SplitField::Amount.position()] = fields[SplitField::Amount.position()]
            .clone()
            .with_text_default(split.amount.to_string());

        let account = &mut fields[SplitField::AccountId.position()];
        *account = match split.account_id {
            Some(id) => account.clone().with_selected_default(id.inner()),
            None => account.clone().with_default(FieldValue::empty_for(&account.kind)),
        };

        let paid_date = split
            .paid_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        fields[SplitField::PaidDate.position()] = fields[SplitField::PaidDate.position()]
            .clone()
            .with_text_default(paid_date);

        fields
    }

    /// Register a person created while the dialog is open
    pub fn add_person(&mut self, person: &Person) -> FieldOption {
        let option = FieldOption::new(person.name.clone(), person.id.inner());
        self.persons.push(option.clone());
        option
    }

    fn fields(&self, index: usize, is_paid: bool) -> Vec<Field> {
        let key = |field| FieldKey::split(index, field);

        let mut account = Field::choice(
            key(SplitField::AccountId),
            "Paid to",
            self.accounts.clone(),
        );
        let mut paid_date = Field::date(key(SplitField::PaidDate), "Paid on");
        if is_paid {
            account.required = true;
            if let Some(first) = self.default_account() {
                account = account.with_selected_default(first.value);
            }
            paid_date.required = true;
            paid_date = paid_date.with_text_default(self.today.format(DATE_FORMAT).to_string());
        }

        vec![
            Field::choice(key(SplitField::PersonId), "Person", self.persons.clone())
                .allow_create()
                .required(),
            Field::number(key(SplitField::Amount), "Amount").required(),
            Field::boolean(key(SplitField::IsPaid), "Paid").with_default(FieldValue::Bool(is_paid)),
            account,
            paid_date,
        ]
    }
}

pub fn account_options(accounts: &[AccountBalance]) -> Vec<FieldOption> {
    accounts
        .iter()
        .map(|a| FieldOption::new(a.name.clone(), a.id.inner()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::PER_SPLIT_FIELD_COUNT;
    use rust_decimal::Decimal;
    use tally_store::models::{AccountId, PersonId, RecordId, SplitId};

    fn template() -> SplitTemplate {
        SplitTemplate::new(
            &[Person {
                id: PersonId::new(1),
                name: "Alice".to_string(),
            }],
            &[
                AccountBalance {
                    id: AccountId::new(10),
                    name: "Checking".to_string(),
                    balance: Decimal::new(100, 0),
                },
                AccountBalance {
                    id: AccountId::new(11),
                    name: "Cash".to_string(),
                    balance: Decimal::ZERO,
                },
            ],
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        )
    }

    #[test]
    fn test_generate_names_fields_by_index() {
        let group = template().generate(3, false);
        let keys: Vec<String> = group.fields().iter().map(|f| f.key.to_string()).collect();

        assert_eq!(group.fields().len(), PER_SPLIT_FIELD_COUNT);
        assert_eq!(
            keys,
            vec!["personId-3", "amount-3", "isPaid-3", "accountId-3", "paidDate-3"]
        );
    }

    #[test]
    fn test_paid_split_prefills_account_and_date() {
        let group = template().generate(0, true);

        assert_eq!(
            group.field(SplitField::IsPaid).default_value,
            FieldValue::Bool(true)
        );
        assert_eq!(group.field(SplitField::AccountId).held(), Some(10));
        assert_eq!(group.field(SplitField::PaidDate).input(), "2024-08-01");
        assert!(group.field(SplitField::AccountId).required);
    }

    #[test]
    fn test_unpaid_split_leaves_account_and_date_empty() {
        let group = template().generate(0, false);

        assert_eq!(
            group.field(SplitField::IsPaid).default_value,
            FieldValue::Bool(false)
        );
        assert_eq!(group.field(SplitField::AccountId).held(), None);
        assert_eq!(group.field(SplitField::PaidDate).input(), "");
        assert!(!group.field(SplitField::AccountId).required);
    }

    #[test]
    fn test_prefilled_copies_persisted_split() {
        let split = Split {
            id: SplitId::new(5),
            record_id: RecordId::new(2),
            amount: Decimal::new(750, 2),
            person_id: PersonId::new(1),
            is_paid: true,
            account_id: Some(AccountId::new(11)),
            paid_date: NaiveDate::from_ymd_opt(2024, 7, 30),
        };
        let fields = template().prefilled(1, &split);

        assert_eq!(fields[0].held(), Some(1));
        assert_eq!(fields[1].input(), "7.50");
        assert_eq!(fields[2].default_value, FieldValue::Bool(true));
        assert_eq!(fields[3].held(), Some(11));
        assert_eq!(fields[4].input(), "2024-07-30");
    }

    #[test]
    fn test_add_person_extends_options() {
        let mut template = template();
        let option = template.add_person(&Person {
            id: PersonId::new(2),
            name: "Bob".to_string(),
        });

        assert_eq!(option, FieldOption::new("Bob", 2));
        let group = template.generate(0, false);
        assert_eq!(group.field(SplitField::PersonId).options().len(), 2);
    }
}
