pub mod autocomplete;
pub mod reducer;
pub mod splits;
pub mod submit;
pub mod template;
pub mod total;

use crate::error::ConsistencyError;
use crate::form::{
    Field, FieldErrors, FieldKey, FieldOption, FieldValue, RecordField, SplitField, DATE_FORMAT,
};
use crate::keymap::KeyMap;
use autocomplete::AutocompleteItem;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use splits::{SplitList, SplitSignal};
use tally_store::models::{AccountBalance, Person, Record, RecordId, Split};
use template::SplitTemplate;

pub use submit::{DialogResult, ResolvedRecord, SubmitOutcome};

/// Whether the dialog creates a record or edits a stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Creating,
    Editing { record_id: RecordId },
}

/// How the dialog was closed
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Submitted(DialogResult),
    Cancelled,
}

/// Dropdown under the focused choice field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocompleteState {
    pub items: Vec<AutocompleteItem>,
    pub selection_index: usize,
}

impl AutocompleteState {
    pub fn is_open(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn selected(&self) -> Option<&AutocompleteItem> {
        self.items.get(self.selection_index)
    }

    pub fn close(&mut self) {
        self.items.clear();
        self.selection_index = 0;
    }
}

/// State of the record dialog: the record form, its splits and the derived total
#[derive(Debug, Clone)]
pub struct RecordDialog {
    pub mode: DialogMode,
    pub record_form: Vec<Field>,
    pub splits: SplitList,
    pub template: SplitTemplate,

    // Derived total, shown only while splits exist; `None` once it overflows
    pub total: Option<Decimal>,
    pub total_visible: bool,

    pub current_field: Option<FieldKey>,
    pub autocomplete: AutocompleteState,

    // Inline validation errors from the last rejected submit
    pub errors: FieldErrors,

    pub outcome: Option<DialogOutcome>,
    today: NaiveDate,
}

impl RecordDialog {
    /// Dialog for a new record; persons and accounts are captured once here
    pub fn new(persons: &[Person], accounts: &[AccountBalance], today: NaiveDate) -> Self {
        let template = SplitTemplate::new(persons, accounts, today);
        let record_form = record_fields(&template, today);

        let mut dialog = Self {
            mode: DialogMode::Creating,
            record_form,
            splits: SplitList::new(),
            template,
            total: Some(Decimal::ZERO),
            total_visible: false,
            current_field: None,
            autocomplete: AutocompleteState::default(),
            errors: FieldErrors::new(),
            outcome: None,
            today,
        };
        dialog.focus(Some(RecordField::Label.into()));
        dialog
    }

    /// Dialog pre-populated from a stored record and its splits.
    ///
    /// The visible primary amount is the record's own share: the stored
    /// amount minus what the splits account for.
    pub fn editing(
        record: &Record,
        splits: &[Split],
        persons: &[Person],
        accounts: &[AccountBalance],
        today: NaiveDate,
    ) -> Result<Self, ConsistencyError> {
        let mut dialog = Self::new(persons, accounts, today);
        dialog.mode = DialogMode::Editing {
            record_id: record.id,
        };

        // Data the dialog could not have produced keeps the stored amount
        let own_share = splits
            .iter()
            .try_fold(Decimal::ZERO, |sum, s| sum.checked_add(s.amount))
            .and_then(|sum| record.amount.checked_sub(sum))
            .unwrap_or(record.amount);
        for field in dialog.record_form.iter_mut() {
            let FieldKey::Record(record_field) = field.key else {
                continue;
            };
            *field = match record_field {
                RecordField::Label => field.clone().with_text_default(record.label.clone()),
                RecordField::Amount => field.clone().with_text_default(own_share.to_string()),
                RecordField::Date => field
                    .clone()
                    .with_text_default(record.date.format(DATE_FORMAT).to_string()),
                RecordField::AccountId => field
                    .clone()
                    .with_selected_default(record.account_id.inner()),
                RecordField::IsIncome => field
                    .clone()
                    .with_default(FieldValue::Bool(record.is_income)),
            };
        }

        let flat: Vec<Field> = splits
            .iter()
            .enumerate()
            .flat_map(|(index, split)| dialog.template.prefilled(index, split))
            .collect();
        dialog.splits = SplitList::from_existing(flat)?;
        dialog.total_visible = !dialog.splits.is_empty();
        dialog.recompute_total(true);

        tracing::info!(
            "Editing record {} with {} split(s)",
            record.id,
            dialog.splits.split_count()
        );
        Ok(dialog)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DialogMode::Editing { .. })
    }

    pub fn is_closed(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn field(&self, key: FieldKey) -> Option<&Field> {
        match key {
            FieldKey::Record(_) => self.record_form.iter().find(|f| f.key == key),
            FieldKey::Split { index, field } => self.splits.group(index).map(|g| g.field(field)),
        }
    }

    pub fn field_mut(&mut self, key: FieldKey) -> Option<&mut Field> {
        match key {
            FieldKey::Record(_) => self.record_form.iter_mut().find(|f| f.key == key),
            FieldKey::Split { index, field } => {
                self.splits.group_mut(index).map(|g| g.field_mut(field))
            }
        }
    }

    pub fn focused_field(&self) -> Option<&Field> {
        self.current_field.and_then(|key| self.field(key))
    }

    /// Record fields first, then every split group in index order
    pub fn focus_order(&self) -> Vec<FieldKey> {
        self.record_form
            .iter()
            .map(|f| f.key)
            .chain(self.splits.flat_fields().map(|f| f.key))
            .collect()
    }

    pub fn focus(&mut self, key: Option<FieldKey>) {
        self.current_field = key;
        self.refresh_autocomplete();
    }

    /// Move focus to the next or previous field, wrapping around
    pub fn navigate(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            return;
        }

        let position = self
            .current_field
            .and_then(|key| order.iter().position(|k| *k == key));
        let next = match position {
            Some(i) if forward => (i + 1) % order.len(),
            Some(i) => (i + order.len() - 1) % order.len(),
            None if forward => 0,
            None => order.len() - 1,
        };
        self.focus(Some(order[next]));
    }

    /// Recompute the suggestion list for the focused field
    pub fn refresh_autocomplete(&mut self) {
        let items = self
            .focused_field()
            .map(autocomplete::suggestions)
            .unwrap_or_default();
        self.autocomplete = AutocompleteState {
            items,
            selection_index: 0,
        };
    }

    pub fn select_autocomplete(&mut self, up: bool) {
        let count = self.autocomplete.items.len();
        if count == 0 {
            return;
        }
        let index = self.autocomplete.selection_index;
        self.autocomplete.selection_index = if up {
            (index + count - 1) % count
        } else {
            (index + 1) % count
        };
    }

    /// Edit the focused field; amount edits refresh the total
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut Field)) {
        let Some(key) = self.current_field else {
            return;
        };
        if let Some(field) = self.field_mut(key) {
            edit(field);
        }
        if key.is_amount() {
            self.recompute_total(true);
        }
        self.refresh_autocomplete();
    }

    /// Flip a checkbox; a split's paid flag also adjusts its account and date
    pub fn toggle_focused(&mut self) {
        let Some(key) = self.current_field else {
            return;
        };
        if !self.field(key).is_some_and(Field::is_boolean) {
            return;
        }
        self.edit_focused(Field::toggle);

        if let FieldKey::Split {
            index,
            field: SplitField::IsPaid,
        } = key
        {
            if let Some(group) = self.splits.group_mut(index) {
                group.sync_paid(&self.template);
            }
        }
    }

    /// Put a dropdown pick into the focused field
    pub fn select_option(&mut self, option: &FieldOption) {
        self.edit_focused(|field| field.select(option));
    }

    pub fn add_split(&mut self, paid: bool) -> usize {
        let (index, signals) = self.splits.add_split(&self.template, paid);
        self.apply_signals(&signals);
        index
    }

    pub fn delete_last_split(&mut self) {
        let signals = self.splits.delete_last_split();
        self.apply_signals(&signals);
    }

    fn apply_signals(&mut self, signals: &[SplitSignal]) {
        for signal in signals {
            match *signal {
                SplitSignal::Added { index } => {
                    tracing::info!("Split {} added", index);
                }
                SplitSignal::Removed { index } => {
                    tracing::info!("Split {} removed", index);
                    self.errors.retain(|key, _| key.split_index() != Some(index));
                    if self.current_field.and_then(|k| k.split_index()) == Some(index) {
                        self.focus(Some(RecordField::Amount.into()));
                    }
                    self.recompute_total(true);
                }
                SplitSignal::FocusFirstField { index } => {
                    self.focus(Some(FieldKey::split(index, SplitField::PersonId)));
                }
                SplitSignal::TotalShown => {
                    self.total_visible = true;
                    // The fresh split has no amount yet
                    self.recompute_total(false);
                }
                SplitSignal::TotalHidden => {
                    self.total_visible = false;
                }
            }
        }
    }

    pub fn recompute_total(&mut self, include_splits: bool) {
        let primary = self
            .field(RecordField::Amount.into())
            .map(Field::input)
            .unwrap_or_default();
        self.total = total::recompute(primary, &self.splits.amount_inputs(), include_splits);
    }

    pub fn total_label(&self) -> Option<String> {
        if !self.total_visible {
            return None;
        }
        total::label(self.total, self.splits.split_count())
    }

    /// Make a newly created person available everywhere and pick it in `origin`
    pub fn add_person(&mut self, person: &Person, origin: FieldKey) {
        let option = self.template.add_person(person);
        for group in self.splits.groups_mut() {
            group.field_mut(SplitField::PersonId).push_option(option.clone());
        }

        if let Some(field) = self.field_mut(origin) {
            field.select(&option);
        }
        self.errors.remove(&origin);
        self.refresh_autocomplete();
    }

    pub fn cancel(&mut self) {
        tracing::info!("Record dialog cancelled");
        self.outcome = Some(DialogOutcome::Cancelled);
    }
}

fn record_fields(template: &SplitTemplate, today: NaiveDate) -> Vec<Field> {
    let mut account = Field::choice(
        RecordField::AccountId.into(),
        "Account",
        template.account_options().to_vec(),
    )
    .required();
    if let Some(first) = template.default_account() {
        account = account.with_selected_default(first.value);
    }

    vec![
        Field::text(RecordField::Label.into(), "Label").required(),
        Field::number(RecordField::Amount.into(), "Amount").required(),
        Field::date(RecordField::Date.into(), "Date")
            .required()
            .with_text_default(today.format(DATE_FORMAT).to_string()),
        account,
        Field::boolean(RecordField::IsIncome.into(), "Income"),
    ]
}

/// Top-level state: the dialog plus the chrome around it
#[derive(Debug, Clone)]
pub struct AppState {
    pub dialog: RecordDialog,
    pub keymap: KeyMap,

    // UI state
    pub help_visible: bool,
    pub status: Option<String>,
}

impl AppState {
    pub fn new(dialog: RecordDialog, keymap: KeyMap) -> Self {
        Self {
            dialog,
            keymap,
            help_visible: false,
            status: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.dialog.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_store::models::{AccountId, PersonId, SplitId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn persons() -> Vec<Person> {
        vec![
            Person {
                id: PersonId::new(1),
                name: "Alice".to_string(),
            },
            Person {
                id: PersonId::new(2),
                name: "Bob".to_string(),
            },
        ]
    }

    fn accounts() -> Vec<AccountBalance> {
        vec![AccountBalance {
            id: AccountId::new(1),
            name: "Checking".to_string(),
            balance: Decimal::ZERO,
        }]
    }

    fn dialog() -> RecordDialog {
        RecordDialog::new(&persons(), &accounts(), today())
    }

    fn type_into(dialog: &mut RecordDialog, key: FieldKey, text: &str) {
        dialog.focus(Some(key));
        for c in text.chars() {
            dialog.edit_focused(|f| f.push_char(c));
        }
    }

    #[test]
    fn test_new_dialog_defaults() {
        let dialog = dialog();

        assert_eq!(dialog.current_field, Some(RecordField::Label.into()));
        assert_eq!(dialog.splits.split_count(), 0);
        assert_eq!(dialog.total_label(), None);
        assert_eq!(
            dialog.field(RecordField::Date.into()).unwrap().input(),
            "2024-06-01"
        );
        assert_eq!(
            dialog.field(RecordField::AccountId.into()).unwrap().held(),
            Some(1)
        );
    }

    #[test]
    fn test_navigation_wraps_through_splits() {
        let mut dialog = dialog();
        dialog.add_split(false);
        assert_eq!(
            dialog.current_field,
            Some(FieldKey::split(0, SplitField::PersonId))
        );

        for _ in 0..4 {
            dialog.navigate(true);
        }
        assert_eq!(
            dialog.current_field,
            Some(FieldKey::split(0, SplitField::PaidDate))
        );
        dialog.navigate(true);
        assert_eq!(dialog.current_field, Some(RecordField::Label.into()));
        dialog.navigate(false);
        assert_eq!(
            dialog.current_field,
            Some(FieldKey::split(0, SplitField::PaidDate))
        );
    }

    #[test]
    fn test_total_tracks_amount_edits() {
        let mut dialog = dialog();
        type_into(&mut dialog, RecordField::Amount.into(), "10");
        assert_eq!(dialog.total, Some(Decimal::new(10, 0)));

        dialog.add_split(false);
        assert_eq!(
            dialog.total_label(),
            Some("Total amount: 10.00".to_string())
        );

        type_into(&mut dialog, FieldKey::split(0, SplitField::Amount), "5");
        assert_eq!(
            dialog.total_label(),
            Some("Total amount: 15.00".to_string())
        );

        dialog.delete_last_split();
        assert_eq!(dialog.total_label(), None);
        assert_eq!(dialog.total, Some(Decimal::new(10, 0)));
    }

    #[test]
    fn test_toggle_paid_updates_requirements() {
        let mut dialog = dialog();
        dialog.add_split(false);
        dialog.focus(Some(FieldKey::split(0, SplitField::IsPaid)));
        dialog.toggle_focused();

        let group = dialog.splits.group(0).unwrap();
        assert!(group.is_paid());
        assert!(group.field(SplitField::AccountId).required);
        assert_eq!(group.field(SplitField::AccountId).held(), Some(1));
    }

    #[test]
    fn test_add_person_reaches_every_group() {
        let mut dialog = dialog();
        dialog.add_split(false);
        dialog.add_split(false);

        let carol = Person {
            id: PersonId::new(3),
            name: "Carol".to_string(),
        };
        let origin = FieldKey::split(1, SplitField::PersonId);
        dialog.add_person(&carol, origin);

        for group in dialog.splits.groups() {
            assert_eq!(group.field(SplitField::PersonId).options().len(), 3);
        }
        assert_eq!(dialog.field(origin).unwrap().held(), Some(3));
        assert_eq!(
            dialog
                .field(FieldKey::split(0, SplitField::PersonId))
                .unwrap()
                .held(),
            None
        );

        // Later groups see the new person too
        dialog.add_split(false);
        let group = dialog.splits.group(2).unwrap();
        assert_eq!(group.field(SplitField::PersonId).options().len(), 3);
    }

    #[test]
    fn test_editing_prefills_record_and_splits() {
        let record = Record {
            id: RecordId::new(4),
            label: "Dinner".to_string(),
            amount: Decimal::new(30, 0),
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            account_id: AccountId::new(1),
            is_income: false,
        };
        let splits = vec![
            Split {
                id: SplitId::new(1),
                record_id: record.id,
                amount: Decimal::new(10, 0),
                person_id: PersonId::new(1),
                is_paid: true,
                account_id: Some(AccountId::new(1)),
                paid_date: Some(today()),
            },
            Split {
                id: SplitId::new(2),
                record_id: record.id,
                amount: Decimal::new(5, 0),
                person_id: PersonId::new(2),
                is_paid: false,
                account_id: None,
                paid_date: None,
            },
        ];

        let dialog = RecordDialog::editing(&record, &splits, &persons(), &accounts(), today())
            .unwrap();

        assert!(dialog.is_editing());
        assert_eq!(dialog.splits.split_count(), 2);
        assert_eq!(dialog.splits.paid_flags(), vec![true, false]);
        assert_eq!(
            dialog.field(RecordField::Amount.into()).unwrap().input(),
            "15"
        );
        assert_eq!(
            dialog.total_label(),
            Some("Total amount: 30.00".to_string())
        );
    }
}
