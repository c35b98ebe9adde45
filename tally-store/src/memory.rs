use crate::error::StoreError;
use crate::models::*;
use crate::store::Store;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the store persists
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub splits: Vec<Split>,
}

/// In-memory store, also the working copy behind `JsonStore`
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    data: Dataset,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(data: Dataset) -> Self {
        Self { data }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
        ids.max().unwrap_or(0) + 1
    }

    fn balance_of(&self, account: &Account) -> Decimal {
        let records: Decimal = self
            .data
            .records
            .iter()
            .filter(|r| r.account_id == account.id)
            .map(Record::signed_amount)
            .sum();

        // Paid splits are money received back into the account they name
        let repaid: Decimal = self
            .data
            .splits
            .iter()
            .filter(|s| s.is_paid && s.account_id == Some(account.id))
            .map(|s| s.amount)
            .sum();

        account.beginning_balance + records + repaid
    }

    fn splits_of(&self, record_id: RecordId) -> Vec<Split> {
        self.data
            .splits
            .iter()
            .filter(|s| s.record_id == record_id)
            .cloned()
            .collect()
    }
}

impl Store for MemoryStore {
    fn persons(&self) -> Result<Vec<Person>, StoreError> {
        let mut persons = self.data.persons.clone();
        persons.sort_by_key(|p| p.id);
        Ok(persons)
    }

    fn accounts_with_balance(&self) -> Result<Vec<AccountBalance>, StoreError> {
        let mut accounts: Vec<AccountBalance> = self
            .data
            .accounts
            .iter()
            .filter(|a| !a.hidden)
            .map(|a| AccountBalance {
                id: a.id,
                name: a.name.clone(),
                balance: self.balance_of(a),
            })
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    fn create_person(&mut self, person: NewPerson) -> Result<Person, StoreError> {
        let name = person.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self
            .data
            .persons
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::DuplicatePerson(name.to_string()));
        }

        let created = Person {
            id: PersonId::new(Self::next_id(
                self.data.persons.iter().map(|p| p.id.inner()),
            )),
            name: name.to_string(),
        };
        tracing::debug!("Created person {} ({})", created.name, created.id);
        self.data.persons.push(created.clone());
        Ok(created)
    }

    fn create_account(&mut self, account: NewAccount) -> Result<Account, StoreError> {
        let created = Account {
            id: AccountId::new(Self::next_id(
                self.data.accounts.iter().map(|a| a.id.inner()),
            )),
            name: account.name,
            description: account.description,
            beginning_balance: account.beginning_balance,
            hidden: false,
        };
        tracing::debug!("Created account {} ({})", created.name, created.id);
        self.data.accounts.push(created.clone());
        Ok(created)
    }

    fn record(&self, id: RecordId) -> Result<(Record, Vec<Split>), StoreError> {
        let record = self
            .data
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: "Record",
                id: id.inner(),
            })?;
        let splits = self.splits_of(id);
        Ok((record, splits))
    }

    fn save_record(
        &mut self,
        existing: Option<RecordId>,
        record: NewRecord,
        splits: Vec<NewSplit>,
    ) -> Result<(Record, Vec<Split>), StoreError> {
        let record_id = match existing {
            Some(id) => {
                if !self.data.records.iter().any(|r| r.id == id) {
                    return Err(StoreError::NotFound {
                        kind: "Record",
                        id: id.inner(),
                    });
                }
                id
            }
            None => RecordId::new(Self::next_id(
                self.data.records.iter().map(|r| r.id.inner()),
            )),
        };

        let saved = Record {
            id: record_id,
            label: record.label,
            amount: record.amount,
            date: record.date,
            account_id: record.account_id,
            is_income: record.is_income,
        };

        match self.data.records.iter_mut().find(|r| r.id == record_id) {
            Some(slot) => *slot = saved.clone(),
            None => self.data.records.push(saved.clone()),
        }

        // Splits of an edited record are replaced wholesale
        self.data.splits.retain(|s| s.record_id != record_id);
        let mut next_split_id = Self::next_id(self.data.splits.iter().map(|s| s.id.inner()));
        for split in splits {
            self.data.splits.push(Split {
                id: SplitId::new(next_split_id),
                record_id,
                amount: split.amount,
                person_id: split.person_id,
                is_paid: split.is_paid,
                account_id: split.account_id,
                paid_date: split.paid_date,
            });
            next_split_id += 1;
        }

        let saved_splits = self.splits_of(record_id);
        tracing::info!(
            "Saved record {} with {} splits",
            record_id,
            saved_splits.len()
        );
        Ok((saved, saved_splits))
    }
}
