use crate::error::StoreError;
use crate::models::{
    Account, AccountBalance, NewAccount, NewPerson, NewRecord, NewSplit, Person, Record, RecordId,
    Split,
};

/// Persistence collaborator used by the record dialog
///
/// Reads happen once when a dialog opens; writes happen when a person is
/// created inline or when a submitted dialog is saved.
pub trait Store {
    /// All persons, ordered by id
    fn persons(&self) -> Result<Vec<Person>, StoreError>;

    /// All visible accounts with their current balance, ordered by id
    fn accounts_with_balance(&self) -> Result<Vec<AccountBalance>, StoreError>;

    fn create_person(&mut self, person: NewPerson) -> Result<Person, StoreError>;

    fn create_account(&mut self, account: NewAccount) -> Result<Account, StoreError>;

    /// A record together with its splits
    fn record(&self, id: RecordId) -> Result<(Record, Vec<Split>), StoreError>;

    /// Create a record, or overwrite `existing` and replace its splits
    fn save_record(
        &mut self,
        existing: Option<RecordId>,
        record: NewRecord,
        splits: Vec<NewSplit>,
    ) -> Result<(Record, Vec<Split>), StoreError>;
}
