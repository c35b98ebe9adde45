use crate::error::StoreError;
use crate::memory::{Dataset, MemoryStore};
use crate::models::*;
use crate::store::Store;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Store backed by a single JSON document, rewritten after every mutation
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str::<Dataset>(&raw)?
        } else {
            tracing::info!("No store file at {}, starting empty", path.display());
            Dataset::default()
        };

        Ok(Self {
            path,
            inner: MemoryStore::from_dataset(data),
        })
    }

    /// Default location: <data dir>/tally/tally.json
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let data_dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(data_dir.join("tally").join("tally.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` to a copy of the data and keep it only once it is on disk
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut MemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut staged = self.inner.clone();
        let value = mutate(&mut staged)?;
        let json = serde_json::to_string_pretty(staged.dataset())?;
        write_atomic(&self.path, &json)?;
        tracing::debug!("Wrote store to {}", self.path.display());
        self.inner = staged;
        Ok(value)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write next to the target and rename over it, so a crash leaves either file intact
fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl Store for JsonStore {
    fn persons(&self) -> Result<Vec<Person>, StoreError> {
        self.inner.persons()
    }

    fn accounts_with_balance(&self) -> Result<Vec<AccountBalance>, StoreError> {
        self.inner.accounts_with_balance()
    }

    fn create_person(&mut self, person: NewPerson) -> Result<Person, StoreError> {
        self.commit(|data| data.create_person(person))
    }

    fn create_account(&mut self, account: NewAccount) -> Result<Account, StoreError> {
        self.commit(|data| data.create_account(account))
    }

    fn record(&self, id: RecordId) -> Result<(Record, Vec<Split>), StoreError> {
        self.inner.record(id)
    }

    fn save_record(
        &mut self,
        existing: Option<RecordId>,
        record: NewRecord,
        splits: Vec<NewSplit>,
    ) -> Result<(Record, Vec<Split>), StoreError> {
        self.commit(|data| data.save_record(existing, record, splits))
    }
}
