use crate::app_core::{AppCore, StoreHandler};
use crate::events::{AppCommand, DataEvent};
use crate::form::FieldKey;
use crate::input::{Key, KeyEvent};
use crate::keymap::KeyMap;
use crate::state::{AppState, DialogOutcome, DialogResult, RecordDialog};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_store::models::{NewAccount, NewPerson, RecordId};
use tally_store::{MemoryStore, Store};

/// Date every test dialog treats as today
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

/// Store with persons Alice and Bob and accounts Checking and Cash
pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for name in ["Alice", "Bob"] {
        store
            .create_person(NewPerson::new(name))
            .expect("seed person");
    }
    store
        .create_account(NewAccount::new("Checking").beginning_balance(Decimal::new(500, 0)))
        .expect("seed account");
    store
        .create_account(NewAccount::new("Cash"))
        .expect("seed account");
    store
}

/// Drives the dialog core with synthetic key events against an in-memory store
pub struct TestApp {
    core: AppCore<StoreHandler<MemoryStore>>,
}

impl TestApp {
    /// Create dialog over the seeded store
    pub fn new() -> Self {
        Self::creating(seeded_store())
    }

    pub fn creating(store: MemoryStore) -> Self {
        Self::with_keymap(store, KeyMap::default())
    }

    pub fn with_keymap(store: MemoryStore, keymap: KeyMap) -> Self {
        let dialog = RecordDialog::new(
            &store.persons().expect("persons"),
            &store.accounts_with_balance().expect("accounts"),
            test_today(),
        );
        Self::from_parts(store, dialog, keymap)
    }

    /// Edit dialog for a stored record
    pub fn editing(store: MemoryStore, record_id: RecordId) -> Self {
        let (record, splits) = store.record(record_id).expect("record");
        let dialog = RecordDialog::editing(
            &record,
            &splits,
            &store.persons().expect("persons"),
            &store.accounts_with_balance().expect("accounts"),
            test_today(),
        )
        .expect("consistent split form");
        Self::from_parts(store, dialog, KeyMap::default())
    }

    fn from_parts(store: MemoryStore, dialog: RecordDialog, keymap: KeyMap) -> Self {
        Self {
            core: AppCore::new(AppState::new(dialog, keymap), StoreHandler::new(store)),
        }
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.send_key_event(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core
            .handle_key(event)
            .expect("dialog invariants hold");
    }

    /// Send a Ctrl chord
    pub fn send_ctrl(&mut self, c: char) {
        self.send_key_event(KeyEvent::with_ctrl(Key::Char(c)));
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type text into the focused field
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Tab until `key` has focus
    pub fn focus(&mut self, key: FieldKey) {
        let steps = self.state().dialog.focus_order().len();
        for _ in 0..steps {
            if self.state().dialog.current_field == Some(key) {
                return;
            }
            self.send_key(Key::Tab);
        }
        assert_eq!(
            self.state().dialog.current_field,
            Some(key),
            "field {key} is not reachable"
        );
    }

    /// Focus `key` and type `text` into it
    pub fn fill(&mut self, key: FieldKey, text: &str) {
        self.focus(key);
        self.type_text(text);
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command).expect("dialog invariants hold");
    }

    /// Inject a data event
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn store(&self) -> &MemoryStore {
        self.core.handler().store()
    }

    /// Result of a submitted dialog, if any
    pub fn result(&self) -> Option<&DialogResult> {
        match &self.state().dialog.outcome {
            Some(DialogOutcome::Submitted(result)) => Some(result),
            _ => None,
        }
    }

    /// Assert that the dialog is closed
    pub fn assert_closed(&self) {
        assert!(
            self.core.should_quit(),
            "Dialog should be closed but is still open"
        );
    }

    /// Assert that the dialog is still open
    pub fn assert_open(&self) {
        assert!(
            !self.core.should_quit(),
            "Dialog should be open but was closed: {:?}",
            self.state().dialog.outcome
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
