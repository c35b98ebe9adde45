use crate::form::FieldKey;
use tally_store::models::Person;

/// Commands to execute (user actions → state changes and store calls)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Focus
    NavigateField {
        forward: bool,
    },

    // Editing the focused field
    AppendChar {
        c: char,
    },
    DeleteChar,
    ClearField,
    ToggleField,

    // Autocomplete dropdown
    SelectAutocompleteItem {
        up: bool,
    },
    ConfirmAutocompleteSelection,
    CreatePerson {
        name: String,
        origin: FieldKey,
    },

    // Splits
    AddSplit {
        paid: bool,
    },
    DeleteLastSplit,

    // Dialog
    Submit,
    Cancel,

    // UI
    ToggleHelp,
}

/// Results coming back from the store
#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    PersonCreated { person: Person, origin: FieldKey },
    PersonCreateFailed { name: String, error: String },
}
