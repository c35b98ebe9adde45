use crate::error::ConsistencyError;
use crate::events::{AppCommand, DataEvent};
use crate::form::Field;
use crate::state::autocomplete::AutocompleteItem;
use crate::state::{reducer, AppState, SubmitOutcome};
use tally_store::models::NewPerson;
use tally_store::Store;

/// Execute a command against the dialog state, calling the store for side effects.
///
/// Only invariant violations come back as errors; validation problems and
/// store failures end up in the state.
pub fn execute_command<S: Store>(
    command: AppCommand,
    state: &mut AppState,
    store: &mut S,
) -> Result<(), ConsistencyError> {
    // A new action replaces the previous status message
    if !matches!(command, AppCommand::ToggleHelp) {
        state.status = None;
    }

    match command {
        AppCommand::NavigateField { forward } => {
            state.dialog.navigate(forward);
        }

        AppCommand::AppendChar { c } => {
            state.dialog.edit_focused(|field| field.push_char(c));
        }

        AppCommand::DeleteChar => {
            state.dialog.edit_focused(Field::pop_char);
        }

        AppCommand::ClearField => {
            state.dialog.edit_focused(Field::clear);
        }

        AppCommand::ToggleField => {
            state.dialog.toggle_focused();
        }

        AppCommand::SelectAutocompleteItem { up } => {
            state.dialog.select_autocomplete(up);
        }

        AppCommand::ConfirmAutocompleteSelection => {
            let Some(item) = state.dialog.autocomplete.selected().cloned() else {
                return Ok(());
            };
            match item {
                AutocompleteItem::Existing(option) => {
                    state.dialog.select_option(&option);
                }
                AutocompleteItem::Create(name) => {
                    if let Some(origin) = state.dialog.current_field {
                        return execute_command(
                            AppCommand::CreatePerson { name, origin },
                            state,
                            store,
                        );
                    }
                }
            }
        }

        AppCommand::CreatePerson { name, origin } => {
            tracing::info!("Creating person {}", name);
            let event = match store.create_person(NewPerson::new(name.clone())) {
                Ok(person) => DataEvent::PersonCreated { person, origin },
                Err(e) => DataEvent::PersonCreateFailed {
                    name,
                    error: e.to_string(),
                },
            };
            reducer::reduce_data_event(state, event);
        }

        AppCommand::AddSplit { paid } => {
            if state.dialog.is_editing() {
                tracing::warn!("Ignoring add split while editing a record");
                return Ok(());
            }
            state.dialog.add_split(paid);
        }

        AppCommand::DeleteLastSplit => {
            if state.dialog.is_editing() {
                tracing::warn!("Ignoring delete split while editing a record");
                return Ok(());
            }
            state.dialog.delete_last_split();
        }

        AppCommand::Submit => match state.dialog.submit()? {
            SubmitOutcome::Accepted(_) => {}
            SubmitOutcome::Rejected(errors) => {
                state.status = Some(format!(
                    "{} field{} need{} attention",
                    errors.len(),
                    if errors.len() == 1 { "" } else { "s" },
                    if errors.len() == 1 { "s" } else { "" },
                ));
            }
        },

        AppCommand::Cancel => {
            state.dialog.cancel();
        }

        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldKey, RecordField, SplitField};
    use crate::keymap::KeyMap;
    use crate::state::{DialogOutcome, RecordDialog};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tally_store::models::NewAccount;
    use tally_store::MemoryStore;

    fn setup() -> (AppState, MemoryStore) {
        let mut store = MemoryStore::new();
        store.create_person(NewPerson::new("Alice")).unwrap();
        store
            .create_account(NewAccount::new("Checking").beginning_balance(Decimal::new(100, 0)))
            .unwrap();

        let dialog = RecordDialog::new(
            &store.persons().unwrap(),
            &store.accounts_with_balance().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
        );
        (AppState::new(dialog, KeyMap::default()), store)
    }

    fn type_text(state: &mut AppState, store: &mut MemoryStore, text: &str) {
        for c in text.chars() {
            execute_command(AppCommand::AppendChar { c }, state, store).unwrap();
        }
    }

    #[test]
    fn test_create_person_from_dropdown() {
        let (mut state, mut store) = setup();
        execute_command(AppCommand::AddSplit { paid: false }, &mut state, &mut store).unwrap();
        type_text(&mut state, &mut store, "Bob");

        // "Bob" matches nobody, so the only entry is the create entry
        assert_eq!(
            state.dialog.autocomplete.selected(),
            Some(&AutocompleteItem::Create("Bob".to_string()))
        );
        execute_command(
            AppCommand::ConfirmAutocompleteSelection,
            &mut state,
            &mut store,
        )
        .unwrap();

        let persons = store.persons().unwrap();
        assert_eq!(persons.len(), 2);
        let origin = FieldKey::split(0, SplitField::PersonId);
        assert_eq!(
            state.dialog.field(origin).unwrap().held(),
            Some(persons[1].id.inner())
        );
        assert!(!state.dialog.autocomplete.is_open());
    }

    #[test]
    fn test_duplicate_person_reports_status() {
        let (mut state, mut store) = setup();
        execute_command(AppCommand::AddSplit { paid: false }, &mut state, &mut store).unwrap();

        execute_command(
            AppCommand::CreatePerson {
                name: "alice".to_string(),
                origin: FieldKey::split(0, SplitField::PersonId),
            },
            &mut state,
            &mut store,
        )
        .unwrap();

        assert_eq!(store.persons().unwrap().len(), 1);
        assert!(state.status.unwrap().starts_with("Could not create"));
    }

    #[test]
    fn test_rejected_submit_sets_status() {
        let (mut state, mut store) = setup();
        execute_command(AppCommand::Submit, &mut state, &mut store).unwrap();

        assert_eq!(state.status.as_deref(), Some("2 fields need attention"));
        assert!(state.dialog.outcome.is_none());
    }

    #[test]
    fn test_submit_closes_dialog() {
        let (mut state, mut store) = setup();
        type_text(&mut state, &mut store, "Groceries");
        state.dialog.focus(Some(RecordField::Amount.into()));
        type_text(&mut state, &mut store, "25");

        execute_command(AppCommand::Submit, &mut state, &mut store).unwrap();
        assert!(matches!(
            state.dialog.outcome,
            Some(DialogOutcome::Submitted(_))
        ));
        assert!(state.should_quit());
    }

    #[test]
    fn test_cancel_closes_without_payload() {
        let (mut state, mut store) = setup();
        execute_command(AppCommand::Cancel, &mut state, &mut store).unwrap();
        assert_eq!(state.dialog.outcome, Some(DialogOutcome::Cancelled));
    }
}
