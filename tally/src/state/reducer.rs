use super::AppState;
use crate::events::DataEvent;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        // New person stored; offer it everywhere and pick it where it was typed
        DataEvent::PersonCreated { person, origin } => {
            tracing::info!("Person created: {} ({})", person.name, person.id);
            state.dialog.add_person(&person, origin);
            state.status = Some(format!("Created person \"{}\"", person.name));
        }

        DataEvent::PersonCreateFailed { name, error } => {
            tracing::error!("Failed to create person {}: {}", name, error);
            state.status = Some(format!("Could not create \"{}\": {}", name, error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldKey, SplitField};
    use crate::keymap::KeyMap;
    use crate::state::RecordDialog;
    use chrono::NaiveDate;
    use tally_store::models::{Person, PersonId};

    fn state() -> AppState {
        let dialog = RecordDialog::new(&[], &[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        AppState::new(dialog, KeyMap::default())
    }

    #[test]
    fn test_person_created_selects_in_origin() {
        let mut state = state();
        state.dialog.add_split(false);
        let origin = FieldKey::split(0, SplitField::PersonId);

        reduce_data_event(
            &mut state,
            DataEvent::PersonCreated {
                person: Person {
                    id: PersonId::new(9),
                    name: "Dana".to_string(),
                },
                origin,
            },
        );

        assert_eq!(state.dialog.field(origin).unwrap().held(), Some(9));
        assert_eq!(state.status.as_deref(), Some("Created person \"Dana\""));
    }

    #[test]
    fn test_person_create_failure_sets_status() {
        let mut state = state();
        reduce_data_event(
            &mut state,
            DataEvent::PersonCreateFailed {
                name: "Dana".to_string(),
                error: "Person Dana already exists".to_string(),
            },
        );

        assert!(state.status.unwrap().starts_with("Could not create"));
    }
}
