use chrono::NaiveDate;
use ratatui::{backend::TestBackend, Terminal};
use rust_decimal::Decimal;
use tally::events::{AppCommand, DataEvent};
use tally::form::{FieldKey, RecordField, SplitField};
use tally::input::{Key, KeyEvent};
use tally::state::DialogOutcome;
use tally::testing::{seeded_store, test_today, TestApp};
use tally_store::models::{AccountId, NewRecord, NewSplit, Person, PersonId, RecordId};
use tally_store::Store;

fn label() -> FieldKey {
    RecordField::Label.into()
}

fn amount() -> FieldKey {
    RecordField::Amount.into()
}

fn split(index: usize, field: SplitField) -> FieldKey {
    FieldKey::split(index, field)
}

/// Pick `name` in the focused person dropdown
fn pick_person(app: &mut TestApp, name: &str) {
    app.type_text(name);
    app.send_key(Key::Enter);
}

fn screen_text(app: &TestApp) -> String {
    let mut terminal = Terminal::new(TestBackend::new(110, 48)).unwrap();
    terminal
        .draw(|f| tally::ui::render_app(f, app.state()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_record_without_splits() {
    let mut app = TestApp::new();
    app.fill(label(), "Groceries");
    app.fill(amount(), "25.5");
    app.send_key(Key::Enter);

    app.assert_closed();
    let result = app.result().expect("submitted");
    assert_eq!(result.record.label, "Groceries");
    assert_eq!(result.record.amount, Decimal::new(255, 1));
    assert_eq!(result.record.date, test_today());
    assert_eq!(result.record.account_id, AccountId::new(1));
    assert!(result.splits.is_empty());
}

#[test]
fn test_unpaid_split_flow() {
    let mut app = TestApp::new();
    app.fill(label(), "Dinner");
    app.fill(amount(), "30");

    app.send_ctrl('a');
    assert_eq!(app.state().dialog.current_field, Some(split(0, SplitField::PersonId)));
    assert!(!app.state().dialog.autocomplete.is_open());

    pick_person(&mut app, "Bob");
    app.fill(split(0, SplitField::Amount), "20");
    assert_eq!(
        app.state().dialog.total_label().as_deref(),
        Some("Total amount: 50.00")
    );

    app.send_key(Key::Enter);
    app.assert_closed();

    let result = app.result().expect("submitted");
    assert_eq!(result.record.amount, Decimal::new(50, 0));
    assert_eq!(result.splits.len(), 1);
    let split = &result.splits[0];
    assert_eq!(split.person_id, PersonId::new(2));
    assert_eq!(split.amount, Decimal::new(20, 0));
    assert!(!split.is_paid);
    assert_eq!(split.account_id, None);
    assert_eq!(split.paid_date, None);
}

#[test]
fn test_enter_on_fresh_split_submits_instead_of_picking() {
    let mut app = TestApp::new();
    app.fill(label(), "Dinner");
    app.fill(amount(), "30");
    app.send_ctrl('a');
    app.send_key(Key::Enter);

    app.assert_open();
    let dialog = &app.state().dialog;
    assert_eq!(dialog.field(split(0, SplitField::PersonId)).unwrap().held(), None);
    let keys: Vec<String> = dialog.errors.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["personId-0", "amount-0"]);

    // An unpaid split's empty account is skipped the same way
    app.focus(split(0, SplitField::AccountId));
    assert!(!app.state().dialog.autocomplete.is_open());
    app.send_key(Key::Enter);
    assert_eq!(
        app.state().dialog.field(split(0, SplitField::AccountId)).unwrap().held(),
        None
    );
}

#[test]
fn test_paid_split_is_prefilled() {
    let mut app = TestApp::new();
    app.fill(label(), "Cinema");
    app.fill(amount(), "12");

    app.send_ctrl('s');
    let dialog = &app.state().dialog;
    let group = dialog.splits.group(0).unwrap();
    assert!(group.paid_default());
    assert!(group.is_paid());
    assert_eq!(group.field(SplitField::AccountId).held(), Some(1));
    assert_eq!(group.field(SplitField::PaidDate).input(), "2024-07-01");

    pick_person(&mut app, "Alice");
    app.fill(split(0, SplitField::Amount), "12");
    app.send_key(Key::Enter);

    let result = app.result().expect("submitted");
    assert_eq!(result.record.amount, Decimal::new(24, 0));
    let split = &result.splits[0];
    assert!(split.is_paid);
    assert_eq!(split.account_id, Some(AccountId::new(1)));
    assert_eq!(split.paid_date, Some(test_today()));
}

#[test]
fn test_split_count_tracks_add_and_delete() {
    let mut app = TestApp::new();

    let actions = ['a', 's', 'a', 'd', 'd', 's', 'd', 'd', 'd', 'd'];
    let expected = [1, 2, 3, 2, 1, 2, 1, 0, 0, 0];
    for (action, count) in actions.into_iter().zip(expected) {
        app.send_ctrl(action);
        let splits = &app.state().dialog.splits;
        assert_eq!(splits.split_count(), count, "after ctrl+{action}");
        assert_eq!(splits.flat_len(), count * 5);
        assert_eq!(app.state().dialog.total_visible, count > 0);
    }

    assert_eq!(app.state().dialog.total_label(), None);
    app.assert_open();
}

#[test]
fn test_paid_flags_follow_split_kind() {
    let mut app = TestApp::new();
    app.send_ctrl('a');
    app.send_ctrl('s');
    app.send_ctrl('a');
    assert_eq!(
        app.state().dialog.splits.paid_flags(),
        vec![false, true, false]
    );
}

#[test]
fn test_first_split_total_ignores_empty_split_amount() {
    let mut app = TestApp::new();
    app.fill(amount(), "10");
    app.send_ctrl('a');
    assert_eq!(
        app.state().dialog.total_label().as_deref(),
        Some("Total amount: 10.00")
    );
}

#[test]
fn test_invalid_record_with_valid_splits_stays_open() {
    let mut app = TestApp::new();
    app.fill(amount(), "abc");
    app.send_ctrl('a');
    pick_person(&mut app, "Alice");
    app.fill(split(0, SplitField::Amount), "5");

    app.send_key(Key::Enter);
    app.assert_open();
    assert!(app.result().is_none());

    let dialog = &app.state().dialog;
    let keys: Vec<String> = dialog.errors.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["label", "amount"]);

    // The visible amount is never replaced by the computed total
    assert_eq!(dialog.field(amount()).unwrap().input(), "abc");
    assert_eq!(dialog.field(split(0, SplitField::Amount)).unwrap().input(), "5");
    assert_eq!(
        dialog.field(split(0, SplitField::PersonId)).unwrap().held(),
        Some(1)
    );
    assert_eq!(app.state().status.as_deref(), Some("2 fields need attention"));
}

#[test]
fn test_errors_clear_on_successful_resubmit() {
    let mut app = TestApp::new();
    app.send_ctrl('a');
    app.type_text("A");
    assert!(app.state().dialog.autocomplete.is_open());
    app.send_key(Key::Esc);
    // Esc with an open dropdown still cancels
    app.assert_closed();

    let mut app = TestApp::new();
    app.send_ctrl('a');
    app.send_key(Key::Tab);
    app.send_key(Key::Enter);
    let keys: Vec<String> = app
        .state()
        .dialog
        .errors
        .keys()
        .map(|k| k.to_string())
        .collect();
    assert_eq!(keys, vec!["label", "personId-0", "amount-0"]);

    app.fill(label(), "Taxi");
    app.focus(split(0, SplitField::PersonId));
    pick_person(&mut app, "Bob");
    app.fill(split(0, SplitField::Amount), "8");
    app.send_key(Key::Enter);

    app.assert_closed();
    assert!(app.state().dialog.errors.is_empty());
    assert_eq!(app.result().unwrap().record.amount, Decimal::new(8, 0));
}

#[test]
fn test_toggling_paid_requires_account() {
    let mut app = TestApp::new();
    app.send_ctrl('a');
    app.focus(split(0, SplitField::IsPaid));
    app.send_key(Key::Char(' '));

    let group = app.state().dialog.splits.group(0).unwrap();
    assert!(group.is_paid());
    assert!(group.field(SplitField::AccountId).required);
    assert_eq!(group.field(SplitField::AccountId).held(), Some(1));
    assert_eq!(group.field(SplitField::PaidDate).input(), "2024-07-01");
}

#[test]
fn test_create_person_inline() {
    let mut app = TestApp::new();
    app.send_ctrl('a');
    app.type_text("Carol");
    app.send_key(Key::Enter);

    let persons = app.store().persons().unwrap();
    assert_eq!(persons.len(), 3);
    assert_eq!(persons[2].name, "Carol");

    let dialog = &app.state().dialog;
    assert_eq!(
        dialog.field(split(0, SplitField::PersonId)).unwrap().held(),
        Some(persons[2].id.inner())
    );
    assert_eq!(app.state().status.as_deref(), Some("Created person \"Carol\""));

    // Later splits offer the new person too
    app.send_ctrl('a');
    let options = app
        .state()
        .dialog
        .field(split(1, SplitField::PersonId))
        .unwrap()
        .options()
        .iter()
        .map(|o| o.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(options, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn test_injected_person_event() {
    let mut app = TestApp::new();
    app.send_ctrl('a');
    let origin = split(0, SplitField::PersonId);
    app.send_data_event(DataEvent::PersonCreated {
        person: Person {
            id: PersonId::new(42),
            name: "Eve".to_string(),
        },
        origin,
    });
    assert_eq!(app.state().dialog.field(origin).unwrap().held(), Some(42));
}

#[test]
fn test_cancel_discards_everything() {
    let mut app = TestApp::new();
    app.fill(label(), "Nothing");
    app.send_ctrl('a');
    app.type_text("Zed");
    app.send_key(Key::Esc);

    app.assert_closed();
    assert_eq!(app.state().dialog.outcome, Some(DialogOutcome::Cancelled));
    assert_eq!(app.store().persons().unwrap().len(), 2);
}

fn store_with_record() -> (tally_store::MemoryStore, RecordId) {
    let mut store = seeded_store();
    let (record, _) = store
        .save_record(
            None,
            NewRecord::new(
                "Pizza",
                Decimal::new(30, 0),
                NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
                AccountId::new(1),
            ),
            vec![
                NewSplit::new(PersonId::new(2), Decimal::new(10, 0)),
                NewSplit::new(PersonId::new(1), Decimal::new(5, 0))
                    .is_paid(true)
                    .account_id(AccountId::new(2))
                    .paid_date(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()),
            ],
        )
        .unwrap();
    (store, record.id)
}

#[test]
fn test_editing_prefills_and_round_trips() {
    let (store, id) = store_with_record();
    let mut app = TestApp::editing(store, id);

    let dialog = &app.state().dialog;
    assert!(dialog.is_editing());
    assert_eq!(dialog.field(amount()).unwrap().input(), "15");
    assert_eq!(dialog.splits.split_count(), 2);
    assert_eq!(dialog.splits.paid_flags(), vec![false, true]);
    assert_eq!(dialog.total_label().as_deref(), Some("Total amount: 30.00"));

    app.send_key(Key::Enter);
    let result = app.result().expect("submitted");
    assert_eq!(result.record.amount, Decimal::new(30, 0));
    assert_eq!(result.splits.len(), 2);
    assert_eq!(result.splits[1].account_id, Some(AccountId::new(2)));
}

#[test]
fn test_editing_disables_split_bindings() {
    let (store, id) = store_with_record();
    let mut app = TestApp::editing(store, id);

    app.send_ctrl('a');
    app.send_ctrl('s');
    app.send_ctrl('d');
    assert_eq!(app.state().dialog.splits.split_count(), 2);

    app.execute(AppCommand::DeleteLastSplit);
    assert_eq!(app.state().dialog.splits.split_count(), 2);
}

#[test]
fn test_help_popup_swallows_actions() {
    let mut app = TestApp::new();
    app.send_key(Key::F(1));
    assert!(app.state().help_visible);

    app.send_ctrl('a');
    assert_eq!(app.state().dialog.splits.split_count(), 0);

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
    app.assert_open();
}

#[test]
fn test_custom_keymap() {
    let bindings = tally_config::KeyBindings {
        add_split: "alt+n".to_string(),
        submit: "ctrl+enter".to_string(),
        ..Default::default()
    };
    let keymap = tally::keymap::KeyMap::from_bindings(&bindings).unwrap();
    let mut app = TestApp::with_keymap(seeded_store(), keymap);

    app.send_ctrl('a');
    assert_eq!(app.state().dialog.splits.split_count(), 0);

    app.send_key_event(KeyEvent {
        key: Key::Char('n'),
        modifiers: tally::input::Modifiers {
            alt: true,
            ..Default::default()
        },
    });
    assert_eq!(app.state().dialog.splits.split_count(), 1);
}

#[test]
fn test_render_shows_splits_and_total() {
    let mut app = TestApp::new();
    app.fill(amount(), "10");
    app.send_ctrl('s');
    app.fill(split(0, SplitField::Amount), "5");
    app.send_ctrl('a');

    let screen = screen_text(&app);
    assert!(screen.contains("New record"));
    assert!(screen.contains("> Paid split <"));
    assert!(screen.contains("> Split <"));
    assert!(screen.contains("Total amount: 15.00"));
    assert!(screen.contains("Ctrl+A: Split"));
}

#[test]
fn test_render_help_popup() {
    let mut app = TestApp::new();
    app.send_key(Key::F(1));
    let screen = screen_text(&app);
    assert!(screen.contains("Keyboard Shortcuts"));
    assert!(screen.contains("Add paid split"));
}
