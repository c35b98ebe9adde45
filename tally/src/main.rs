use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use tally::keymap::KeyMap;
use tally::logging::init_logging;
use tally::state::{AppState, DialogOutcome, RecordDialog};
use tally::App;
use tally_config::Settings;
use tally_store::models::{NewAccount, RecordId};
use tally_store::{JsonStore, Store};

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "Record a transaction and split it between people",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Edit a stored record instead of creating a new one
    #[arg(long = "edit", value_name = "RECORD_ID")]
    edit: Option<i64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Create an account and exit
    AddAccount {
        name: String,
        /// Beginning balance
        #[arg(default_value = "0", allow_negative_numbers = true)]
        balance: Decimal,

        #[arg(long = "description", value_name = "TEXT")]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new()?;
    let keymap = KeyMap::from_bindings(&settings.keybindings)?;
    let log_path = init_logging(&settings.log_level)?;
    tracing::info!("tally starting, logging to {}", log_path.display());

    let data_file = match &settings.data_file {
        Some(path) => path.clone(),
        None => JsonStore::default_path()?,
    };
    let mut store = JsonStore::open(data_file)?;

    if let Some(Command::AddAccount {
        name,
        balance,
        description,
    }) = cli.command
    {
        let mut account = NewAccount::new(name).beginning_balance(balance);
        if let Some(description) = description {
            account = account.description(description);
        }
        let account = store.create_account(account)?;
        println!("Created account #{} {}", account.id, account.name);
        return Ok(());
    }

    let existing = cli.edit.map(RecordId::new);
    let dialog = existing.map(|id| store.record(id)).transpose()?;

    let persons = store.persons()?;
    let accounts = store.accounts_with_balance()?;
    if accounts.is_empty() {
        bail!("No accounts yet; create one with `tally add-account <name>`");
    }

    let today = Local::now().date_naive();
    let dialog = match dialog {
        Some((record, splits)) => {
            RecordDialog::editing(&record, &splits, &persons, &accounts, today)?
        }
        None => RecordDialog::new(&persons, &accounts, today),
    };

    let (state, mut store) = App::new(AppState::new(dialog, keymap), store)
        .run()
        .await?;

    match state.dialog.outcome {
        Some(DialogOutcome::Submitted(result)) => {
            let (record, splits) = result.into_new();
            let (record, splits) = store.save_record(existing, record, splits)?;
            tracing::info!("Saved record {} with {} splits", record.id, splits.len());
            println!(
                "Saved record #{} {} {} ({} split{})",
                record.id,
                record.label,
                record.amount,
                splits.len(),
                if splits.len() == 1 { "" } else { "s" }
            );
        }
        Some(DialogOutcome::Cancelled) | None => {
            tracing::info!("Dialog cancelled, nothing saved");
        }
    }

    Ok(())
}
