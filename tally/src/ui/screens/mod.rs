pub mod record_dialog;
