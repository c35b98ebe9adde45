use crate::commands::{executor, handlers};
use crate::error::ConsistencyError;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};
use tally_store::Store;

/// Trait for handling command execution
///
/// This trait abstracts the side effects of command execution, so the
/// same core drives the terminal app and the test harness.
pub trait DataEventHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(
        &mut self,
        command: AppCommand,
        state: &mut AppState,
    ) -> Result<(), ConsistencyError>;
}

/// Handler that executes commands against a store
pub struct StoreHandler<S: Store> {
    store: S,
}

impl<S: Store> StoreHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: Store> DataEventHandler for StoreHandler<S> {
    fn execute_with_context(
        &mut self,
        command: AppCommand,
        state: &mut AppState,
    ) -> Result<(), ConsistencyError> {
        executor::execute_command(command, state, &mut self.store)
    }
}

/// Testable application core without terminal dependencies
///
/// Generic over H (handler) for zero-cost abstraction.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    /// Create a new application core with the given state and handler
    pub fn new(ui_state: AppState, handler: H) -> Self {
        Self { ui_state, handler }
    }

    /// Handle keyboard input and execute the resulting command
    ///
    /// This is the main entry point for user input. It:
    /// 1. Translates the key press to an AppCommand
    /// 2. Executes the command using the configured handler
    pub fn handle_key(&mut self, event: KeyEvent) -> Result<(), ConsistencyError> {
        match handlers::handle_key_input(event, &self.ui_state) {
            Some(command) => {
                tracing::trace!("Key {:?} -> {:?}", event, command);
                self.handler
                    .execute_with_context(command, &mut self.ui_state)
            }
            None => Ok(()),
        }
    }

    /// Execute a command directly, bypassing key handling
    pub fn execute(&mut self, command: AppCommand) -> Result<(), ConsistencyError> {
        self.handler
            .execute_with_context(command, &mut self.ui_state)
    }

    /// Handle a data event (for test injection)
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit()
    }

    pub fn into_parts(self) -> (AppState, H) {
        (self.ui_state, self.handler)
    }
}
