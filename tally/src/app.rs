use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tally_store::Store;

use crate::app_core::{AppCore, StoreHandler};
use crate::input::KeyEvent;
use crate::state::AppState;

type Tui = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Terminal front end for one record dialog
pub struct App<S: Store> {
    core: AppCore<StoreHandler<S>>,
}

impl<S: Store> App<S> {
    pub fn new(state: AppState, store: S) -> Self {
        Self {
            core: AppCore::new(state, StoreHandler::new(store)),
        }
    }

    /// Run until the dialog is submitted or cancelled.
    ///
    /// Returns the final state together with the store so the caller can persist the result.
    pub async fn run(mut self) -> Result<(AppState, S)> {
        let mut terminal = init()?;
        install_panic_hook();

        let result = self.event_loop(&mut terminal).await;

        tracing::info!("Cleaning up terminal");
        exit(&mut terminal)?;
        result?;

        let (state, handler) = self.core.into_parts();
        Ok((state, handler.into_store()))
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");
        while !self.core.should_quit() {
            terminal.draw(|f| crate::ui::render_app(f, self.core.state()))?;

            match event_stream.next().await {
                Some(Ok(Event::Key(key))) if matches!(key.kind, KeyEventKind::Press) => {
                    tracing::debug!("Key press: {:?}", key);
                    self.core.handle_key(KeyEvent::from(key))?;
                }
                Some(Ok(_)) => {
                    // Resize and other events only need a redraw
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    tracing::warn!("Terminal event stream ended");
                    break;
                }
            }
        }

        tracing::info!("Dialog closed: {:?}", self.core.state().dialog.outcome);
        Ok(())
    }
}

fn init() -> Result<Tui, std::io::Error> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn exit(terminal: &mut Tui) -> Result<(), std::io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Restore the terminal before the default hook prints the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
