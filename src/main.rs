//! mapty - Terminal Workout Log
//!
//! Log runs and rides by clicking a map in the terminal. Workouts are shown
//! as map markers and as a list, and saved to a JSON file between sessions.

use std::fs;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use mapty::application::App;
use mapty::config::Cli;
use mapty::infrastructure::{init_logging, spawn_position_lookup, FileStorage, GeolocationError, PositionResult};
use mapty::presentation::{render_ui, AppLayout, InputHandler};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Entry point for the mapty terminal workout log.
///
/// Loads saved workouts, starts the position lookup in the background, sets
/// up the terminal and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the data directory or the terminal cannot be set up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _log_guard = if cli.no_log {
        None
    } else {
        fs::create_dir_all(&cli.data_dir)?;
        init_logging(&cli.data_dir)
    };
    tracing::info!(data_dir = %cli.data_dir.display(), "starting");

    let storage = FileStorage::new(&cli.data_dir);
    let mut app: App = App::new(Box::new(storage), cli.settings());
    let position = spawn_position_lookup(cli.geolocator());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &position);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal failure");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Delivers the position fix when it arrives, redraws, and dispatches key
/// and mouse input. Returns when a quit key is pressed.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    position: &Receiver<PositionResult>,
) -> io::Result<()> {
    let mut awaiting_position = true;

    loop {
        if awaiting_position {
            match position.try_recv() {
                Ok(result) => {
                    app.handle_position(result);
                    awaiting_position = false;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    let error = GeolocationError::Unresolved("lookup stopped without a result".to_string());
                    app.location_failed(&error);
                    awaiting_position = false;
                }
            }
        }

        let area = terminal.draw(|f| render_ui(f, app))?.area;
        let layout = AppLayout::for_app(area, app);

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if InputHandler::is_quit(app, key.code, key.modifiers) {
                    return Ok(());
                }
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
            Event::Mouse(mouse) => InputHandler::handle_mouse_event(app, mouse, &layout),
            _ => {}
        }
    }
}
