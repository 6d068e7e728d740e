mod app;
mod event;
mod render;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::store::TaskListStore;
use app::App;
use event::KeyAction;

pub fn run(store: &mut TaskListStore, tick_ms: u64) -> Result<()> {
    let mut app = App::new(store);

    terminal::enable_raw_mode()?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        },
    )?;

    let result = run_loop(&mut terminal, &mut app, tick_ms);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run `setup`, calling `restore` if it fails so raw mode is not left on.
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_ms: u64,
) -> Result<()> {
    let tick = Duration::from_millis(tick_ms);

    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if !ct_event::poll(tick)? {
            continue;
        }
        match ct_event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if event::handle_key(app, key) == KeyAction::Quit {
                    log::debug!("quit with {} tasks", app.store.tasks().len());
                    return Ok(());
                }
            }
            // Resizes are picked up by the next draw.
            _ => {}
        }
    }
}
