mod app;
mod ui;

pub use app::{App, Focus, InputField};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jaljal_core::RenderOptions;
use jaljal_engine::SearchEngine;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

pub async fn run(
    engine: SearchEngine,
    render_options: RenderOptions,
    default_attempts: u32,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, render_options, default_attempts);

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_outcomes();
        terminal.draw(|f| ui::draw(f, app))?;

        // Searches run on spawned tasks; give them room between key polls
        if !event::poll(TICK)? {
            tokio::task::yield_now().await;
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        if app.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.toggle_help(),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(()),
            KeyCode::Enter => app.submit(),
            KeyCode::Tab => app.cycle_focus(),
            _ if app.focus == Focus::Results => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('?') => app.toggle_help(),
                KeyCode::Char('j') | KeyCode::Down => app.scroll_results_down(),
                KeyCode::Char('k') | KeyCode::Up => app.scroll_results_up(),
                _ => {}
            },
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        }
    }
}
