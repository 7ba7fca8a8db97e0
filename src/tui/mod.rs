// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, worker events)
// - Layered key dispatch: form (when visible) -> global -> focused panel

pub mod app;
pub mod component;
pub mod components;
pub mod scroll;
pub mod ui;

use crate::config::Config;
use crate::events::{ApiCommand, AppEvent};
use crate::logging::LogBuffer;
use crate::theme::Theme;
use anyhow::{Context, Result};
use app::{App, Focus};
use component::{Handled, Interactive};
use components::FormAction;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done. Blocks until the user quits.
pub async fn run_tui(
    mut event_rx: mpsc::Receiver<AppEvent>,
    command_tx: mpsc::Sender<ApiCommand>,
    log_buffer: LogBuffer,
    config: Config,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let theme = Theme::by_name(&config.theme);
    let mut app = App::new(log_buffer, theme, command_tx);
    app.start();

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx, &config.api_url).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!: keyboard input, a periodic
/// redraw tick, and outcomes from the network worker.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
    api_url: &str,
) -> Result<()> {
    // Periodic redraws (5 FPS is plenty for spinner + toast expiry)
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app, api_url))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Worker outcomes
            Some(app_event) = event_rx.recv() => {
                app.apply_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Form (modal) -> Global -> Focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: the form captures all input while visible
    if app.form_visible {
        app.form.handle_key(key_event);
        match app.form.take_action() {
            FormAction::Submit(draft) => app.submit_comment(draft),
            FormAction::Cancel => app.close_form(),
            FormAction::None => {}
        }
        return;
    }

    // Layer 2: global keys
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
            return;
        }
        _ => {}
    }

    // Layer 3: focused-panel action keys (debounced), then navigation
    match app.focus {
        Focus::Posts => match key_event.code {
            KeyCode::Enter => {
                if !app.should_debounce_action() {
                    if let Some(idx) = app.posts_panel.cursor {
                        let id = app.posts.get(idx).map(|p| p.id);
                        // Re-selecting the same post re-fetches; that is fine
                        app.select_post(id);
                        app.focus = Focus::Details;
                    }
                }
            }
            _ => {
                app.posts_panel.handle_key(key_event);
            }
        },
        Focus::Details => match key_event.code {
            KeyCode::Char('d') | KeyCode::Delete => {
                if !app.should_debounce_action() {
                    app.delete_selected_comment();
                }
            }
            KeyCode::Char('w') | KeyCode::Char('c') => {
                if !app.should_debounce_action() {
                    app.open_form();
                }
            }
            KeyCode::Char('r') => {
                if !app.should_debounce_action() {
                    app.reload_comments();
                }
            }
            _ => {
                if app.details_panel.handle_key(key_event) == Handled::No
                    && key_event.code == KeyCode::Esc
                {
                    // Nothing to clear in the panel: back to the post list
                    app.focus = Focus::Posts;
                }
            }
        },
    }
}
