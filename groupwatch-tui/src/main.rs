//! GroupWatch dashboard entry point.

use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use groupwatch_tui::api_client::RestClient;
use groupwatch_tui::commands::{handle_key, load_options, refresh_groups};
use groupwatch_tui::config::TuiConfig;
use groupwatch_tui::error::TuiError;
use groupwatch_tui::events::TuiEvent;
use groupwatch_tui::notifications::NotificationLevel;
use groupwatch_tui::persistence;
use groupwatch_tui::state::App;
use groupwatch_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Redraw and notification-expiry cadence, independent of the data refresh.
const UI_TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    groupwatch_tui::logging::init(&config.log_path)?;
    tracing::info!(api = %config.api_base_url, soft_delete = config.soft_delete, "config loaded");

    let store = RestClient::new(&config)?;
    let mut app = App::new(config, Local::now().date_naive());
    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.restore(state),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable UI state");
            app.notify(NotificationLevel::Warning, format!("Estado salvo ignorado: {err}"));
        }
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx);

    load_options(&mut app, &store).await;
    refresh_groups(&mut app, &store).await;

    let mut refresh_ticker =
        tokio::time::interval(Duration::from_millis(app.config.refresh_interval_ms));
    refresh_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    refresh_ticker.tick().await;
    let mut ui_ticker = tokio::time::interval(Duration::from_millis(UI_TICK_MS));
    ui_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ui_ticker.tick() => {
                app.expire_notifications(Utc::now());
            }
            _ = refresh_ticker.tick() => {
                app.set_today(Local::now().date_naive());
                if app.pending.is_none() {
                    refresh_groups(&mut app, &store).await;
                }
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &store, event).await {
                    break;
                }
            }
        }
    }

    let persisted = app.persisted_state();
    if let Err(err) = persistence::save(&app.config.persistence_path, &persisted) {
        tracing::warn!(error = %err, "failed to save UI state");
    }
    tracing::info!("shutting down");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

async fn handle_event(app: &mut App, store: &RestClient, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Input(key) => handle_key(app, store, key).await,
        TuiEvent::Resize { .. } => false,
    }
}
