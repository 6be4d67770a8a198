mod terminal_surface;

use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::error::TryRecvError;

use crate::config::Config;
use crate::event::DomainEvent;

use super::core::{App, StartOptions};

fn quiet_app(options: StartOptions) -> App {
    App::new_with_config(Config::default(), options)
}

fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.dispatch(DomainEvent::Input(Event::Key(KeyEvent::new(code, modifiers))));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch), KeyModifiers::NONE);
    }
}

/// Delivers store notifications that are already queued.
fn pump_stores(app: &mut App) {
    loop {
        match app.inbound.catalog_rx.try_recv() {
            Ok(event) => {
                app.dispatch(DomainEvent::Catalog(event));
                continue;
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
        }
        match app.inbound.settings_rx.try_recv() {
            Ok(event) => {
                app.dispatch(DomainEvent::Settings(event));
                continue;
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
        }
        break;
    }
}

/// Waits for worker results until `done` holds.
fn pump_suggestions_until(app: &mut App, done: impl Fn(&App) -> bool) {
    let timeout = Duration::from_secs(3);
    let start = Instant::now();
    while !done(app) {
        if let Ok(event) = app.inbound.suggestion_rx.try_recv() {
            app.dispatch(DomainEvent::Suggestion(event));
            continue;
        }
        assert!(
            start.elapsed() <= timeout,
            "timed out waiting for suggestions"
        );
        thread::sleep(Duration::from_millis(5));
    }
}
