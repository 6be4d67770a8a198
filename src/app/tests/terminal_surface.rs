use std::convert::Infallible;
use std::io;

use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::StartOptions;
use crate::app::terminal_session::TerminalSurface;

use super::quiet_app;

struct TestTerminalSurface {
    terminal: Terminal<TestBackend>,
}

impl TestTerminalSurface {
    fn new(width: u16, height: u16) -> io::Result<Self> {
        let terminal = infallible_to_io(Terminal::new(TestBackend::new(width, height)))?;
        Ok(Self { terminal })
    }

    fn row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }
}

impl TerminalSurface for TestTerminalSurface {
    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        infallible_to_io(self.terminal.draw(render)).map(|_| ())
    }
}

fn infallible_to_io<T>(result: Result<T, Infallible>) -> io::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => match err {},
    }
}

#[test]
fn render_frame_shows_engine_and_placeholder() {
    let app = quiet_app(StartOptions {
        suggestions: Some(false),
        ..StartOptions::default()
    });
    let mut session = TestTerminalSurface::new(60, 12).expect("test terminal should initialize");

    app.render_frame(&mut session).expect("render should succeed");

    let entry_row = session.row(1);
    assert!(entry_row.contains("[DuckDuckGo ▾]"), "row was {entry_row:?}");
    assert!(entry_row.contains("Search Using DuckDuckGo"), "row was {entry_row:?}");
    assert!(session.row(11).contains("SEARCH"));
}

#[test]
fn render_frame_survives_tiny_terminal() {
    let app = quiet_app(StartOptions {
        suggestions: Some(false),
        ..StartOptions::default()
    });
    let mut session = TestTerminalSurface::new(4, 2).expect("test terminal should initialize");

    app.render_frame(&mut session).expect("render should succeed");
}
