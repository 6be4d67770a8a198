use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::AppResult;
use crate::event::DomainEvent;

use super::core::{App, Inbound};
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

pub(crate) enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let (mut input_rx, mut bus) = EventBusRuntime::spawn();
        tracing::info!("event loop started");

        let result = self.drive(&mut session, &mut input_rx).await;

        bus.shutdown();
        self.shutdown();
        session.restore()?;
        result
    }

    async fn drive(
        &mut self,
        session: &mut impl TerminalSurface,
        input_rx: &mut UnboundedReceiver<DomainEvent>,
    ) -> AppResult<()> {
        loop {
            if self.state.needs_redraw {
                self.render_frame(session)?;
                self.state.needs_redraw = false;
            }

            let waited = wait_next_event(input_rx, &mut self.inbound).await;
            let event = match waited {
                WaitEvent::Event(event) => event,
                WaitEvent::Closed => break,
            };
            if matches!(self.dispatch(event), LoopControl::Break) {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn dispatch(&mut self, event: DomainEvent) -> LoopControl {
        match event {
            DomainEvent::Input(event) => {
                self.deliver_store_events();
                if self.handle_input_event(event).quit_requested {
                    return LoopControl::Break;
                }
            }
            DomainEvent::InputError(message) => {
                tracing::warn!("terminal input error: {message}");
                self.state.status.message = format!("input error: {message}");
                self.state.needs_redraw = true;
            }
            DomainEvent::Catalog(event) => self.on_catalog_event(event),
            DomainEvent::Settings(event) => self.on_settings_event(event),
            DomainEvent::Suggestion(event) => self.on_suggestion_event(event),
        }
        LoopControl::Continue
    }
}

async fn wait_next_event(
    input_rx: &mut UnboundedReceiver<DomainEvent>,
    inbound: &mut Inbound,
) -> WaitEvent {
    tokio::select! {
        biased;
        Some(event) = inbound.catalog_rx.recv() => {
            WaitEvent::Event(DomainEvent::Catalog(event))
        },
        Some(event) = inbound.settings_rx.recv() => {
            WaitEvent::Event(DomainEvent::Settings(event))
        },
        maybe_input = input_rx.recv() => {
            match maybe_input {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        Some(event) = inbound.suggestion_rx.recv() => {
            WaitEvent::Event(DomainEvent::Suggestion(event))
        },
    }
}
