mod core;
mod event_bus;
mod event_loop;
mod host;
mod state;
pub(crate) mod terminal_session;
mod view_ops;

#[cfg(test)]
mod tests;

pub use core::{App, StartOptions};
pub use host::{HostCollaborators, PreferencesPanel, SessionTracker};
pub use state::{AppState, Mode, StatusState};
