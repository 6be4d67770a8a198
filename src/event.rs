use crossterm::event::Event;

use crate::catalog::CatalogEvent;
use crate::settings::SettingsEvent;
use crate::suggest::SuggestionEvent;

/// Everything the host loop reacts to, delivered one at a time.
#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    Catalog(CatalogEvent),
    Settings(SettingsEvent),
    Suggestion(SuggestionEvent),
}
