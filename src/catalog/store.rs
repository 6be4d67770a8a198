use std::collections::HashSet;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::notify::{Subscribers, SubscriptionId};

use super::engine::Engine;
use super::{CatalogEvent, EngineCatalog};

/// In-memory engine catalog.
///
/// Entries are the configured engines followed by the configure entry, which
/// is only present while at least one engine exists.
#[derive(Debug, Default)]
pub struct SearchCatalog {
    entries: Vec<Engine>,
    default_id: Option<String>,
    subscribers: Subscribers<CatalogEvent>,
}

impl SearchCatalog {
    pub fn new(engines: Vec<Engine>) -> Self {
        Self {
            entries: build_entries(engines),
            default_id: None,
            subscribers: Subscribers::default(),
        }
    }

    pub fn with_default(mut self, id: impl Into<String>) -> Self {
        self.default_id = Some(id.into());
        self
    }

    pub fn subscribe(&mut self) -> (SubscriptionId, UnboundedReceiver<CatalogEvent>) {
        self.subscribers.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn replace(&mut self, engines: Vec<Engine>) {
        self.entries = build_entries(engines);
        tracing::info!(entries = self.entries.len(), "engine catalog replaced");
        self.subscribers.publish(CatalogEvent::Changed);
    }

    pub fn engine_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_selectable()).count()
    }
}

impl EngineCatalog for SearchCatalog {
    fn entries(&self) -> &[Engine] {
        &self.entries
    }

    fn default_engine(&self) -> Option<&Engine> {
        self.default_id
            .as_deref()
            .and_then(|id| {
                self.entries
                    .iter()
                    .find(|entry| entry.is_selectable() && entry.id == id)
            })
            .or_else(|| self.entries.iter().find(|entry| entry.is_selectable()))
    }
}

fn build_entries(engines: Vec<Engine>) -> Vec<Engine> {
    let mut seen = HashSet::new();
    let mut entries: Vec<Engine> = engines
        .into_iter()
        .filter(|engine| engine.is_selectable() && !engine.id.is_empty())
        .filter(|engine| seen.insert(engine.id.clone()))
        .collect();
    if !entries.is_empty() {
        entries.push(Engine::configure_entry());
    }
    entries
}

#[cfg(test)]
mod tests {
    use crate::catalog::{CatalogEvent, Engine, EngineCatalog, EngineRole};

    use super::SearchCatalog;

    fn engines() -> Vec<Engine> {
        vec![
            Engine::new("ddg", "DuckDuckGo", Some("t-ddg".to_string())),
            Engine::new("wiki", "Wikipedia", Some("t-wiki".to_string())),
        ]
    }

    #[test]
    fn configure_entry_is_appended_after_engines() {
        let catalog = SearchCatalog::new(engines());
        let entries = catalog.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].role, EngineRole::Configure);
        assert_eq!(catalog.engine_count(), 2);
        assert!(catalog.has_engines());
    }

    #[test]
    fn empty_catalog_has_no_configure_entry() {
        let catalog = SearchCatalog::new(Vec::new());
        assert!(catalog.entries().is_empty());
        assert!(!catalog.has_engines());
        assert!(catalog.default_engine().is_none());
    }

    #[test]
    fn duplicate_and_blank_ids_are_dropped() {
        let catalog = SearchCatalog::new(vec![
            Engine::new("ddg", "DuckDuckGo", None),
            Engine::new("", "Nameless", None),
            Engine::new("ddg", "Duplicate", None),
        ]);
        assert_eq!(catalog.engine_count(), 1);
        assert_eq!(catalog.entries()[0].display_name, "DuckDuckGo");
    }

    #[test]
    fn default_engine_prefers_explicit_id_then_first_entry() {
        let catalog = SearchCatalog::new(engines()).with_default("wiki");
        assert_eq!(catalog.default_engine().map(|e| e.id.as_str()), Some("wiki"));

        let catalog = SearchCatalog::new(engines()).with_default("missing");
        assert_eq!(catalog.default_engine().map(|e| e.id.as_str()), Some("ddg"));
    }

    #[test]
    fn replace_notifies_subscribers() {
        let mut catalog = SearchCatalog::new(engines());
        let (id, mut rx) = catalog.subscribe();

        catalog.replace(vec![Engine::new("crates", "Crates.io", None)]);
        assert_eq!(rx.try_recv().expect("change event"), CatalogEvent::Changed);
        assert_eq!(catalog.position("crates"), Some(0));
        assert_eq!(catalog.position("ddg"), None);

        assert!(catalog.unsubscribe(id));
        catalog.replace(Vec::new());
        assert!(rx.try_recv().is_err());
    }
}
