mod engine;
mod store;

pub use engine::{CONFIGURE_ENTRY_LABEL, Engine, EngineRole};
pub use store::SearchCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEvent {
    Changed,
}

/// Read side of the engine catalog as seen by the search widget.
pub trait EngineCatalog {
    fn entries(&self) -> &[Engine];

    fn default_engine(&self) -> Option<&Engine>;

    fn has_engines(&self) -> bool {
        self.entries().iter().any(Engine::is_selectable)
    }

    /// Index of the selectable entry with `id`.
    fn position(&self, id: &str) -> Option<usize> {
        self.entries()
            .iter()
            .position(|entry| entry.is_selectable() && entry.id == id)
    }

    fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn first_selectable(&self) -> Option<usize> {
        self.entries().iter().position(Engine::is_selectable)
    }
}
