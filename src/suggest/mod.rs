mod fetcher;
mod source;
mod worker;

pub use fetcher::WordListFetcher;
pub use source::{FetchTicket, SourceState};
pub use worker::{SuggestionFetcher, WorkerOptions, WorkerSourceFactory, WorkerSuggestionSource};

use crate::catalog::Engine;

pub type SourceId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Ready(Vec<String>),
    Failed(String),
}

/// Result of one fetch, delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEvent {
    pub source: SourceId,
    pub generation: u64,
    pub engine_id: String,
    pub query: String,
    pub outcome: SuggestionOutcome,
}

/// Asynchronous producer of completion candidates for one engine.
///
/// A source never outlives the "suggestions enabled" interval. After
/// `dispose` it must ignore every call and reject every late result.
pub trait SuggestionSource: Send {
    fn id(&self) -> SourceId;

    fn engine_id(&self) -> &str;

    fn set_engine(&mut self, engine: &Engine);

    fn set_query(&mut self, query: &str);

    fn query(&self) -> &str;

    fn candidates(&self) -> &[String];

    /// Applies a fetch result. Returns false when the result is stale.
    fn apply(&mut self, event: SuggestionEvent) -> bool;

    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

pub trait SuggestionSourceFactory: Send + Sync {
    fn create(&self, engine: &Engine) -> Box<dyn SuggestionSource>;
}
