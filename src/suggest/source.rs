use crate::catalog::Engine;

use super::{SourceId, SuggestionEvent, SuggestionOutcome};

/// What a worker needs to run one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub engine_id: String,
    pub query: String,
}

/// Bookkeeping shared by every source implementation.
///
/// Every engine or query change advances `generation`; a result is applied
/// only when it carries this source's id, the current generation and the
/// current engine id.
#[derive(Debug, Clone)]
pub struct SourceState {
    id: SourceId,
    engine_id: String,
    query: String,
    generation: u64,
    candidates: Vec<String>,
    disposed: bool,
}

impl SourceState {
    pub fn new(id: SourceId, engine: &Engine) -> Self {
        Self {
            id,
            engine_id: engine.id.clone(),
            query: String::new(),
            generation: 0,
            candidates: Vec::new(),
            disposed: false,
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn engine_id(&self) -> &str {
        &self.engine_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn retarget(&mut self, engine: &Engine) -> bool {
        if self.disposed {
            return false;
        }
        self.engine_id = engine.id.clone();
        self.generation = self.generation.saturating_add(1);
        self.candidates.clear();
        true
    }

    /// Records `query`; returns the fetch to run, if any.
    ///
    /// Empty queries clear the candidates locally without a fetch.
    pub fn begin_query(&mut self, query: &str) -> Option<FetchTicket> {
        if self.disposed {
            return None;
        }
        self.generation = self.generation.saturating_add(1);
        self.query = query.to_string();
        if query.is_empty() {
            self.candidates.clear();
            return None;
        }
        Some(FetchTicket {
            generation: self.generation,
            engine_id: self.engine_id.clone(),
            query: self.query.clone(),
        })
    }

    pub fn accept(&mut self, event: SuggestionEvent) -> bool {
        if self.disposed
            || event.source != self.id
            || event.generation != self.generation
            || event.engine_id != self.engine_id
        {
            return false;
        }

        match event.outcome {
            SuggestionOutcome::Ready(candidates) => self.candidates = candidates,
            SuggestionOutcome::Failed(message) => {
                tracing::warn!(
                    source = self.id,
                    engine = %self.engine_id,
                    "suggestion fetch failed: {message}"
                );
                self.candidates.clear();
            }
        }
        true
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.candidates.clear();
    }
}
