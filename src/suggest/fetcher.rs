use std::thread;
use std::time::Duration;

use crate::config::SuggestConfig;
use crate::error::AppResult;

use super::worker::SuggestionFetcher;

/// Offline fetcher completing against a fixed word list.
#[derive(Debug, Clone, Default)]
pub struct WordListFetcher {
    words: Vec<String>,
    latency: Duration,
}

impl WordListFetcher {
    pub fn new(words: Vec<String>, latency: Duration) -> Self {
        Self { words, latency }
    }

    pub fn from_config(config: &SuggestConfig) -> Self {
        Self::new(config.words.clone(), Duration::from_millis(config.latency_ms))
    }
}

impl SuggestionFetcher for WordListFetcher {
    fn fetch(&self, _engine_id: &str, query: &str) -> AppResult<Vec<String>> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        let needle = query.to_lowercase();
        Ok(self
            .words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&needle))
            .cloned()
            .collect())
    }
}
