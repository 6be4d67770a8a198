use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel,
};
use tokio::task::JoinHandle;

use crate::catalog::Engine;
use crate::error::AppResult;

use super::source::{FetchTicket, SourceState};
use super::{SourceId, SuggestionEvent, SuggestionOutcome, SuggestionSource, SuggestionSourceFactory};

/// The network side of suggestions. Called on a blocking worker thread.
pub trait SuggestionFetcher: Send + Sync {
    fn fetch(&self, engine_id: &str, query: &str) -> AppResult<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerOptions {
    pub max_candidates: usize,
    pub cache_entries: usize,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            max_candidates: 8,
            cache_entries: 64,
        }
    }
}

enum WorkerRequest {
    Fetch(FetchTicket),
    Shutdown,
}

enum WorkerControl {
    Continue,
    Shutdown,
}

struct SuggestionRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl SuggestionRuntime {
    fn new() -> Self {
        if let Ok(handle) = Handle::try_current() {
            return Self {
                _owned: None,
                handle,
            };
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("seb-suggest")
            .build()
            .expect("suggestion runtime should initialize");
        let handle = runtime.handle().clone();
        Self {
            _owned: Some(runtime),
            handle,
        }
    }

    fn spawn_blocking<F>(&self, task: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.spawn_blocking(task)
    }
}

pub struct WorkerSourceFactory {
    fetcher: Arc<dyn SuggestionFetcher>,
    event_tx: UnboundedSender<SuggestionEvent>,
    options: WorkerOptions,
    next_id: AtomicU64,
    runtime: Arc<SuggestionRuntime>,
}

impl WorkerSourceFactory {
    pub fn new(
        fetcher: Arc<dyn SuggestionFetcher>,
        event_tx: UnboundedSender<SuggestionEvent>,
        options: WorkerOptions,
    ) -> Self {
        Self {
            fetcher,
            event_tx,
            options,
            next_id: AtomicU64::new(1),
            runtime: Arc::new(SuggestionRuntime::new()),
        }
    }
}

impl SuggestionSourceFactory for WorkerSourceFactory {
    fn create(&self, engine: &Engine) -> Box<dyn SuggestionSource> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Box::new(WorkerSuggestionSource::spawn(
            id,
            engine,
            Arc::clone(&self.fetcher),
            self.event_tx.clone(),
            self.options,
            &self.runtime,
        ))
    }
}

/// Suggestion source backed by its own blocking worker.
pub struct WorkerSuggestionSource {
    state: SourceState,
    request_tx: UnboundedSender<WorkerRequest>,
    worker: Option<JoinHandle<()>>,
    _runtime: Arc<SuggestionRuntime>,
}

impl WorkerSuggestionSource {
    fn spawn(
        id: SourceId,
        engine: &Engine,
        fetcher: Arc<dyn SuggestionFetcher>,
        event_tx: UnboundedSender<SuggestionEvent>,
        options: WorkerOptions,
        runtime: &Arc<SuggestionRuntime>,
    ) -> Self {
        let (request_tx, request_rx) = unbounded_channel();
        let worker = runtime
            .spawn_blocking(move || worker_main(id, request_rx, event_tx, fetcher, options));
        tracing::info!(source = id, engine = %engine.id, "suggestion source created");

        Self {
            state: SourceState::new(id, engine),
            request_tx,
            worker: Some(worker),
            _runtime: Arc::clone(runtime),
        }
    }

    fn shutdown_worker(&mut self) {
        let _ = self.request_tx.send(WorkerRequest::Shutdown);
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

impl SuggestionSource for WorkerSuggestionSource {
    fn id(&self) -> SourceId {
        self.state.id()
    }

    fn engine_id(&self) -> &str {
        self.state.engine_id()
    }

    fn set_engine(&mut self, engine: &Engine) {
        self.state.retarget(engine);
    }

    fn set_query(&mut self, query: &str) {
        let Some(ticket) = self.state.begin_query(query) else {
            return;
        };
        if self.request_tx.send(WorkerRequest::Fetch(ticket)).is_err() {
            tracing::warn!(source = self.state.id(), "suggestion worker is not available");
        }
    }

    fn query(&self) -> &str {
        self.state.query()
    }

    fn candidates(&self) -> &[String] {
        self.state.candidates()
    }

    fn apply(&mut self, event: SuggestionEvent) -> bool {
        self.state.accept(event)
    }

    fn dispose(&mut self) {
        if self.state.is_disposed() {
            return;
        }
        self.state.dispose();
        self.shutdown_worker();
        tracing::info!(source = self.state.id(), "suggestion source disposed");
    }

    fn is_disposed(&self) -> bool {
        self.state.is_disposed()
    }
}

impl Drop for WorkerSuggestionSource {
    fn drop(&mut self) {
        self.shutdown_worker();
    }
}

fn worker_main(
    source: SourceId,
    mut request_rx: UnboundedReceiver<WorkerRequest>,
    event_tx: UnboundedSender<SuggestionEvent>,
    fetcher: Arc<dyn SuggestionFetcher>,
    options: WorkerOptions,
) {
    let capacity = NonZeroUsize::new(options.cache_entries.max(1)).expect("capacity is non-zero");
    let mut cache: LruCache<(String, String), Vec<String>> = LruCache::new(capacity);
    let mut pending: Option<FetchTicket> = None;

    loop {
        let ticket = match pending.take() {
            Some(ticket) => ticket,
            None => match wait_for_ticket(&mut request_rx) {
                Some(ticket) => ticket,
                None => break,
            },
        };

        match flush_requests(&mut request_rx, &mut pending) {
            WorkerControl::Continue if pending.is_some() => continue,
            WorkerControl::Continue => {}
            WorkerControl::Shutdown => break,
        }

        let outcome = fetch_cached(&mut cache, fetcher.as_ref(), &ticket, options.max_candidates);

        match flush_requests(&mut request_rx, &mut pending) {
            WorkerControl::Continue if pending.is_some() => continue,
            WorkerControl::Continue => {}
            WorkerControl::Shutdown => break,
        }

        let event = SuggestionEvent {
            source,
            generation: ticket.generation,
            engine_id: ticket.engine_id,
            query: ticket.query,
            outcome,
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
}

fn fetch_cached(
    cache: &mut LruCache<(String, String), Vec<String>>,
    fetcher: &dyn SuggestionFetcher,
    ticket: &FetchTicket,
    max_candidates: usize,
) -> SuggestionOutcome {
    let key = (ticket.engine_id.clone(), ticket.query.clone());
    if let Some(hit) = cache.get(&key) {
        return SuggestionOutcome::Ready(hit.clone());
    }

    match fetcher.fetch(&ticket.engine_id, &ticket.query) {
        Ok(mut candidates) => {
            candidates.truncate(max_candidates.max(1));
            cache.put(key, candidates.clone());
            SuggestionOutcome::Ready(candidates)
        }
        Err(err) => SuggestionOutcome::Failed(err.to_string()),
    }
}

fn wait_for_ticket(request_rx: &mut UnboundedReceiver<WorkerRequest>) -> Option<FetchTicket> {
    match request_rx.blocking_recv() {
        Some(WorkerRequest::Fetch(ticket)) => Some(ticket),
        Some(WorkerRequest::Shutdown) | None => None,
    }
}

fn flush_requests(
    request_rx: &mut UnboundedReceiver<WorkerRequest>,
    pending: &mut Option<FetchTicket>,
) -> WorkerControl {
    loop {
        match request_rx.try_recv() {
            Ok(WorkerRequest::Fetch(ticket)) => *pending = Some(ticket),
            Ok(WorkerRequest::Shutdown) => return WorkerControl::Shutdown,
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => return WorkerControl::Shutdown,
        }
    }

    WorkerControl::Continue
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::catalog::Engine;
    use crate::error::{AppError, AppResult};
    use crate::suggest::{
        SuggestionEvent, SuggestionOutcome, SuggestionSource, SuggestionSourceFactory,
    };

    use super::{SuggestionFetcher, WorkerOptions, WorkerSourceFactory};

    #[derive(Default)]
    struct RecordingFetcher {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl SuggestionFetcher for RecordingFetcher {
        fn fetch(&self, engine_id: &str, query: &str) -> AppResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .expect("fetch log lock")
                .push((engine_id.to_string(), query.to_string()));
            if query == "boom" {
                return Err(AppError::io_with_context(
                    std::io::Error::other("endpoint down"),
                    "suggestion request failed",
                ));
            }
            Ok((1..=20).map(|n| format!("{query}{n}")).collect())
        }
    }

    fn ddg() -> Engine {
        Engine::new("ddg", "DuckDuckGo", None)
    }

    fn wait_for_event(rx: &mut UnboundedReceiver<SuggestionEvent>) -> SuggestionEvent {
        let timeout = Duration::from_secs(3);
        let start = Instant::now();
        loop {
            if let Ok(event) = rx.try_recv() {
                return event;
            }
            assert!(
                start.elapsed() <= timeout,
                "timed out waiting for suggestion event"
            );
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn fetch_results_are_truncated_and_applied() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let (tx, mut rx) = unbounded_channel();
        let factory = WorkerSourceFactory::new(
            fetcher.clone(),
            tx,
            WorkerOptions {
                max_candidates: 3,
                cache_entries: 4,
            },
        );
        let mut source = factory.create(&ddg());

        source.set_query("ru");
        let event = wait_for_event(&mut rx);
        assert_eq!(event.source, source.id());
        assert_eq!(event.engine_id, "ddg");
        assert!(source.apply(event));
        assert_eq!(source.candidates(), ["ru1", "ru2", "ru3"]);
    }

    #[test]
    fn repeated_query_is_served_from_cache() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let (tx, mut rx) = unbounded_channel();
        let factory = WorkerSourceFactory::new(fetcher.clone(), tx, WorkerOptions::default());
        let mut source = factory.create(&ddg());

        source.set_query("tok");
        assert!(source.apply(wait_for_event(&mut rx)));
        source.set_query("");
        source.set_query("tok");
        assert!(source.apply(wait_for_event(&mut rx)));

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.candidates().len(), 8);
    }

    #[test]
    fn fetch_failure_is_reported_as_failed_outcome() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let (tx, mut rx) = unbounded_channel();
        let factory = WorkerSourceFactory::new(fetcher, tx, WorkerOptions::default());
        let mut source = factory.create(&ddg());

        source.set_query("boom");
        let event = wait_for_event(&mut rx);
        assert!(matches!(event.outcome, SuggestionOutcome::Failed(_)));
        assert!(source.apply(event));
        assert!(source.candidates().is_empty());
    }

    #[test]
    fn factory_assigns_distinct_source_ids() {
        let (tx, _rx) = unbounded_channel();
        let factory = WorkerSourceFactory::new(
            Arc::new(RecordingFetcher::default()),
            tx,
            WorkerOptions::default(),
        );
        let first = factory.create(&ddg());
        let second = factory.create(&ddg());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn disposed_source_ignores_queries_and_late_results() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let (tx, mut rx) = unbounded_channel();
        let factory = WorkerSourceFactory::new(fetcher.clone(), tx, WorkerOptions::default());
        let mut source = factory.create(&ddg());

        source.set_query("ru");
        let late = wait_for_event(&mut rx);
        source.dispose();

        assert!(source.is_disposed());
        assert!(!source.apply(late));
        source.set_query("rus");
        thread::sleep(Duration::from_millis(30));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }
}
