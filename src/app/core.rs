use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::catalog::{CatalogEvent, EngineCatalog, SearchCatalog};
use crate::config::{Config, default_config_path};
use crate::notify::SubscriptionId;
use crate::settings::{SettingKey, SettingValue, SettingsChannel, SettingsEvent, SettingsStore};
use crate::suggest::{SuggestionEvent, WordListFetcher, WorkerOptions, WorkerSourceFactory};
use crate::widget::{SearchRequest, SearchWidget, WidgetEvent};

use super::host::{HostCollaborators, PreferencesPanel, SessionTracker};
use super::state::{AppState, Mode};

/// Startup overrides layered on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub config_path: Option<PathBuf>,
    pub engine: Option<String>,
    pub suggestions: Option<bool>,
}

pub(crate) struct Inbound {
    pub(crate) catalog_rx: UnboundedReceiver<CatalogEvent>,
    pub(crate) settings_rx: UnboundedReceiver<SettingsEvent>,
    pub(crate) suggestion_rx: UnboundedReceiver<SuggestionEvent>,
}

struct Subscriptions {
    catalog: SubscriptionId,
    settings: SubscriptionId,
}

pub struct App {
    pub state: AppState,
    pub config: Config,
    config_path: Option<PathBuf>,
    pub(crate) host: HostCollaborators,
    pub(crate) widget: SearchWidget,
    pub(crate) inbound: Inbound,
    subscriptions: Option<Subscriptions>,
    requests: Vec<SearchRequest>,
}

impl App {
    pub fn new_with_config(config: Config, options: StartOptions) -> Self {
        let mut settings = SettingsStore::from_config(&config);
        if let Some(enabled) = options.suggestions {
            settings.set(SettingKey::SuggestionsEnabled, SettingValue::Bool(enabled));
        }
        let mut catalog = SearchCatalog::new(config.catalog_engines());
        if !config.search.default_engine.is_empty() {
            catalog = catalog.with_default(config.search.default_engine.clone());
        }

        let (catalog_sub, catalog_rx) = catalog.subscribe();
        let (settings_sub, settings_rx) = settings.subscribe();
        let (suggestion_tx, suggestion_rx) = unbounded_channel();

        let fetcher = Arc::new(WordListFetcher::from_config(&config.suggest));
        let factory = Arc::new(WorkerSourceFactory::new(
            fetcher,
            suggestion_tx,
            WorkerOptions {
                max_candidates: config.suggest.max_candidates,
                cache_entries: config.suggest.cache_entries,
            },
        ));

        let mut host = HostCollaborators {
            catalog,
            settings,
            preferences: PreferencesPanel::default(),
            session: SessionTracker::default(),
        };
        let mut widget = SearchWidget::new(factory, &mut host.ctx());
        if let Some(engine) = options.engine.as_deref() {
            if !host.catalog.contains(engine) {
                tracing::warn!(engine, "unknown engine requested on the command line");
            }
            widget.set_current_engine(Some(engine), &mut host.ctx());
        }
        widget.drain_events();

        tracing::info!(
            engines = host.catalog.engine_count(),
            suggestions = host.settings.get_bool(SettingKey::SuggestionsEnabled),
            "search entry initialized"
        );

        Self {
            state: AppState::default(),
            config,
            config_path: options.config_path.or_else(default_config_path),
            host,
            widget,
            inbound: Inbound {
                catalog_rx,
                settings_rx,
                suggestion_rx,
            },
            subscriptions: Some(Subscriptions {
                catalog: catalog_sub,
                settings: settings_sub,
            }),
            requests: Vec::new(),
        }
    }

    /// Every search submitted so far, oldest first.
    pub fn submitted(&self) -> &[SearchRequest] {
        &self.requests
    }

    pub fn widget(&self) -> &SearchWidget {
        &self.widget
    }

    pub fn catalog(&self) -> &SearchCatalog {
        &self.host.catalog
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.host.settings
    }

    pub fn session_modified(&self) -> bool {
        self.host.session.is_modified()
    }

    pub(crate) fn on_catalog_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Changed => self.widget.on_catalog_changed(&mut self.host.ctx()),
        }
        self.after_widget();
    }

    pub(crate) fn on_settings_event(&mut self, event: SettingsEvent) {
        match event {
            SettingsEvent::ValueChanged { key, value } => {
                self.widget.on_setting_changed(key, &value, &self.host.ctx());
            }
        }
        self.after_widget();
    }

    pub(crate) fn on_suggestion_event(&mut self, event: SuggestionEvent) {
        if self.widget.on_suggestions(event) {
            self.state.needs_redraw = true;
        }
    }

    pub(crate) fn toggle_suggestions(&mut self) {
        let enabled = self.host.settings.toggle(SettingKey::SuggestionsEnabled);
        self.state.status.message = if enabled {
            "suggestions on".to_string()
        } else {
            "suggestions off".to_string()
        };
        self.state.needs_redraw = true;
    }

    /// Re-reads the config file and replaces the catalog with its engines.
    pub(crate) fn reload_catalog(&mut self) {
        let loaded = match &self.config_path {
            Some(path) => Config::load_from_path(path),
            None => Ok(Config::default()),
        };
        match loaded {
            Ok(config) => {
                self.host.catalog.replace(config.catalog_engines());
                self.deliver_store_events();
                self.state.status.message =
                    format!("reloaded {} engines", self.host.catalog.engine_count());
                self.config = config;
            }
            Err(err) => {
                tracing::warn!("catalog reload failed: {err}");
                self.state.status.message = err.to_string();
            }
        }
        self.state.needs_redraw = true;
    }

    /// Hands queued catalog and settings notifications to the widget so the
    /// next input is applied against the stores as they are now.
    pub(crate) fn deliver_store_events(&mut self) {
        while let Ok(event) = self.inbound.catalog_rx.try_recv() {
            self.on_catalog_event(event);
        }
        while let Ok(event) = self.inbound.settings_rx.try_recv() {
            self.on_settings_event(event);
        }
    }

    /// Folds widget output into app state. Called after every widget call.
    pub(crate) fn after_widget(&mut self) {
        for event in self.widget.drain_events() {
            match event {
                WidgetEvent::SearchRequested(request) => {
                    self.state.status.message = format!("searched {:?}", request.query);
                    self.state.status.last_request = Some(request.clone());
                    self.requests.push(request);
                }
                WidgetEvent::EngineCommitted { index, .. } => {
                    if let Some(engine) = self.host.catalog.entries().get(index) {
                        self.state.status.message = format!("engine: {}", engine.display_name);
                    }
                }
            }
        }

        if let Some(section) = self.host.preferences.take_request() {
            self.state.preferences_section = Some(section);
            self.state.mode = Mode::Preferences;
        }
        self.state.needs_redraw = true;
    }

    pub(crate) fn shutdown(&mut self) {
        if let Some(subscriptions) = self.subscriptions.take() {
            self.host.catalog.unsubscribe(subscriptions.catalog);
            self.host.settings.unsubscribe(subscriptions.settings);
        }
        tracing::info!(submitted = self.requests.len(), "search entry stopped");
    }
}
