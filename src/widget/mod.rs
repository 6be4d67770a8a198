//! The search entry: engine selection, query tracking, submission timing and
//! the suggestion subscription, driven one event at a time by the host.

mod navigation;
mod popup;
mod query;
mod selection;
mod subscription;


use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use tui_input::Input;

use crate::catalog::EngineCatalog;
use crate::settings::{SettingKey, SettingValue, SettingsChannel};
use crate::suggest::{SuggestionSource, SuggestionSourceFactory};

pub use navigation::ScrollDirection;
pub use popup::CompletionPopup;

/// Preferences section opened by the configure entry.
pub const PREFERENCES_SECTION: &str = "search";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub template_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    SearchRequested(SearchRequest),
    EngineCommitted { index: usize, engine_id: String },
}

/// Raw user input, already translated by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetInput {
    /// The user changed the field text (keystroke, paste).
    TextEdited(String),
    /// The field text changed for any reason.
    TextChanged(String),
    SubmitKey,
    CandidateActivated(String),
    PopupClosing,
    EntryActivated(usize),
    Scroll(ScrollDirection),
}

pub trait PreferencesSurface {
    /// Opens the preferences at `section`. Modal: returns once it is dealt with.
    fn open(&mut self, section: &str);
}

pub trait SessionBookkeeping {
    fn mark_modified(&mut self);
}

/// Collaborators lent to the widget for the duration of one event.
pub struct WidgetContext<'a> {
    pub catalog: &'a dyn EngineCatalog,
    pub settings: &'a dyn SettingsChannel,
    pub preferences: &'a mut dyn PreferencesSurface,
    pub session: &'a mut dyn SessionBookkeeping,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// Always a selectable entry once any event has been processed.
    pub current_engine_index: usize,
    /// Exactly what would be submitted right now.
    pub pending_query: String,
    pub deferred_submit: bool,
    pub suggestions_active: bool,
}

/// Which field listeners are currently attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Links {
    text_changed: bool,
    edit_forwarding: bool,
}

pub struct SearchWidget {
    state: WidgetState,
    enabled: bool,
    placeholder: String,
    field: Input,
    list_selection: usize,
    committed_engine_id: Option<String>,
    links: Links,
    suggestions_wanted: bool,
    source: Option<Box<dyn SuggestionSource>>,
    factory: Arc<dyn SuggestionSourceFactory>,
    popup: CompletionPopup,
    events: VecDeque<WidgetEvent>,
}

impl SearchWidget {
    pub fn new(factory: Arc<dyn SuggestionSourceFactory>, ctx: &mut WidgetContext<'_>) -> Self {
        let mut widget = Self {
            state: WidgetState::default(),
            enabled: false,
            placeholder: String::new(),
            field: Input::default(),
            list_selection: 0,
            committed_engine_id: None,
            links: Links {
                text_changed: true,
                edit_forwarding: false,
            },
            suggestions_wanted: false,
            source: None,
            factory,
            popup: CompletionPopup::default(),
            events: VecDeque::new(),
        };

        widget.set_current_engine(None, ctx);
        let suggestions = ctx
            .settings
            .get(SettingKey::SuggestionsEnabled)
            .unwrap_or(SettingValue::Bool(false));
        widget.on_setting_changed(SettingKey::SuggestionsEnabled, &suggestions, ctx);
        widget
    }

    pub fn handle(&mut self, input: WidgetInput, ctx: &mut WidgetContext<'_>) {
        match input {
            WidgetInput::TextEdited(text) => self.on_text_edited(&text, ctx),
            WidgetInput::TextChanged(text) => self.on_text_changed(&text, ctx),
            WidgetInput::SubmitKey => self.on_submit_key(ctx),
            WidgetInput::CandidateActivated(text) => self.on_candidate_activated(&text, ctx),
            WidgetInput::PopupClosing => self.on_popup_closing(),
            WidgetInput::EntryActivated(index) => self.activate_entry(index, ctx),
            WidgetInput::Scroll(direction) => {
                self.on_scroll(direction, ctx);
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        self.events.drain(..).collect()
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn text(&self) -> &str {
        self.field.value()
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.field.cursor()
    }

    pub fn pending_query(&self) -> &str {
        &self.state.pending_query
    }

    pub fn current_engine_index(&self) -> usize {
        self.state.current_engine_index
    }

    /// Highlighted row of the engine list; may differ from the committed index
    /// only while the list is being browsed.
    pub fn list_selection(&self) -> usize {
        self.list_selection
    }

    pub fn set_list_selection(&mut self, index: usize) {
        self.list_selection = index;
    }

    pub fn suggestions_active(&self) -> bool {
        self.state.suggestions_active
    }

    pub fn popup(&self) -> &CompletionPopup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut CompletionPopup {
        &mut self.popup
    }

    fn accepts_input(&self, what: &str) -> bool {
        if !self.enabled {
            tracing::debug!(input = what, "widget disabled, input ignored");
        }
        self.enabled
    }
}
