use crate::widget::SearchRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Entry,
    EngineList,
    Preferences,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "SEARCH",
            Self::EngineList => "ENGINES",
            Self::Preferences => "PREFS",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_request: Option<SearchRequest>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: StatusState,
    /// Section the preferences overlay was opened at.
    pub preferences_section: Option<String>,
    pub needs_redraw: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Entry,
            status: StatusState::default(),
            preferences_section: None,
            needs_redraw: true,
        }
    }
}
