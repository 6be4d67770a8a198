use crate::catalog::SearchCatalog;
use crate::settings::SettingsStore;
use crate::widget::{PreferencesSurface, SessionBookkeeping, WidgetContext};

/// Preferences "dialog" of the terminal host. Opening only records the
/// request; the app turns it into an overlay after the widget returns.
#[derive(Debug, Default)]
pub struct PreferencesPanel {
    requested: Option<String>,
    opened: usize,
}

impl PreferencesPanel {
    pub fn take_request(&mut self) -> Option<String> {
        self.requested.take()
    }

    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl PreferencesSurface for PreferencesPanel {
    fn open(&mut self, section: &str) {
        tracing::info!(section, "preferences requested");
        self.requested = Some(section.to_string());
        self.opened += 1;
    }
}

#[derive(Debug, Default)]
pub struct SessionTracker {
    modified: bool,
}

impl SessionTracker {
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

impl SessionBookkeeping for SessionTracker {
    fn mark_modified(&mut self) {
        if !self.modified {
            tracing::debug!("session marked modified");
        }
        self.modified = true;
    }
}

/// Everything the widget borrows while handling one event.
pub struct HostCollaborators {
    pub catalog: SearchCatalog,
    pub settings: SettingsStore,
    pub preferences: PreferencesPanel,
    pub session: SessionTracker,
}

impl HostCollaborators {
    pub fn ctx(&mut self) -> WidgetContext<'_> {
        WidgetContext {
            catalog: &self.catalog,
            settings: &self.settings,
            preferences: &mut self.preferences,
            session: &mut self.session,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::widget::{PreferencesSurface, SessionBookkeeping};

    use super::{PreferencesPanel, SessionTracker};

    #[test]
    fn preferences_request_is_taken_once() {
        let mut panel = PreferencesPanel::default();
        panel.open("search");

        assert_eq!(panel.take_request().as_deref(), Some("search"));
        assert_eq!(panel.take_request(), None);
        assert_eq!(panel.opened(), 1);
    }

    #[test]
    fn session_tracker_latches_modified() {
        let mut session = SessionTracker::default();
        assert!(!session.is_modified());
        session.mark_modified();
        session.mark_modified();
        assert!(session.is_modified());
    }
}
