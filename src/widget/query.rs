use std::mem;

use crossterm::event::{Event, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::catalog::EngineCatalog;

use super::{SearchRequest, SearchWidget, WidgetContext, WidgetEvent};

impl SearchWidget {
    /// Applies a key to the field; a changed value is treated as a user edit.
    pub fn edit_field(&mut self, key: KeyEvent, ctx: &mut WidgetContext<'_>) {
        if !self.accepts_input("edit") {
            return;
        }
        let before = self.field.value().to_string();
        self.field.handle_event(&Event::Key(key));
        let after = self.field.value().to_string();
        if after != before {
            self.after_user_edit(&after, ctx.catalog);
        }
    }

    pub fn on_text_edited(&mut self, text: &str, ctx: &mut WidgetContext<'_>) {
        if !self.accepts_input("text-edited") {
            return;
        }
        if self.field.value() != text {
            self.field = Input::new(text.to_string());
        }
        self.after_user_edit(text, ctx.catalog);
    }

    pub fn on_text_changed(&mut self, text: &str, ctx: &mut WidgetContext<'_>) {
        if !self.accepts_input("text-changed") {
            return;
        }
        if self.field.value() != text {
            self.field = Input::new(text.to_string());
        }
        self.apply_text_change(text, ctx.catalog);
    }

    pub fn on_popup_closing(&mut self) {
        if !self.accepts_input("popup-closing") {
            return;
        }
        self.popup.close();
        if !self.state.pending_query.is_empty() {
            self.state.deferred_submit = true;
        }
    }

    pub fn on_submit_key(&mut self, ctx: &mut WidgetContext<'_>) {
        if !self.accepts_input("submit") {
            return;
        }
        self.submit(None, ctx.catalog);
    }

    pub fn on_candidate_activated(&mut self, text: &str, ctx: &mut WidgetContext<'_>) {
        if !self.accepts_input("candidate-activated") {
            return;
        }
        self.submit(Some(text), ctx.catalog);
    }

    /// Plays the host sequence for picking the highlighted popup row: the
    /// field takes the candidate, the popup closes, then the candidate fires.
    /// Returns false when nothing is highlighted.
    pub fn activate_selected_candidate(&mut self, ctx: &mut WidgetContext<'_>) -> bool {
        let Some(candidate) = self.popup.selected_text().map(str::to_string) else {
            return false;
        };
        self.on_text_changed(&candidate, ctx);
        self.on_popup_closing();
        self.on_candidate_activated(&candidate, ctx);
        true
    }

    fn after_user_edit(&mut self, text: &str, catalog: &dyn EngineCatalog) {
        self.apply_text_change(text, catalog);
        if self.links.edit_forwarding
            && let Some(source) = self.source.as_mut()
        {
            source.set_query(text);
        }
        if text.is_empty() {
            self.popup.close();
        }
    }

    /// Text-change listener body. A deferred submit goes out with the old
    /// pending query before the new text is adopted.
    pub(super) fn apply_text_change(&mut self, text: &str, catalog: &dyn EngineCatalog) {
        if !self.links.text_changed {
            return;
        }
        if mem::take(&mut self.state.deferred_submit) {
            tracing::debug!("running deferred submit before adopting new text");
            self.submit(None, catalog);
        }
        self.state.pending_query = text.to_string();
    }

    pub(super) fn submit(&mut self, text: Option<&str>, catalog: &dyn EngineCatalog) {
        self.state.deferred_submit = false;
        if let Some(text) = text.filter(|text| !text.is_empty()) {
            self.state.pending_query = text.to_string();
        }

        if !self.state.pending_query.is_empty() {
            let template_id = catalog
                .entries()
                .get(self.state.current_engine_index)
                .map(|engine| engine.submission_template().to_string())
                .unwrap_or_default();
            let request = SearchRequest {
                query: mem::take(&mut self.state.pending_query),
                template_id,
            };
            tracing::info!(query = %request.query, template = %request.template_id, "search requested");
            self.events.push_back(WidgetEvent::SearchRequested(request));
        }

        self.state.pending_query.clear();
        self.replace_field_text("", catalog);
        self.popup.close();
    }

    /// Programmatic field update; still seen by the text-change listener.
    pub(super) fn replace_field_text(&mut self, text: &str, catalog: &dyn EngineCatalog) {
        if self.field.value() == text {
            return;
        }
        self.field = Input::new(text.to_string());
        self.apply_text_change(text, catalog);
    }
}
