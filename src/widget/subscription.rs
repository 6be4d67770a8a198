use crate::catalog::Engine;
use crate::settings::{SettingKey, SettingValue};
use crate::suggest::SuggestionEvent;

use super::{SearchWidget, WidgetContext};

impl SearchWidget {
    pub fn on_setting_changed(
        &mut self,
        key: SettingKey,
        value: &SettingValue,
        ctx: &WidgetContext<'_>,
    ) {
        match key {
            SettingKey::SuggestionsEnabled => {
                if value.as_bool() {
                    self.enable_suggestions(ctx);
                } else {
                    self.disable_suggestions();
                }
            }
            SettingKey::DefaultEngineId => {
                tracing::debug!("default engine setting changed, current engine kept");
            }
        }
    }

    /// Routes a worker result to the live source. Returns whether it was applied.
    pub fn on_suggestions(&mut self, event: SuggestionEvent) -> bool {
        let Some(source) = self.source.as_mut() else {
            tracing::debug!(source = event.source, "no active suggestion source, result dropped");
            return false;
        };
        let source_id = event.source;
        if !source.apply(event) {
            tracing::debug!(source = source_id, "stale suggestion result dropped");
            return false;
        }

        let show = self.enabled && !self.field.value().is_empty();
        self.popup.set_candidates(source.id(), source.candidates(), show)
    }

    fn enable_suggestions(&mut self, ctx: &WidgetContext<'_>) {
        self.suggestions_wanted = true;
        if self.source.is_some() || !self.enabled || self.committed_engine_id.is_none() {
            return;
        }
        if let Some(engine) = ctx.catalog.entries().get(self.state.current_engine_index) {
            self.attach_source(engine);
        }
    }

    fn disable_suggestions(&mut self) {
        self.suggestions_wanted = false;
        self.links.edit_forwarding = false;
        if let Some(mut source) = self.source.take() {
            source.dispose();
        }
        self.popup.unbind();
        self.state.suggestions_active = false;
    }

    pub(super) fn attach_source(&mut self, engine: &Engine) {
        let source = self.factory.create(engine);
        self.popup.bind(source.id());
        self.source = Some(source);
        self.links.edit_forwarding = true;
        self.state.suggestions_active = true;
        tracing::debug!(engine = %engine.id, "suggestions attached");
    }
}
