use crate::catalog::{EngineCatalog, EngineRole};
use crate::settings::SettingKey;

use super::{PREFERENCES_SECTION, SearchWidget, WidgetContext, WidgetEvent};

impl SearchWidget {
    /// Commits `id`, or the configured default engine when `id` is empty or
    /// unknown. An empty catalog disables the widget instead.
    pub fn set_current_engine(&mut self, id: Option<&str>, ctx: &mut WidgetContext<'_>) {
        let catalog = ctx.catalog;
        if !catalog.has_engines() {
            self.disable();
            return;
        }

        let requested = id
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| ctx.settings.get_text(SettingKey::DefaultEngineId));
        let index = resolve_engine_index(catalog, requested.as_deref());

        self.enable();
        self.commit_engine(index, ctx);
    }

    pub fn on_catalog_changed(&mut self, ctx: &mut WidgetContext<'_>) {
        let catalog = ctx.catalog;
        if !catalog.has_engines() {
            self.disable();
            return;
        }
        self.enable();

        let index = self.state.current_engine_index;
        let still_listed = self
            .committed_engine_id
            .as_deref()
            .is_some_and(|id| catalog.contains(id));
        let at_index = catalog
            .entries()
            .get(index)
            .filter(|entry| entry.is_selectable());

        let Some(engine) = at_index.filter(|_| still_listed) else {
            self.set_current_engine(None, ctx);
            return;
        };

        // The index is kept even when reordering moved another engine under it.
        self.placeholder = engine.placeholder();
        self.list_selection = index;
        if self.committed_engine_id.as_deref() != Some(engine.id.as_str()) {
            tracing::debug!(index, engine = %engine.id, "catalog reorder moved current engine");
            self.committed_engine_id = Some(engine.id.clone());
            if let Some(source) = self.source.as_mut() {
                source.set_engine(engine);
                source.set_query("");
            }
            self.popup.clear();
        }
        // Suggestions switched on while the catalog was empty.
        if self.source.is_none() && self.suggestions_wanted {
            self.attach_source(engine);
        }
    }

    /// User activation of a list row.
    pub fn activate_entry(&mut self, index: usize, ctx: &mut WidgetContext<'_>) {
        if !self.accepts_input("activate-entry") {
            return;
        }
        let catalog = ctx.catalog;
        let Some(role) = catalog.entries().get(index).map(|entry| entry.role) else {
            tracing::debug!(index, "activated entry is out of range");
            return;
        };

        match role {
            EngineRole::Normal => {
                self.commit_engine(index, ctx);
                ctx.session.mark_modified();
            }
            EngineRole::Configure => {
                tracing::debug!("configure entry activated, opening preferences");
                self.list_selection = self.state.current_engine_index;
                ctx.preferences.open(PREFERENCES_SECTION);
            }
        }
    }

    /// The single place where `current_engine_index` changes.
    pub(super) fn commit_engine(&mut self, index: usize, ctx: &mut WidgetContext<'_>) {
        let catalog = ctx.catalog;
        let Some(engine) = catalog.entries().get(index) else {
            return;
        };
        if !engine.is_selectable() {
            tracing::debug!(index, "refusing to commit a non-selectable entry");
            self.list_selection = self.state.current_engine_index;
            return;
        }

        self.state.current_engine_index = index;
        self.list_selection = index;
        self.committed_engine_id = Some(engine.id.clone());
        self.placeholder = engine.placeholder();

        let pending = self.state.pending_query.clone();
        self.replace_field_text(&pending, catalog);

        if let Some(source) = self.source.as_mut() {
            source.set_engine(engine);
            source.set_query("");
        } else if self.suggestions_wanted {
            self.attach_source(engine);
        }
        self.popup.clear();

        tracing::info!(index, engine = %engine.id, "search engine committed");
        self.events.push_back(WidgetEvent::EngineCommitted {
            index,
            engine_id: engine.id.clone(),
        });
    }

    fn enable(&mut self) {
        if !self.enabled {
            tracing::info!("search widget enabled");
        }
        self.enabled = true;
    }

    fn disable(&mut self) {
        if self.enabled {
            tracing::info!("engine catalog is empty, search widget disabled");
        }
        self.enabled = false;
        self.placeholder.clear();
        self.state.deferred_submit = false;
        self.popup.close();
    }
}

fn resolve_engine_index(catalog: &dyn EngineCatalog, requested: Option<&str>) -> usize {
    requested
        .and_then(|id| catalog.position(id))
        .or_else(|| {
            catalog
                .default_engine()
                .and_then(|engine| catalog.position(&engine.id))
        })
        .or_else(|| catalog.first_selectable())
        .unwrap_or(0)
}
