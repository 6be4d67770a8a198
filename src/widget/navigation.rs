use crate::catalog::EngineCatalog;

use super::{SearchWidget, WidgetContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl SearchWidget {
    /// Wheel-style stepping through the engine list. Returns whether the
    /// committed engine changed.
    pub fn on_scroll(&mut self, direction: ScrollDirection, ctx: &mut WidgetContext<'_>) -> bool {
        if !self.accepts_input("scroll") {
            return false;
        }
        self.with_text_events_detached(|widget| widget.step_selection(direction, ctx))
    }

    /// Runs `f` with the field listeners off so text it writes is not taken
    /// for a user edit.
    fn with_text_events_detached<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.links.text_changed = false;
        self.links.edit_forwarding = false;
        let result = f(self);
        self.links.text_changed = true;
        self.links.edit_forwarding = self.source.is_some();
        result
    }

    fn step_selection(&mut self, direction: ScrollDirection, ctx: &mut WidgetContext<'_>) -> bool {
        let catalog = ctx.catalog;
        let current = self.state.current_engine_index;
        let Some(target) = neighbour(catalog, current, direction) else {
            return false;
        };
        let Some(engine) = catalog.entries().get(target) else {
            return false;
        };

        // List widgets mirror the picked row into their text field.
        self.replace_field_text(&engine.display_name, catalog);
        self.commit_engine(target, ctx);
        tracing::debug!(from = current, to = target, "engine changed by scroll");
        true
    }
}

fn neighbour(catalog: &dyn EngineCatalog, from: usize, direction: ScrollDirection) -> Option<usize> {
    let entries = catalog.entries();
    match direction {
        ScrollDirection::Up => (0..from.min(entries.len()))
            .rev()
            .find(|&index| entries[index].is_selectable()),
        ScrollDirection::Down => (from + 1..entries.len()).find(|&index| entries[index].is_selectable()),
    }
}
