use ratatui::Frame;
use ratatui::layout::Rect;

use crate::catalog::EngineCatalog;
use crate::error::AppResult;
use crate::settings::{SettingKey, SettingsChannel};
use crate::ui::{
    EntryView, ListItemView, ListView, PreferencesView, StatusView, draw_dropdown, draw_entry,
    draw_preferences_overlay, draw_status, selector_width, split_layout,
};

use super::core::App;
use super::state::Mode;
use super::terminal_session::TerminalSurface;

impl App {
    pub(crate) fn render_frame(&self, session: &mut impl TerminalSurface) -> AppResult<()> {
        session.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let layout = split_layout(area);
        let entry = self.entry_view();
        draw_entry(frame, layout.entry, &entry);
        draw_status(frame, layout.status, &self.status_view());

        let overlay_bounds = Rect::new(
            area.x,
            layout.entry.y,
            area.width,
            layout.status.y.saturating_sub(layout.entry.y),
        );
        match self.state.mode {
            Mode::Entry => {
                if let Some(view) = self.completion_view() {
                    // Field text starts after the border and the engine selector.
                    let offset = 1 + selector_width(&entry);
                    let anchor = Rect::new(
                        layout.entry.x.saturating_add(offset),
                        layout.entry.y,
                        layout.entry.width.saturating_sub(offset),
                        layout.entry.height,
                    );
                    draw_dropdown(frame, anchor, overlay_bounds, &view);
                }
            }
            Mode::EngineList => {
                draw_dropdown(frame, layout.entry, overlay_bounds, &self.engine_list_view());
            }
            Mode::Preferences => {
                draw_preferences_overlay(frame, layout.body, &self.preferences_view());
            }
        }
    }

    pub(crate) fn entry_view(&self) -> EntryView {
        let engine_label = self
            .host
            .catalog
            .entries()
            .get(self.widget.current_engine_index())
            .map(|engine| engine.display_name.clone())
            .unwrap_or_default();
        EntryView {
            engine_label,
            text: self.widget.text().to_string(),
            cursor: self.widget.cursor(),
            placeholder: self.widget.placeholder().to_string(),
            enabled: self.widget.is_enabled(),
        }
    }

    fn completion_view(&self) -> Option<ListView> {
        let popup = self.widget.popup();
        if !popup.is_open() {
            return None;
        }
        let selected = popup.selected();
        Some(ListView {
            title: "Suggestions".to_string(),
            items: popup
                .items()
                .iter()
                .enumerate()
                .map(|(idx, item)| ListItemView {
                    label: item.clone(),
                    detail: None,
                    selected: selected == Some(idx),
                })
                .collect(),
            selected_idx: selected.unwrap_or(0),
        })
    }

    pub(crate) fn engine_list_view(&self) -> ListView {
        let highlighted = self.widget.list_selection();
        let committed = self.widget.current_engine_index();
        ListView {
            title: "Search Engines".to_string(),
            items: self
                .host
                .catalog
                .entries()
                .iter()
                .enumerate()
                .map(|(idx, engine)| ListItemView {
                    label: engine.display_name.clone(),
                    detail: (idx == committed).then(|| "current".to_string()),
                    selected: idx == highlighted,
                })
                .collect(),
            selected_idx: highlighted,
        }
    }

    fn preferences_view(&self) -> PreferencesView {
        PreferencesView {
            section: self
                .state
                .preferences_section
                .clone()
                .unwrap_or_default(),
            suggestions_enabled: self.host.settings.get_bool(SettingKey::SuggestionsEnabled),
            engine_count: self.host.catalog.engine_count(),
        }
    }

    fn status_view(&self) -> StatusView {
        StatusView {
            mode: self.state.mode.label(),
            message: self.state.status.message.clone(),
            suggestions: self.widget.suggestions_active(),
            modified: self.host.session.is_modified(),
        }
    }
}
