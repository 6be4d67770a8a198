use crossterm::event::{Event, KeyEventKind};

use crate::app::{App, Mode};
use crate::catalog::EngineCatalog;
use crate::widget::WidgetInput;

use super::keymap::{HostAction, map_key, map_mouse};

pub(crate) struct InputEventOutcome {
    pub(crate) quit_requested: bool,
}

impl App {
    pub(crate) fn handle_input_event(&mut self, event: Event) -> InputEventOutcome {
        let action = match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                map_key(key, self.state.mode)
            }
            Event::Mouse(mouse) => map_mouse(mouse, self.state.mode),
            Event::Paste(text) => {
                if self.state.mode == Mode::Entry {
                    let mut edited = self.widget.text().to_string();
                    edited.push_str(&text);
                    self.widget
                        .handle(WidgetInput::TextEdited(edited), &mut self.host.ctx());
                    self.after_widget();
                }
                None
            }
            Event::Resize(_, _) => {
                self.state.needs_redraw = true;
                None
            }
            _ => None,
        };

        match action {
            Some(HostAction::Quit) => InputEventOutcome {
                quit_requested: true,
            },
            Some(action) => {
                self.apply_action(action);
                InputEventOutcome {
                    quit_requested: false,
                }
            }
            None => InputEventOutcome {
                quit_requested: false,
            },
        }
    }

    pub(crate) fn apply_action(&mut self, action: HostAction) {
        match action {
            HostAction::Quit => {}
            HostAction::Submit => {
                let mut ctx = self.host.ctx();
                if !self.widget.activate_selected_candidate(&mut ctx) {
                    self.widget.handle(WidgetInput::SubmitKey, &mut ctx);
                }
            }
            HostAction::PopupNext => self.widget.popup_mut().select_next(),
            HostAction::PopupPrev => self.widget.popup_mut().select_prev(),
            HostAction::Dismiss => self.dismiss(),
            HostAction::ScrollEngine(direction) => {
                self.widget
                    .handle(WidgetInput::Scroll(direction), &mut self.host.ctx());
            }
            HostAction::OpenEngineList => {
                if self.widget.is_enabled() {
                    let current = self.widget.current_engine_index();
                    self.widget.set_list_selection(current);
                    self.state.mode = Mode::EngineList;
                }
            }
            HostAction::ListNext | HostAction::ListPrev => {
                let last = self.host.catalog.entries().len().saturating_sub(1);
                let selection = self.widget.list_selection();
                let next = if action == HostAction::ListNext {
                    (selection + 1).min(last)
                } else {
                    selection.saturating_sub(1)
                };
                self.widget.set_list_selection(next);
            }
            HostAction::ActivateListEntry => {
                self.state.mode = Mode::Entry;
                let index = self.widget.list_selection();
                self.widget
                    .handle(WidgetInput::EntryActivated(index), &mut self.host.ctx());
            }
            HostAction::ToggleSuggestions => self.toggle_suggestions(),
            HostAction::ReloadCatalog => self.reload_catalog(),
            HostAction::Edit(key) => self.widget.edit_field(key, &mut self.host.ctx()),
        }
        self.after_widget();
    }

    fn dismiss(&mut self) {
        match self.state.mode {
            Mode::Entry => {
                self.widget.popup_mut().close();
            }
            Mode::EngineList => {
                let current = self.widget.current_engine_index();
                self.widget.set_list_selection(current);
                self.state.mode = Mode::Entry;
            }
            Mode::Preferences => {
                self.state.preferences_section = None;
                self.state.mode = Mode::Entry;
            }
        }
    }
}
