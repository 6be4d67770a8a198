use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::Mode;
use crate::widget::ScrollDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Quit,
    /// Enter in the field: activate the highlighted candidate or submit.
    Submit,
    PopupNext,
    PopupPrev,
    /// Esc: close whatever is open on top of the field.
    Dismiss,
    ScrollEngine(ScrollDirection),
    OpenEngineList,
    ListNext,
    ListPrev,
    ActivateListEntry,
    ToggleSuggestions,
    ReloadCatalog,
    Edit(KeyEvent),
}

pub fn map_key(key: KeyEvent, mode: Mode) -> Option<HostAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return Some(HostAction::Quit),
            KeyCode::Char('s') => return Some(HostAction::ToggleSuggestions),
            _ => {}
        }
    }

    match mode {
        Mode::Entry => map_entry_key(key),
        Mode::EngineList => map_engine_list_key(key),
        Mode::Preferences => map_preferences_key(key),
    }
}

pub fn map_mouse(mouse: MouseEvent, mode: Mode) -> Option<HostAction> {
    if mode != Mode::Entry {
        return None;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(HostAction::ScrollEngine(ScrollDirection::Up)),
        MouseEventKind::ScrollDown => Some(HostAction::ScrollEngine(ScrollDirection::Down)),
        _ => None,
    }
}

fn map_entry_key(key: KeyEvent) -> Option<HostAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Up => Some(HostAction::ScrollEngine(ScrollDirection::Up)),
            KeyCode::Down => Some(HostAction::ScrollEngine(ScrollDirection::Down)),
            _ => Some(HostAction::Edit(key)),
        };
    }

    match key.code {
        KeyCode::Enter => Some(HostAction::Submit),
        KeyCode::Up => Some(HostAction::PopupPrev),
        KeyCode::Down => Some(HostAction::PopupNext),
        KeyCode::Esc => Some(HostAction::Dismiss),
        KeyCode::F(4) => Some(HostAction::OpenEngineList),
        KeyCode::F(5) => Some(HostAction::ReloadCatalog),
        _ => Some(HostAction::Edit(key)),
    }
}

fn map_engine_list_key(key: KeyEvent) -> Option<HostAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(HostAction::ListPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(HostAction::ListNext),
        KeyCode::Enter => Some(HostAction::ActivateListEntry),
        KeyCode::Esc | KeyCode::F(4) => Some(HostAction::Dismiss),
        _ => None,
    }
}

fn map_preferences_key(key: KeyEvent) -> Option<HostAction> {
    match key.code {
        KeyCode::Char('s') => Some(HostAction::ToggleSuggestions),
        KeyCode::Esc | KeyCode::Enter => Some(HostAction::Dismiss),
        _ => None,
    }
}
