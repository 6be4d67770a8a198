mod chrome;
mod entry;
mod layout;
mod overlay;

pub use chrome::{StatusView, draw_status};
pub use entry::{EntryView, draw_entry, selector_width};
pub use layout::{UiLayout, split_layout};
pub use overlay::{
    ListItemView, ListView, PreferencesView, draw_dropdown, draw_preferences_overlay,
};
