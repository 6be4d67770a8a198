pub(crate) mod handler;
pub mod keymap;

pub use keymap::{HostAction, map_key, map_mouse};
