pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub(crate) mod event;
pub mod input;
pub mod logging;
pub mod notify;
pub mod settings;
pub mod suggest;
pub mod ui;
pub mod widget;
