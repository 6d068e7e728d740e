pub mod command;
pub mod config;
pub mod debug_log;
pub mod model;
pub mod output;
pub mod replay;
pub mod store;
pub mod tui;
pub mod ui;
pub mod validate;
pub mod view;
