//! Gatehouse: a terminal console for an access-control system.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod store;
pub mod ui;
