//! UI Modules
//!
//! Self-contained panels that handle their own keys and drawing:
//! - login: credential form shown without a session
//! - settings: system settings form
//!
//! Plus the export helpers behind the `e` key.

pub mod export;
pub mod login;
pub mod settings;
