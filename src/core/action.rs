//! Actions that modules can return to communicate with the app

use crate::infrastructure::api::Method;

/// Actions returned by modules and commands to request state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Submit the login form
    SubmitLogin { username: String, password: String },

    /// Show the section with this id
    Navigate(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Probe the simulated API
    Api { endpoint: String, method: Method },

    /// Reload every dashboard dataset
    Refresh,

    /// Export the active section
    Export,

    /// End the session
    Logout,

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
