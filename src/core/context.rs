//! Shared context passed to modules

use crate::domain::access::{Role, Session};

/// Shared context available to all modules
#[derive(Debug, Default, Clone)]
pub struct Context {
    /// Username of the signed-in operator
    pub operator: Option<String>,

    /// Role of the signed-in operator
    pub role: Option<Role>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_session(session: Option<&Session>) -> Self {
        Self {
            operator: session.map(|s| s.user.username.clone()),
            role: session.map(|s| s.user.role),
        }
    }

    /// Only administrators may change system settings
    pub fn can_edit_settings(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}
