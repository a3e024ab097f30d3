//! Session lifecycle: login, logout, restore across restarts
//!
//! The session is persisted as two separate entries, `token` and `user`
//! (JSON). Restoring requires both; there is no expiry check.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::domain::access::{AuthError, Session, SessionUser};
use crate::infrastructure::clock::Clock;
use crate::infrastructure::provider::DataProvider;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Owns the single active session and its persisted form
pub struct SessionManager {
    store: Box<dyn KeyValueStore>,
    provider: Arc<dyn DataProvider>,
    clock: Arc<dyn Clock>,
    current: Option<Session>,
    issued: u64,
}

impl SessionManager {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        provider: Arc<dyn DataProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            provider,
            clock,
            current: None,
            issued: 0,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Load the persisted session, if both fields are present and the user
    /// record parses.
    pub fn restore_session(&mut self) -> Option<Session> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "session store read failed");
                return None;
            }
        };
        let raw_user = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "session store read failed");
                return None;
            }
        };
        let user = match serde_json::from_str::<SessionUser>(&raw_user) {
            Ok(user) => user,
            Err(err) => {
                debug!(error = %err, "persisted user record does not parse");
                return None;
            }
        };

        info!(username = %user.username, "restored session");
        let session = Session { token, user };
        self.current = Some(session.clone());
        Some(session)
    }

    /// Authenticate through the provider and persist the new session.
    /// A failed login leaves any current session untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        let user = match self.provider.authenticate(username, password).await {
            Ok(user) => user,
            Err(err) => {
                info!(username, provider = self.provider.name(), "login rejected");
                return Err(err);
            }
        };

        let session = Session {
            token: self.issue_token(),
            user,
        };
        if let Err(err) = self.persist(&session) {
            warn!(error = %format!("{err:#}"), "session not persisted; it will not survive a restart");
        }

        info!(username = %session.user.username, role = session.user.role.as_str(), "logged in");
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Drop the current session and its persisted fields
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!(key, error = %err, "failed to clear persisted session field");
            }
        }
        if let Some(session) = self.current.take() {
            info!(username = %session.user.username, "logged out");
        }
    }

    /// Hand the store back, e.g. to reopen it as if the process restarted
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    fn issue_token(&mut self) -> String {
        self.issued += 1;
        format!("mock-token-{}-{}", self.clock.now_millis(), self.issued)
    }

    fn persist(&mut self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.user).context("serialize session user")?;
        self.store
            .set(TOKEN_KEY, &session.token)
            .context("persist session token")?;
        self.store.set(USER_KEY, &user).context("persist session user")?;
        Ok(())
    }
}
