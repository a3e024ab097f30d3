//! Data provider abstraction
//!
//! The dashboard never reads data literals directly; everything comes through
//! [`DataProvider`], so a real backend can replace [`MockProvider`] without
//! touching rendering.

mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::access::{AuthError, DashboardStats, Dataset, ListKind, SessionUser};

pub use mock::MockProvider;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DataProvider: Send + Sync + 'static {
    /// Check a credential pair and return the operator it belongs to
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<SessionUser, AuthError>;

    async fn fetch_stats(&self) -> Result<DashboardStats, ProviderError>;

    async fn fetch_list(&self, kind: ListKind) -> Result<Dataset, ProviderError>;

    /// Display name for status lines and logs
    fn name(&self) -> &'static str;
}
