//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The data provider seam and its static implementation
//! - The simulated HTTP API
//! - Clock abstraction for tokens and artificial latency
//! - Tokio runtime bridge for async operations

pub mod api;
pub mod clock;
pub mod provider;
pub mod runtime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::{DataProvider, MockProvider};
