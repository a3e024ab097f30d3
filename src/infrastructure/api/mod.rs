//! Simulated HTTP API
//!
//! Answers two fixed endpoints after an artificial delay. It stands in for a
//! backend whose real contract is not known yet, so nothing else in the crate
//! derives behavior from its payloads; the console exposes it through `:api`.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::infrastructure::clock::Clock;
use crate::infrastructure::provider::MockProvider;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const STATS_ENDPOINT: &str = "/api/dashboard/stats";

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Endpoint not found")]
    EndpointNotFound { endpoint: String },
}

pub struct MockApi {
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl MockApi {
    pub fn new(clock: Arc<dyn Clock>, latency: Duration) -> Self {
        Self { clock, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Resolve `endpoint` after the configured latency. Method and body are
    /// accepted for shape only; the answer depends on the endpoint alone.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        debug!(
            endpoint,
            method = method.as_str(),
            has_body = body.is_some(),
            "mock api request"
        );
        self.clock.sleep(self.latency).await;

        match endpoint {
            LOGIN_ENDPOINT => {
                let user = MockProvider::admin();
                Ok(ApiResponse {
                    success: true,
                    data: json!({
                        "token": format!("mock-token-{}", self.clock.now_millis()),
                        "user": user,
                    }),
                })
            }
            STATS_ENDPOINT => Ok(ApiResponse {
                success: true,
                data: serde_json::to_value(MockProvider::stats()).unwrap_or(Value::Null),
            }),
            other => Err(ApiError::EndpointNotFound {
                endpoint: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ManualClock;

    fn api() -> (Arc<ManualClock>, MockApi) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let api = MockApi::new(clock.clone(), DEFAULT_LATENCY);
        (clock, api)
    }

    #[tokio::test]
    async fn test_login_endpoint_resolves() {
        let (_clock, api) = api();
        let response = api
            .request(LOGIN_ENDPOINT, Method::Post, Some(&json!({"username": "x"})))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.data["user"]["role"], "admin");
        assert_eq!(response.data["token"], "mock-token-1700000000500");
    }

    #[tokio::test]
    async fn test_stats_endpoint_resolves() {
        let (_clock, api) = api();
        let response = api.request(STATS_ENDPOINT, Method::Get, None).await.unwrap();
        assert!(response.success);
        assert_eq!(response.data["todayAccess"], 128);
        assert_eq!(response.data["registeredUsers"], 156);
    }

    #[tokio::test]
    async fn test_unknown_endpoint_rejects() {
        let (_clock, api) = api();
        for endpoint in ["/api/devices", "", "/api/auth/login/", "api/dashboard/stats"] {
            let err = api.request(endpoint, Method::Get, None).await.unwrap_err();
            assert_eq!(err.to_string(), "Endpoint not found");
        }
    }

    #[tokio::test]
    async fn test_every_request_waits_the_latency() {
        let (clock, api) = api();
        let _ = api.request(STATS_ENDPOINT, Method::Get, None).await;
        let _ = api.request("/nope", Method::Get, None).await;
        assert_eq!(clock.sleeps(), vec![DEFAULT_LATENCY, DEFAULT_LATENCY]);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(Method::parse("post"), Some(Method::Post));
        assert_eq!(Method::parse(" GET "), Some(Method::Get));
        assert_eq!(Method::parse("PATCH"), None);
    }
}
