//! Prediction client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://titanic-fastapi-1-7sk4.onrender.com/Passenger";

/// Artificial latency of the mock service.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1500);

/// Prediction client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL the passenger record is POSTed to
    pub endpoint: String,
    /// User-Agent header sent with each request
    pub user_agent: String,
    /// Answer locally instead of calling the endpoint
    pub mock: bool,
    /// Delay before the mock service answers
    pub mock_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: std::env::var("TITANIC_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            user_agent: std::env::var("TITANIC_USER_AGENT").unwrap_or_else(|_| {
                format!("titanic-predict/{}", env!("CARGO_PKG_VERSION"))
            }),
            mock: std::env::var("TITANIC_MOCK")
                .map(|v| env_flag(&v))
                .unwrap_or(false),
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }
}

/// Read an on/off environment value. Empty, `0`, `f`, `false`, `n`, `no`
/// and `off` (any case) are off; anything else is on.
pub fn env_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "f" | "false" | "n" | "no" | "off"
    )
}

impl ClientConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific endpoint
    pub fn new(endpoint: &str) -> Self {
        ClientConfig {
            endpoint: endpoint.to_string(),
            user_agent: format!("titanic-predict/{}", env!("CARGO_PKG_VERSION")),
            mock: false,
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }
}
