//! HTTP client configuration module
//!
//! Centralizes timeouts and connection settings for the backend and
//! geocoding clients. Requests are never retried: every user action maps
//! to exactly one attempt.

use crate::config::{AppConfig, TimeoutConfig};
use crate::error::AppResult;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// Idle pooled connections are dropped after this long
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(45),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 2,
            user_agent: format!("RLMBooking/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend calls include the event predictor, which can be slow.
    pub fn backend_api() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 4,
            ..Self::default()
        }
    }

    /// Nominatim answers quickly or not at all; keep the batch moving.
    pub fn geocoding() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            pool_max_idle_per_host: 2,
            ..Self::default()
        }
    }

    pub fn with_timeouts(mut self, timeouts: &TimeoutConfig) -> Self {
        self.connect_timeout = Duration::from_secs(timeouts.connect_secs);
        self.timeout = Duration::from_secs(timeouts.request_secs);
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> AppResult<Client> {
        Ok(ClientBuilder::new()
            .user_agent(self.user_agent.clone())
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build()?)
    }
}

/// HTTP client factory for creating pre-configured clients
pub struct HttpClientFactory {
    backend: HttpConfig,
    geocoding: HttpConfig,
}

impl HttpClientFactory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: HttpConfig::backend_api()
                .with_timeouts(&config.timeouts)
                .with_user_agent(config.user_agent.clone()),
            geocoding: HttpConfig::geocoding()
                .with_timeouts(&config.geocoder_timeouts)
                .with_user_agent(config.user_agent.clone()),
        }
    }

    pub fn backend_client(&self) -> AppResult<Client> {
        self.backend.build_client()
    }

    pub fn geocoding_client(&self) -> AppResult<Client> {
        self.geocoding.build_client()
    }
}
