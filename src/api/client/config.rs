//! Client configuration

use std::time::Duration;

/// Default per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(6000);

/// Connection settings for a Felix client. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    url: String,
    token: String,
    timeout: Duration,
    auto_conversion: bool,
}

impl ClientConfig {
    /// Create a configuration with the default timeout and auto-conversion on
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::builder(url, token).build()
    }

    pub fn builder(url: impl Into<String>, token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                url: url.into(),
                token: token.into(),
                timeout: DEFAULT_TIMEOUT,
                auto_conversion: true,
            },
        }
    }

    /// Service root as given by the caller
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Per-request deadline; zero means no deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn auto_conversion(&self) -> bool {
        self.auto_conversion
    }

    /// Root every endpoint is mounted under: `{url}/api`
    pub fn api_root(&self) -> String {
        format!("{}/api", self.url.trim_end_matches('/'))
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    pub fn auto_conversion(mut self, enabled: bool) -> Self {
        self.config.auto_conversion = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
