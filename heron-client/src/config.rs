//! Client configuration

use std::path::PathBuf;

/// Client configuration for connecting to the HR backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory for persisted client state (session, remembered username)
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new configuration with defaults for everything but the URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            data_dir: PathBuf::from("."),
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the persisted-state directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Build a configuration from environment variables.
    ///
    /// `HERON_API_URL` is required; `HERON_TIMEOUT` and `HERON_DATA_DIR`
    /// override the defaults.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("HERON_API_URL").ok()?;
        let mut config = Self::new(base_url);

        if let Ok(timeout) = std::env::var("HERON_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                config.timeout = secs;
            }
        }
        if let Ok(dir) = std::env::var("HERON_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        Some(config)
    }
}
