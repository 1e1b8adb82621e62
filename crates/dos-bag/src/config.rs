use serde::{Deserialize, Serialize};

/// Where the Data Object Service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BagClientConfig {
    /// Service root, e.g. `https://example.execute-api.us-west-2.amazonaws.com/api`.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// DOS base path under the service root.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_service_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_base_path() -> String {
    "ga4gh/dos/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for BagClientConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            base_path: default_base_path(),
            timeout_secs: default_timeout(),
        }
    }
}

impl BagClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `DOS_SERVICE_URL` | Service root URL |
    /// | `DOS_BASE_PATH` | DOS base path |
    pub fn from_env() -> Self {
        Self {
            service_url: std::env::var("DOS_SERVICE_URL").unwrap_or_else(|_| default_service_url()),
            base_path: std::env::var("DOS_BASE_PATH").unwrap_or_else(|_| default_base_path()),
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// `{service_url}/{base_path}` with single slashes at the seam.
    pub fn dos_url(&self) -> String {
        let root = self.service_url.trim_end_matches('/');
        let base = self.base_path.trim_matches('/');
        if base.is_empty() {
            root.to_string()
        } else {
            format!("{}/{}", root, base)
        }
    }
}
