use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Mount point of the Data Object Service routes.
pub const DEFAULT_BASE_PATH: &str = "/ga4gh/dos/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads `DOS_DSS_BIND`; an unparseable value falls back to the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("DOS_DSS_BIND") {
            match v.parse() {
                Ok(addr) => cfg.bind = addr,
                Err(_) => tracing::warn!(value = %v, "ignoring invalid DOS_DSS_BIND"),
            }
        }
        cfg
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Normalized to a leading slash and no trailing slash.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = format!("/{}", base_path.trim_matches('/'));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_normalized() {
        let cfg = ServerConfig::default().with_base_path("api/ga4gh/dos/v1/");
        assert_eq!(cfg.base_path, "/api/ga4gh/dos/v1");
    }
}
