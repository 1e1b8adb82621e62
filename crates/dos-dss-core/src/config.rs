//! Upstream configuration: DSS endpoint, replicas, timeouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DssError;

/// Storage replica hosting a copy of DSS data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Replica {
    Aws,
    Azure,
    Gcp,
}

impl Replica {
    pub const ALL: [Replica; 3] = [Replica::Aws, Replica::Azure, Replica::Gcp];

    /// Query-parameter value understood by DSS.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Replica {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Replica {
    type Err = DssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "gcp" => Ok(Self::Gcp),
            other => Err(DssError::Config {
                message: format!("unknown replica '{}' (expected aws, azure or gcp)", other),
            }),
        }
    }
}

/// DSS client configuration.
///
/// Built explicitly and handed to [`crate::DssClient::new`]; nothing here touches
/// the file system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DssConfig {
    /// DSS API base URL, without trailing slash.
    #[serde(default = "default_dss_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Replica used for header lookups, reference documents and searches.
    #[serde(default = "default_primary_replica")]
    pub primary_replica: Replica,

    /// Replicas advertised in object URLs and probed during fallback, in order.
    #[serde(default = "default_replicas")]
    pub replicas: Vec<Replica>,

    /// Page size used when the caller does not send one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_dss_url() -> String {
    "https://commons-dss.ucsc-cgp-dev.org/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_primary_replica() -> Replica {
    Replica::Aws
}

fn default_replicas() -> Vec<Replica> {
    Replica::ALL.to_vec()
}

fn default_page_size() -> u32 {
    10
}

impl Default for DssConfig {
    fn default() -> Self {
        Self {
            url: default_dss_url(),
            timeout_secs: default_timeout(),
            primary_replica: default_primary_replica(),
            replicas: default_replicas(),
            default_page_size: default_page_size(),
        }
    }
}

impl DssConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `DSS_ENDPOINT` | DSS base URL (trailing `/` is dropped) |
    /// | `DSS_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        let url = std::env::var("DSS_ENDPOINT").unwrap_or_else(|_| default_dss_url());
        Self {
            url: url.trim_end_matches('/').to_string(),
            timeout_secs: std::env::var("DSS_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            ..Self::default()
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the replica list probed during fallback.
    pub fn with_replicas(mut self, replicas: Vec<Replica>) -> Self {
        self.replicas = replicas;
        self
    }
}
