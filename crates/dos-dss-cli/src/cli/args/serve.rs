//! Proxy server arguments.

use std::net::SocketAddr;

use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// DSS API base URL
    #[arg(long, env = "DSS_ENDPOINT")]
    pub dss_endpoint: Option<String>,

    /// Address to listen on
    #[arg(long, env = "DOS_DSS_BIND")]
    pub bind: Option<SocketAddr>,

    /// Path prefix for the DOS routes
    #[arg(long, default_value = "/ga4gh/dos/v1")]
    pub base_path: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "DSS_TIMEOUT")]
    pub timeout: Option<u64>,
}
