use anyhow::Context;
use dos_dss_core::{DosService, DssClient, DssConfig};
use dos_dss_server::ServerConfig;

use crate::cli::args::ServeArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: ServeArgs) -> anyhow::Result<i32> {
    let mut dss = DssConfig::from_env();
    if let Some(url) = args.dss_endpoint {
        dss = dss.with_url(url);
    }
    if let Some(timeout) = args.timeout {
        dss = dss.with_timeout(timeout);
    }

    let mut server = ServerConfig::from_env().with_base_path(&args.base_path);
    if let Some(bind) = args.bind {
        server = server.with_bind(bind);
    }

    tracing::info!(dss = %dss.url, "using DSS endpoint");
    let client = DssClient::new(dss).context("failed to configure DSS client")?;
    dos_dss_server::serve(server, DosService::new(client)).await?;
    Ok(SUCCESS)
}
