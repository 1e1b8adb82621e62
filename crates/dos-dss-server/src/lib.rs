//! HTTP server exposing the Data Object Service API over DSS.
//!
//! | Route | Behavior |
//! |-------|----------|
//! | `GET /` | HTML welcome page |
//! | `GET {base}/dataobjects/{id}` | `{"data_object": ...}` |
//! | `GET {base}/dataobjects` | 405, listing objects is unsupported |
//! | `GET {base}/databundles?page_size=&page_token=` | `{"data_bundles", "next_page_token"}` |
//! | `GET {base}/databundles/{id}?version=` | `{"data_bundle": ...}` |
//!
//! `{base}` defaults to `/ga4gh/dos/v1`. Errors render as `{"msg": "..."}`.

pub mod config;
pub mod error;
pub mod routes;

use anyhow::{Context, Result};
use dos_dss_core::DosService;
use tokio::net::TcpListener;
use tracing::info;

pub use config::{ServerConfig, DEFAULT_BASE_PATH};
pub use error::ApiError;
pub use routes::{router, AppState};

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig, service: DosService) -> Result<()> {
    let state = AppState {
        service,
        base_path: config.base_path.clone(),
    };
    let app = router(state);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(addr = %config.bind, base_path = %config.base_path, "DOS proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("DOS proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
