//! Translation layer between the DSS storage API and the GA4GH Data Object
//! Service (DOS) API.
//!
//! This crate provides:
//!
//! - HTTP client for the DSS endpoints the proxy needs
//! - Field mapping from DSS headers and bundles to DOS messages
//! - Page-token translation (`page_token` ⇄ `search_after` link headers)
//! - Replica fallback for objects without a direct URL
//!
//! # Quick Start
//!
//! ```no_run
//! use dos_dss_core::{DosService, DssClient, DssConfig};
//!
//! # async fn example() -> Result<(), dos_dss_core::DssError> {
//! let client = DssClient::new(DssConfig::from_env())?;
//! let service = DosService::new(client);
//!
//! let object = service
//!     .get_data_object("8ff23235-4435-4929-8fb2-5d55b4564999")
//!     .await?;
//! println!("{} has {} urls", object.id, object.urls.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `DSS_ENDPOINT` | DSS base URL (default: `https://commons-dss.ucsc-cgp-dev.org/v1`) |
//! | `DSS_TIMEOUT` | Request timeout in seconds (default: 30) |

pub mod client;
pub mod config;
pub mod error;
pub mod mapping;
pub mod pagination;
pub mod replica;
pub mod service;
pub mod types;

pub use client::{DssClient, SearchPage};
pub use config::{DssConfig, Replica};
pub use error::{DssError, DssResult, RecordKind};
pub use pagination::PageRequest;
pub use replica::ReplicaOutcome;
pub use service::DosService;
pub use types::{
    Checksum, DataBundle, DataBundleResponse, DataObject, DataObjectResponse,
    ListDataBundlesResponse, ObjectUrl,
};
