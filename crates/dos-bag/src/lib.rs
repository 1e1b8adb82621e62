//! Remote-file manifests and BagIt bags for Data Object Service bundles.
//!
//! A manifest lists every member object of one or more bundles with its
//! canonical DOS URL, byte length, and checksums. A bag built from it
//! references the payload in `fetch.txt` rather than copying it.
//!
//! # Quick Start
//!
//! ```no_run
//! use dos_bag::{BagClientConfig, BagOptions, BundleRef, DosClient, ManifestBuilder};
//!
//! # async fn example() -> Result<(), dos_bag::BagError> {
//! let client = DosClient::new(BagClientConfig::from_env())?;
//! let builder = ManifestBuilder::new(client);
//!
//! let bundles = vec![BundleRef::new("ffffaf55-f19c-40e3-aa81-a6c69d357265")];
//! let summary = builder
//!     .make_bag(&bundles, std::path::Path::new("my-bag"), &BagOptions::default())
//!     .await?;
//! println!("bagged {} files", summary.entries);
//! # Ok(())
//! # }
//! ```

pub mod bagit;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod manifest;

pub use bagit::{make_bag, write_bag, BagAlgorithm, BagOptions, BagSummary};
pub use builder::{object_checksums, BundleRef, ManifestBuilder};
pub use client::DosClient;
pub use config::BagClientConfig;
pub use error::{BagError, BagResult};
pub use manifest::{
    check_uniform_checksums, read_manifest_file, write_manifest_file, ManifestEntry,
    FILENAME_PREFIX,
};
