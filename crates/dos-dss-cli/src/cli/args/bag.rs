//! Manifest and bag arguments.

use std::path::PathBuf;

use clap::Args;
use dos_bag::{BagAlgorithm, BundleRef};

/// Where the DOS service is and which bundles to read from it.
#[derive(Args, Debug, Clone)]
pub struct BundleSource {
    /// DOS service root URL
    #[arg(long, env = "DOS_SERVICE_URL")]
    pub service_url: Option<String>,

    /// DOS base path under the service root
    #[arg(long, env = "DOS_BASE_PATH")]
    pub dos_base_path: Option<String>,

    /// Bundle as `id` or `id.version` (repeatable)
    #[arg(long = "bundle", value_name = "ID[.VERSION]")]
    pub bundles: Vec<BundleRef>,

    /// JSON file with `[{"id": ..., "version": ...}]` bundle references
    #[arg(long)]
    pub bundles_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub source: BundleSource,

    /// Output manifest path (default: stdout)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BagArgs {
    #[command(flatten)]
    pub source: BundleSource,

    /// Bag directory to create
    #[arg(long)]
    pub out: PathBuf,

    /// Bag manifest algorithm: md5, sha1, sha256, sha512 (repeatable)
    #[arg(long = "algorithm", default_value = "sha256")]
    pub algorithms: Vec<BagAlgorithm>,
}
