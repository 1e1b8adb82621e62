//! Error types for manifest building and bag creation.

use std::path::PathBuf;

/// Bag errors.
#[derive(Debug, thiserror::Error)]
pub enum BagError {
    /// Record not found on the DOS service.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Network error or unexpected status.
    #[error("network error: {message}")]
    Network { message: String },

    /// DOS service answered with a body we cannot interpret.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Neither the record nor a header probe gave a size.
    #[error("no size available for data object {object_id}")]
    MissingSize { object_id: String },

    /// Entries disagree on which checksum keys they carry.
    #[error("inconsistent checksums: {filename} has [{found}], expected [{expected}]")]
    InconsistentChecksums {
        filename: String,
        expected: String,
        found: String,
    },

    /// An entry lacks a checksum for a requested bag algorithm.
    #[error("{filename} has no {algorithm} checksum")]
    MissingChecksum { filename: String, algorithm: String },

    /// No bag algorithm was requested.
    #[error("at least one checksum algorithm is required")]
    NoChecksums,

    /// Algorithm name not usable in a bag manifest.
    #[error("unsupported checksum algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    /// Entry cannot be written to fetch.txt or a manifest.
    #[error("invalid manifest entry {filename}: {reason}")]
    InvalidEntry { filename: String, reason: String },

    /// Bag directory already holds files.
    #[error("bag directory {} is not empty", .path.display())]
    BagDirNotEmpty { path: PathBuf },

    /// Record id that names no DOS record.
    #[error("invalid record id '{id}'")]
    InvalidRecordId { id: String },

    /// Service URL cannot carry record paths.
    #[error("invalid DOS service url '{url}'")]
    InvalidServiceUrl { url: String },

    /// Input bundle reference could not be parsed.
    #[error("invalid bundle reference '{reference}'")]
    InvalidBundleRef { reference: String },

    /// Filesystem error.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest (de)serialization error.
    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BagError {
    /// Whether the manifest violated a precondition of bag creation.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InconsistentChecksums { .. }
                | Self::MissingChecksum { .. }
                | Self::NoChecksums
                | Self::UnsupportedAlgorithm { .. }
                | Self::InvalidEntry { .. }
                | Self::BagDirNotEmpty { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for BagError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for bag operations.
pub type BagResult<T> = Result<T, BagError>;
