//! Error types for the DSS translation layer.

use std::fmt;

/// Kind of record a lookup was for. Drives the not-found message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    DataObject,
    DataBundle,
}

impl RecordKind {
    /// Name of the identifier field in the DOS API for this record.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::DataObject => "data_object_id",
            Self::DataBundle => "data_bundle_id",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataObject => f.write_str("Data Object"),
            Self::DataBundle => f.write_str("Data Bundle"),
        }
    }
}

/// DSS translation errors.
#[derive(Debug, thiserror::Error)]
pub enum DssError {
    /// Record not found upstream.
    #[error("{kind} with {} {id} was not found.", .kind.id_field())]
    NotFound { kind: RecordKind, id: String },

    /// By-reference object could not be enriched from its reference document.
    #[error("Data Object with data_object_id {id} was not found. {message}")]
    Reference { id: String, message: String },

    /// Network error or unexpected upstream status.
    #[error("network error: {message}")]
    Network { message: String },

    /// Upstream answered with a body we cannot interpret.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<reqwest::Error> for DssError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for DSS operations.
pub type DssResult<T> = Result<T, DssError>;
