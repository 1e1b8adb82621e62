//! Remote file manifest: one JSON entry per remote file.
//!
//! ```json
//! [
//!   {
//!     "url": "https://.../ga4gh/dos/v1/dataobjects/0e8cc4a5-...",
//!     "length": 699,
//!     "filename": "dss_data_object_5",
//!     "sha256": "ea8bd59a...",
//!     "crc32c": "4a16d1e1"
//!   }
//! ]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BagError, BagResult};

/// Prefix for generated payload filenames; a running index is appended.
pub const FILENAME_PREFIX: &str = "dss_data_object_";

/// One remote file in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub url: String,
    pub length: u64,
    pub filename: String,

    /// Checksum values keyed by algorithm name.
    #[serde(flatten)]
    pub checksums: BTreeMap<String, String>,
}

impl ManifestEntry {
    pub fn filename_for_index(index: usize) -> String {
        format!("{}{}", FILENAME_PREFIX, index)
    }

    fn checksum_keys(&self) -> BTreeSet<&str> {
        self.checksums.keys().map(String::as_str).collect()
    }
}

/// Reject manifests whose entries carry different sets of checksum keys.
pub fn check_uniform_checksums(entries: &[ManifestEntry]) -> BagResult<()> {
    let Some(first) = entries.first() else {
        return Ok(());
    };
    let expected = first.checksum_keys();

    for entry in &entries[1..] {
        let found = entry.checksum_keys();
        if found != expected {
            return Err(BagError::InconsistentChecksums {
                filename: entry.filename.clone(),
                expected: join_keys(&expected),
                found: join_keys(&found),
            });
        }
    }
    Ok(())
}

fn join_keys(keys: &BTreeSet<&str>) -> String {
    keys.iter().copied().collect::<Vec<_>>().join(", ")
}

/// Render the manifest as pretty JSON with a trailing newline.
pub fn manifest_json(entries: &[ManifestEntry]) -> BagResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(entries)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write the manifest to `path`.
pub fn write_manifest_file(path: &Path, entries: &[ManifestEntry]) -> BagResult<()> {
    let bytes = manifest_json(entries)?;
    fs::write(path, bytes).map_err(|e| BagError::io(path, e))
}

/// Read a manifest from `path`.
pub fn read_manifest_file(path: &Path) -> BagResult<Vec<ManifestEntry>> {
    let bytes = fs::read(path).map_err(|e| BagError::io(path, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}
