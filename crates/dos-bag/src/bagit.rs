//! BagIt writer for remote-file bags.
//!
//! Payload files are not downloaded: the bag lists them in `fetch.txt` and
//! records their checksums in `manifest-<alg>.txt`, leaving `data/` empty.
//!
//! ```text
//! <bag_dir>/
//!   bagit.txt
//!   bag-info.txt
//!   data/
//!   fetch.txt
//!   manifest-sha256.txt
//!   tagmanifest-sha256.txt
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{BagError, BagResult};
use crate::manifest::{check_uniform_checksums, read_manifest_file, ManifestEntry};

pub const BAGIT_VERSION: &str = "0.97";
pub const PAYLOAD_DIR: &str = "data";
const SOFTWARE_AGENT: &str = concat!("dos-bag ", env!("CARGO_PKG_VERSION"));

/// Checksum algorithms a bag manifest can be written for.
///
/// Manifest keys such as `etag` or `crc32c` are carried in the remote
/// manifest but never become bag manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BagAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl BagAlgorithm {
    pub const ALL: [BagAlgorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    pub fn manifest_file(self) -> String {
        format!("manifest-{}.txt", self.name())
    }
}

impl fmt::Display for BagAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BagAlgorithm {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BagError::UnsupportedAlgorithm {
                name: s.to_string(),
            })
    }
}

/// Bag creation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagOptions {
    /// Algorithms to write payload manifests for. Every entry must carry each.
    pub algorithms: Vec<BagAlgorithm>,
}

impl Default for BagOptions {
    fn default() -> Self {
        Self {
            algorithms: vec![BagAlgorithm::Sha256],
        }
    }
}

impl BagOptions {
    pub fn with_algorithms(mut self, algorithms: Vec<BagAlgorithm>) -> Self {
        self.algorithms = algorithms;
        self.algorithms.sort();
        self.algorithms.dedup();
        self
    }
}

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub payload_octets: u64,
    pub algorithms: Vec<BagAlgorithm>,
}

impl BagSummary {
    /// `Payload-Oxum` value: `<octets>.<stream count>`.
    pub fn payload_oxum(&self) -> String {
        format!("{}.{}", self.payload_octets, self.entries)
    }
}

/// Build a bag at `bag_dir` from the manifest file at `manifest_path`.
pub fn make_bag(
    bag_dir: &Path,
    manifest_path: &Path,
    options: &BagOptions,
) -> BagResult<BagSummary> {
    let entries = read_manifest_file(manifest_path)?;
    write_bag(bag_dir, &entries, options)
}

/// Build a bag at `bag_dir` from in-memory manifest entries.
///
/// All preconditions are checked before anything is written. `bag_dir` must
/// be missing or empty.
pub fn write_bag(
    bag_dir: &Path,
    entries: &[ManifestEntry],
    options: &BagOptions,
) -> BagResult<BagSummary> {
    validate(entries, options)?;
    ensure_empty_dir(bag_dir)?;

    let summary = BagSummary {
        path: bag_dir.to_path_buf(),
        entries: entries.len(),
        payload_octets: entries.iter().map(|e| e.length).sum(),
        algorithms: options.algorithms.clone(),
    };
    let bagging_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let tag_files = render_tag_files(entries, &summary, &bagging_date);

    let payload_dir = bag_dir.join(PAYLOAD_DIR);
    fs::create_dir_all(&payload_dir).map_err(|e| BagError::io(&payload_dir, e))?;

    for (name, content) in &tag_files {
        let path = bag_dir.join(name);
        fs::write(&path, content).map_err(|e| BagError::io(&path, e))?;
    }

    let tagmanifest_path = bag_dir.join("tagmanifest-sha256.txt");
    fs::write(&tagmanifest_path, render_tagmanifest(&tag_files))
        .map_err(|e| BagError::io(&tagmanifest_path, e))?;

    info!(
        path = %bag_dir.display(),
        entries = summary.entries,
        oxum = %summary.payload_oxum(),
        "bag created"
    );
    Ok(summary)
}

fn ensure_empty_dir(bag_dir: &Path) -> BagResult<()> {
    let mut listing = match fs::read_dir(bag_dir) {
        Ok(listing) => listing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(BagError::io(bag_dir, e)),
    };
    if listing.next().is_some() {
        return Err(BagError::BagDirNotEmpty {
            path: bag_dir.to_path_buf(),
        });
    }
    Ok(())
}

fn validate(entries: &[ManifestEntry], options: &BagOptions) -> BagResult<()> {
    if options.algorithms.is_empty() {
        return Err(BagError::NoChecksums);
    }
    check_uniform_checksums(entries)?;

    for entry in entries {
        validate_entry(entry)?;
        for alg in &options.algorithms {
            if !entry.checksums.contains_key(alg.name()) {
                return Err(BagError::MissingChecksum {
                    filename: entry.filename.clone(),
                    algorithm: alg.name().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_entry(entry: &ManifestEntry) -> BagResult<()> {
    let invalid = |reason: &str| -> BagResult<()> {
        Err(BagError::InvalidEntry {
            filename: entry.filename.clone(),
            reason: reason.to_string(),
        })
    };

    if entry.filename.is_empty() {
        return invalid("empty filename");
    }
    if entry.filename.chars().any(char::is_whitespace) {
        return invalid("filename contains whitespace");
    }
    if entry.filename.starts_with('/')
        || entry.filename.split('/').any(|c| c == ".." || c.is_empty())
    {
        return invalid("filename must be a relative path inside the payload directory");
    }
    if entry.url.is_empty() || entry.url.chars().any(char::is_whitespace) {
        return invalid("url is empty or contains whitespace");
    }
    if entry
        .checksums
        .values()
        .any(|v| v.is_empty() || v.chars().any(char::is_whitespace))
    {
        return invalid("checksum value is empty or contains whitespace");
    }
    Ok(())
}

/// Tag files in write order, excluding the tag manifest itself.
fn render_tag_files(
    entries: &[ManifestEntry],
    summary: &BagSummary,
    bagging_date: &str,
) -> Vec<(String, String)> {
    let mut files = vec![
        (
            "bagit.txt".to_string(),
            format!(
                "BagIt-Version: {}\nTag-File-Character-Encoding: UTF-8\n",
                BAGIT_VERSION
            ),
        ),
        (
            "bag-info.txt".to_string(),
            format!(
                "Bag-Software-Agent: {}\nBagging-Date: {}\nPayload-Oxum: {}\n",
                SOFTWARE_AGENT,
                bagging_date,
                summary.payload_oxum()
            ),
        ),
        ("fetch.txt".to_string(), render_fetch(entries)),
    ];

    for alg in &summary.algorithms {
        files.push((alg.manifest_file(), render_manifest(entries, *alg)));
    }
    files
}

/// `fetch.txt`: `<url> <length> data/<filename>` per entry.
pub fn render_fetch(entries: &[ManifestEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{} {} {}/{}\n", e.url, e.length, PAYLOAD_DIR, e.filename))
        .collect()
}

/// `manifest-<alg>.txt`: `<checksum> data/<filename>` per entry.
pub fn render_manifest(entries: &[ManifestEntry], alg: BagAlgorithm) -> String {
    entries
        .iter()
        .filter_map(|e| {
            e.checksums
                .get(alg.name())
                .map(|sum| format!("{} {}/{}\n", sum, PAYLOAD_DIR, e.filename))
        })
        .collect()
}

fn render_tagmanifest(tag_files: &[(String, String)]) -> String {
    let mut lines: Vec<String> = tag_files
        .iter()
        .map(|(name, content)| format!("{} {}\n", sha256_hex(content.as_bytes()), name))
        .collect();
    lines.sort();
    lines.concat()
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
