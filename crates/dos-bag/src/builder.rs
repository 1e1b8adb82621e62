//! Manifest builder: turns Data Bundles into remote-file manifest entries.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dos_dss_core::mapping::split_bundle_fqid;
use dos_dss_core::DataObject;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bagit::{self, BagOptions, BagSummary};
use crate::client::DosClient;
use crate::error::{BagError, BagResult};
use crate::manifest::{manifest_json, ManifestEntry};

/// A bundle to include; `version` pins a specific bundle version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl BundleRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl fmt::Display for BundleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}.{}", self.id, version),
            None => f.write_str(&self.id),
        }
    }
}

/// Parses `id` or `id.version`.
impl FromStr for BundleRef {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || BagError::InvalidBundleRef {
            reference: s.to_string(),
        };
        match split_bundle_fqid(s) {
            Some((id, version)) if !id.is_empty() && !version.is_empty() => {
                Ok(Self::new(id).with_version(version))
            }
            Some(_) => Err(invalid()),
            None if s.is_empty() => Err(invalid()),
            None => Ok(Self::new(s)),
        }
    }
}

/// Checksums of a Data Object keyed by type; unreported values are skipped.
pub fn object_checksums(object: &DataObject) -> BTreeMap<String, String> {
    object
        .checksums
        .iter()
        .filter_map(|c| {
            c.checksum
                .as_ref()
                .map(|value| (c.checksum_type.clone(), value.clone()))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    client: DosClient,
}

impl ManifestBuilder {
    pub fn new(client: DosClient) -> Self {
        Self { client }
    }

    /// Member object IDs of a bundle, in bundle order.
    pub async fn data_object_ids(&self, bundle: &BundleRef) -> BagResult<Vec<String>> {
        let data_bundle = self
            .client
            .get_data_bundle(&bundle.id, bundle.version.as_deref())
            .await?;
        Ok(data_bundle.data_object_ids.unwrap_or_default())
    }

    pub async fn num_data_objects(&self, bundle: &BundleRef) -> BagResult<usize> {
        Ok(self.data_object_ids(bundle).await?.len())
    }

    pub async fn get_object(&self, object_id: &str) -> BagResult<DataObject> {
        self.client.get_data_object(object_id).await
    }

    /// Size from the record, else from a header probe of its first URL.
    pub async fn object_size(&self, object: &DataObject) -> BagResult<u64> {
        if let Some(size) = object.size {
            return Ok(size);
        }

        let missing = || BagError::MissingSize {
            object_id: object.id.clone(),
        };
        let first_url = object.urls.first().ok_or_else(missing)?;
        self.client
            .probe_size(&first_url.url)
            .await?
            .ok_or_else(missing)
    }

    /// Manifest entry for one object, named by its running `index`.
    pub async fn entry_for_object(
        &self,
        object_id: &str,
        index: usize,
    ) -> BagResult<ManifestEntry> {
        let object = self.get_object(object_id).await?;
        let length = self.object_size(&object).await?;

        Ok(ManifestEntry {
            url: self.client.data_object_url(object_id)?,
            length,
            filename: ManifestEntry::filename_for_index(index),
            checksums: object_checksums(&object),
        })
    }

    /// One entry per member object of every bundle, indexed across bundles.
    pub async fn build_manifest(&self, bundles: &[BundleRef]) -> BagResult<Vec<ManifestEntry>> {
        let mut entries = Vec::new();

        for bundle in bundles {
            let ids = self.data_object_ids(bundle).await?;
            debug!(bundle = %bundle, objects = ids.len(), "collecting bundle");

            for id in ids {
                let entry = self.entry_for_object(&id, entries.len()).await?;
                entries.push(entry);
            }
        }

        info!(bundles = bundles.len(), entries = entries.len(), "manifest built");
        Ok(entries)
    }

    /// Build the manifest and write it to `path`.
    pub async fn write_manifest(
        &self,
        bundles: &[BundleRef],
        path: &Path,
    ) -> BagResult<Vec<ManifestEntry>> {
        let entries = self.build_manifest(bundles).await?;
        crate::manifest::write_manifest_file(path, &entries)?;
        Ok(entries)
    }

    /// Build the manifest into a temporary file and bag it at `bag_dir`.
    pub async fn make_bag(
        &self,
        bundles: &[BundleRef],
        bag_dir: &Path,
        options: &BagOptions,
    ) -> BagResult<BagSummary> {
        let entries = self.build_manifest(bundles).await?;

        let temp = tempfile::Builder::new()
            .prefix("remote-file-manifest")
            .suffix(".json")
            .tempfile()
            .map_err(|e| BagError::io(std::env::temp_dir(), e))?;
        std::fs::write(temp.path(), manifest_json(&entries)?)
            .map_err(|e| BagError::io(temp.path(), e))?;

        bagit::make_bag(bag_dir, temp.path(), options)
    }
}
