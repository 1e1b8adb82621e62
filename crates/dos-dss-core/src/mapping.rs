//! Field mapping between DSS records and Data Object Service messages.
//!
//! Pure functions. Missing upstream fields become `None`, never an error,
//! except where the DOS message cannot be formed at all (bundle fqid).

use crate::config::Replica;
use crate::error::{DssError, DssResult};
use crate::types::{
    Checksum, DataBundle, DataObject, DssBundle, DssFileHeaders, DssReferenceFile,
    DssSearchResult, ObjectUrl,
};

/// Content-type marker of objects stored by reference.
pub const FILEREF_MARKER: &str = "fileref";

/// Checksum algorithm tags, in the order they appear on a mapped object.
pub const CHECKSUM_TYPES: [&str; 4] = ["sha256", "etag", "sha1", "crc32c"];

/// Checksums of a DSS file; always one entry per tag in [`CHECKSUM_TYPES`].
pub fn file_checksums(headers: &DssFileHeaders) -> Vec<Checksum> {
    let values = [
        &headers.sha256,
        &headers.s3_etag,
        &headers.sha1,
        &headers.crc32c,
    ];
    CHECKSUM_TYPES
        .iter()
        .zip(values)
        .map(|(tag, value)| Checksum::new(value.clone(), *tag))
        .collect()
}

/// One URL per replica for `{dss_url}/{path}/{object_id}`.
pub fn make_urls(
    dss_url: &str,
    path: &str,
    object_id: &str,
    replicas: &[Replica],
) -> Vec<ObjectUrl> {
    replicas
        .iter()
        .map(|replica| {
            ObjectUrl::new(format!(
                "{}/{}/{}?replica={}",
                dss_url, path, object_id, replica
            ))
        })
        .collect()
}

/// Convert DSS file headers into a Data Object.
pub fn dss_file_to_dos(
    object_id: &str,
    headers: &DssFileHeaders,
    dss_url: &str,
    replicas: &[Replica],
) -> DataObject {
    DataObject {
        id: object_id.to_string(),
        version: headers.version.clone(),
        content_type: headers.content_type.clone(),
        checksums: file_checksums(headers),
        urls: make_urls(dss_url, "files", object_id, replicas),
        size: None,
    }
}

/// Whether the object is a pointer to data stored elsewhere.
pub fn is_reference(object: &DataObject) -> bool {
    object
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains(FILEREF_MARKER))
}

/// Replace size, URLs, checksums and content type with the reference document's.
pub fn apply_reference(mut object: DataObject, reference: DssReferenceFile) -> DataObject {
    object.size = Some(reference.size);
    object.urls = reference.url.into_iter().map(ObjectUrl::new).collect();
    object.checksums = vec![Checksum::new(Some(reference.crc32c), "crc32c")];
    object.content_type = Some(reference.content_type);
    object
}

/// Split `id.version` on the first `.`.
pub fn split_bundle_fqid(fqid: &str) -> Option<(&str, &str)> {
    fqid.split_once('.')
}

/// Convert a search hit into a list-form Data Bundle (id and version only).
pub fn dss_list_bundle_to_dos(result: &DssSearchResult) -> DssResult<DataBundle> {
    let (id, version) =
        split_bundle_fqid(&result.bundle_fqid).ok_or_else(|| DssError::InvalidResponse {
            message: format!("bundle_fqid without version: {}", result.bundle_fqid),
        })?;

    Ok(DataBundle {
        id: id.to_string(),
        version: version.to_string(),
        data_object_ids: None,
    })
}

/// Convert a full DSS bundle into a Data Bundle.
pub fn dss_bundle_to_dos(bundle: DssBundle) -> DataBundle {
    DataBundle {
        id: bundle.uuid,
        version: bundle.version,
        data_object_ids: Some(bundle.files.into_iter().map(|f| f.uuid).collect()),
    }
}

/// URL of `object_id` inside a bundle's file list, if listed with one.
pub fn bundle_file_url<'a>(bundle: &'a DssBundle, object_id: &str) -> Option<&'a str> {
    bundle
        .files
        .iter()
        .find(|f| f.uuid == object_id)
        .and_then(|f| f.url.as_deref())
}
