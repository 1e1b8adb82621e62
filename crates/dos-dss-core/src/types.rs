//! Wire types for both sides of the proxy.
//!
//! The `Dss*` types mirror what the storage API returns; the rest are the
//! Data Object Service messages we emit.

use serde::{Deserialize, Serialize};

/// Checksum entry on a Data Object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    /// Checksum value; `None` when the upstream did not report it.
    pub checksum: Option<String>,

    /// Algorithm tag (`sha256`, `etag`, `sha1`, `crc32c`, ...).
    #[serde(rename = "type")]
    pub checksum_type: String,
}

impl Checksum {
    pub fn new(checksum: Option<String>, checksum_type: impl Into<String>) -> Self {
        Self {
            checksum,
            checksum_type: checksum_type.into(),
        }
    }
}

/// Access URL of a Data Object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectUrl {
    pub url: String,
}

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// GA4GH Data Object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    pub id: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub checksums: Vec<Checksum>,

    #[serde(default)]
    pub urls: Vec<ObjectUrl>,

    /// Size in bytes, only known for by-reference objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// GA4GH Data Bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBundle {
    pub id: String,

    pub version: String,

    /// Absent in list responses, which only carry id and version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_object_ids: Option<Vec<String>>,
}

/// Body of `GET /dataobjects/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataObjectResponse {
    pub data_object: DataObject,
}

/// Body of `GET /databundles/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBundleResponse {
    pub data_bundle: DataBundle,
}

/// Body of `GET /databundles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDataBundlesResponse {
    pub data_bundles: Vec<DataBundle>,

    /// Token for the next page; `null` on the last page.
    pub next_page_token: Option<String>,
}

/// File headers returned by `HEAD /files/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DssFileHeaders {
    /// X-DSS-SHA256
    pub sha256: Option<String>,
    /// X-DSS-S3-ETAG
    pub s3_etag: Option<String>,
    /// X-DSS-SHA1
    pub sha1: Option<String>,
    /// X-DSS-CRC32C
    pub crc32c: Option<String>,
    /// X-DSS-VERSION
    pub version: Option<String>,
    /// X-DSS-CONTENT-TYPE
    pub content_type: Option<String>,
    /// X-DSS-BUNDLE-UUID
    pub bundle_uuid: Option<String>,
    /// X-DSS-SIZE
    pub size: Option<u64>,
}

impl DssFileHeaders {
    /// Parse headers from a response.
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };

        Self {
            sha256: get("x-dss-sha256"),
            s3_etag: get("x-dss-s3-etag"),
            sha1: get("x-dss-sha1"),
            crc32c: get("x-dss-crc32c"),
            version: get("x-dss-version"),
            content_type: get("x-dss-content-type"),
            bundle_uuid: get("x-dss-bundle-uuid"),
            size: get("x-dss-size").and_then(|v| v.parse().ok()),
        }
    }
}

/// Reference document served for `fileref` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DssReferenceFile {
    #[serde(rename = "content-type")]
    pub content_type: String,

    pub crc32c: String,

    pub size: u64,

    pub url: Vec<String>,
}

/// `{"bundle": {...}}` envelope of `GET /bundles/{uuid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DssBundleEnvelope {
    pub bundle: DssBundle,
}

/// Bundle as stored in DSS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DssBundle {
    pub uuid: String,

    pub version: String,

    #[serde(default)]
    pub files: Vec<DssBundleFile>,
}

/// File entry inside a DSS bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DssBundleFile {
    pub uuid: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DssSearchResponse {
    #[serde(default)]
    pub results: Vec<DssSearchResult>,
}

/// One search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DssSearchResult {
    /// `{uuid}.{version}`
    pub bundle_fqid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_headers_missing_fields_are_none() {
        let mut headers = HeaderMap::new();
        headers.insert("X-DSS-SHA1", HeaderValue::from_static("05f818a5"));
        headers.insert("X-DSS-SIZE", HeaderValue::from_static("5897"));

        let parsed = DssFileHeaders::from_headers(&headers);
        assert_eq!(parsed.sha1.as_deref(), Some("05f818a5"));
        assert_eq!(parsed.size, Some(5897));
        assert!(parsed.sha256.is_none());
        assert!(parsed.bundle_uuid.is_none());
    }

    #[test]
    fn test_list_bundle_omits_object_ids() {
        let bundle = DataBundle {
            id: "b1".to_string(),
            version: "2018-06-07T001704".to_string(),
            data_object_ids: None,
        };
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "b1", "version": "2018-06-07T001704"})
        );
    }

    #[test]
    fn test_next_page_token_serializes_null() {
        let response = ListDataBundlesResponse {
            data_bundles: vec![],
            next_page_token: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["next_page_token"].is_null());
    }
}
