//! DSS client for the storage-side lookups the proxy needs.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, LINK, USER_AGENT};
use reqwest::Method;
use tracing::debug;

use crate::config::{DssConfig, Replica};
use crate::error::{DssError, DssResult, RecordKind};
use crate::pagination::PageRequest;
use crate::types::{
    DssBundle, DssBundleEnvelope, DssFileHeaders, DssReferenceFile, DssSearchResponse,
    DssSearchResult,
};

mod helpers;
mod http;

use helpers::record_url;
use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("dos-dss/", env!("CARGO_PKG_VERSION"));

/// One page of bundle search results plus the raw `Link` header.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub results: Vec<DssSearchResult>,
    pub link: Option<String>,
}

/// Client for the DSS REST API.
#[derive(Debug, Clone)]
pub struct DssClient {
    http: HttpBackend,
    config: DssConfig,
}

impl DssClient {
    pub fn new(config: DssConfig) -> DssResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| DssError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.url.trim_end_matches('/').to_string();

        Ok(Self {
            http: HttpBackend { client, base_url },
            config,
        })
    }

    pub fn from_env() -> DssResult<Self> {
        Self::new(DssConfig::from_env())
    }

    /// `HEAD /files/{uuid}`: file metadata as headers.
    pub async fn head_file(&self, uuid: &str, replica: Replica) -> DssResult<DssFileHeaders> {
        let url = self.file_url(uuid)?;
        debug!(url = %url, replica = %replica, "fetching file headers");

        let response = self
            .http
            .request(
                Method::HEAD,
                &url,
                &[("replica", replica.to_string())],
                None,
                Some((RecordKind::DataObject, uuid)),
            )
            .await?;

        Ok(DssFileHeaders::from_headers(response.headers()))
    }

    /// `GET /files/{uuid}` for a by-reference file: the reference document.
    pub async fn get_file_reference(
        &self,
        uuid: &str,
        replica: Replica,
    ) -> DssResult<DssReferenceFile> {
        let url = self.file_url(uuid)?;
        debug!(url = %url, replica = %replica, "fetching file reference");

        self.http
            .request_json(
                Method::GET,
                &url,
                &[("replica", replica.to_string())],
                Some((RecordKind::DataObject, uuid)),
                "file reference",
            )
            .await
    }

    /// `GET /bundles/{uuid}`, optionally pinned to a version.
    pub async fn get_bundle(
        &self,
        uuid: &str,
        replica: Replica,
        version: Option<&str>,
    ) -> DssResult<DssBundle> {
        let url = record_url(&self.http.base_url, RecordKind::DataBundle, uuid)?;
        debug!(url = %url, replica = %replica, version = ?version, "fetching bundle");

        let mut query = vec![("replica", replica.to_string())];
        if let Some(version) = version {
            query.push(("version", version.to_string()));
        }

        let envelope: DssBundleEnvelope = self
            .http
            .request_json(
                Method::GET,
                &url,
                &query,
                Some((RecordKind::DataBundle, uuid)),
                "bundle",
            )
            .await?;
        Ok(envelope.bundle)
    }

    /// `POST /search` with an empty query, one page at a time.
    pub async fn search_bundles(
        &self,
        replica: Replica,
        page: &PageRequest,
    ) -> DssResult<SearchPage> {
        let url = format!("{}/search", self.http.base_url);
        debug!(
            url = %url,
            page_size = page.page_size,
            token = ?page.page_token,
            "searching bundles"
        );

        let mut query = vec![("replica", replica.to_string())];
        query.extend(page.upstream_query());

        let body = serde_json::json!({ "es_query": {} });
        let response = self
            .http
            .request(Method::POST, &url, &query, Some(&body), None)
            .await?;

        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let search: DssSearchResponse =
            response
                .json()
                .await
                .map_err(|e| DssError::InvalidResponse {
                    message: format!("failed to parse search response: {}", e),
                })?;

        Ok(SearchPage {
            results: search.results,
            link,
        })
    }

    fn file_url(&self, uuid: &str) -> DssResult<String> {
        record_url(&self.http.base_url, RecordKind::DataObject, uuid)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn config(&self) -> &DssConfig {
        &self.config
    }
}
