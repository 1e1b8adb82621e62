//! Client for the Data Object Service endpoints the manifest builder reads.

use std::time::Duration;

use dos_dss_core::types::DssFileHeaders;
use dos_dss_core::{DataBundle, DataBundleResponse, DataObject, DataObjectResponse};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, USER_AGENT};
use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::config::BagClientConfig;
use crate::error::{BagError, BagResult};

mod http;

use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("dos-bag/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct DosClient {
    http: HttpBackend,
    config: BagClientConfig,
}

impl DosClient {
    pub fn new(config: BagClientConfig) -> BagResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| BagError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let dos_url = config.dos_url();
        let base_url = Url::parse(&dos_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(BagError::InvalidServiceUrl { url: dos_url })?;

        Ok(Self {
            http: HttpBackend { client, base_url },
            config,
        })
    }

    pub fn config(&self) -> &BagClientConfig {
        &self.config
    }

    /// `{dos_url}/{collection}/{id}` with the id as one encoded path segment.
    fn record_url(&self, collection: &str, id: &str) -> BagResult<String> {
        if matches!(id, "" | "." | "..") {
            return Err(BagError::InvalidRecordId { id: id.to_string() });
        }

        let mut url = self.http.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection).push(id);
        }
        Ok(url.into())
    }

    /// Canonical DOS URL of a data object; used as the manifest entry URL.
    pub fn data_object_url(&self, object_id: &str) -> BagResult<String> {
        self.record_url("dataobjects", object_id)
    }

    pub async fn get_data_bundle(&self, id: &str, version: Option<&str>) -> BagResult<DataBundle> {
        let url = self.record_url("databundles", id)?;
        let query: Vec<(&str, String)> = version
            .map(|v| vec![("version", v.to_string())])
            .unwrap_or_default();

        let response: DataBundleResponse = self.http.get_json(&url, &query, "data bundle").await?;
        Ok(response.data_bundle)
    }

    pub async fn get_data_object(&self, id: &str) -> BagResult<DataObject> {
        let url = self.data_object_url(id)?;
        let response: DataObjectResponse = self.http.get_json(&url, &[], "data object").await?;
        Ok(response.data_object)
    }

    /// `HEAD` an object URL and read its size from `X-DSS-SIZE`, falling
    /// back to `Content-Length`.
    pub async fn probe_size(&self, url: &str) -> BagResult<Option<u64>> {
        debug!(url = %url, "probing size");
        let response = self.http.request(Method::HEAD, url, &[]).await?;
        let headers = response.headers();

        let size = DssFileHeaders::from_headers(headers).size.or_else(|| {
            headers
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok())
        });
        Ok(size)
    }
}
