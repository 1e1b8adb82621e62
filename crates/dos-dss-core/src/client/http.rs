//! HTTP layer: request execution and status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use reqwest::Method;
use tracing::debug;

use crate::error::{DssError, DssResult, RecordKind};

use super::helpers::truncate_body;

/// The record a request is for; a 404 on it becomes `NotFound`.
pub(crate) type Record<'a> = Option<(RecordKind, &'a str)>;

/// HTTP backend for making requests (holds reqwest client and base URL).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
}

impl HttpBackend {
    /// Make a single request. No retries: callers degrade instead.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        record: Record<'_>,
    ) -> DssResult<reqwest::Response> {
        debug!(method = %method, url = %url, "dss request");

        let mut request = self.client.request(method, url).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => Ok(response),

            404 => match record {
                Some((kind, id)) => Err(DssError::NotFound {
                    kind,
                    id: id.to_string(),
                }),
                None => Err(DssError::Network {
                    message: format!("HTTP 404: {}", url),
                }),
            },

            _ => {
                let message = response
                    .text()
                    .await
                    .map(|t| truncate_body(&t))
                    .unwrap_or_else(|_| status.to_string());
                Err(DssError::Network {
                    message: format!("HTTP {}: {}", status.as_u16(), message),
                })
            }
        }
    }

    /// Make a request and decode the JSON body.
    pub(crate) async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        record: Record<'_>,
        what: &str,
    ) -> DssResult<T> {
        let response = self.request(method, url, query, None, record).await?;
        response
            .json()
            .await
            .map_err(|e| DssError::InvalidResponse {
                message: format!("failed to parse {}: {}", what, e),
            })
    }
}
