//! Request execution and status mapping for the DOS service.

use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::error::{BagError, BagResult};

const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: Url,
}

impl HttpBackend {
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
    ) -> BagResult<reqwest::Response> {
        debug!(method = %method, url = %url, "dos request");

        let response = self.client.request(method, url).query(query).send().await?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => Ok(response),

            404 => Err(BagError::NotFound {
                url: url.to_string(),
            }),

            _ => {
                let message = response
                    .text()
                    .await
                    .map(|t| t.chars().take(MAX_ERROR_BODY).collect::<String>())
                    .unwrap_or_else(|_| status.to_string());
                Err(BagError::Network {
                    message: format!("HTTP {}: {}", status.as_u16(), message),
                })
            }
        }
    }

    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> BagResult<T> {
        let response = self.request(Method::GET, url, query).await?;
        response
            .json()
            .await
            .map_err(|e| BagError::InvalidResponse {
                message: format!("failed to parse {}: {}", what, e),
            })
    }
}
