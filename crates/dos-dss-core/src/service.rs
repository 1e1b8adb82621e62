//! Data Object Service operations backed by DSS.

use tracing::{debug, info};

use crate::client::DssClient;
use crate::error::{DssError, DssResult, RecordKind};
use crate::mapping;
use crate::pagination::{next_token_from_link_header, PageRequest};
use crate::replica::{found_urls, resolve_replicas};
use crate::types::{DataBundle, DataObject, ListDataBundlesResponse, ObjectUrl};

/// Translates DOS requests into DSS calls.
#[derive(Debug, Clone)]
pub struct DosService {
    client: DssClient,
}

impl DosService {
    pub fn new(client: DssClient) -> Self {
        Self { client }
    }

    /// Look up a Data Object.
    ///
    /// By-reference objects are rebuilt from their reference document; any
    /// failure there is reported as not found with the cause appended. Other
    /// objects get one extra URL per replica whose copy of the owning bundle
    /// lists them.
    pub async fn get_data_object(&self, object_id: &str) -> DssResult<DataObject> {
        let config = self.client.config();

        let headers = self
            .client
            .head_file(object_id, config.primary_replica)
            .await
            .map_err(|e| match e {
                DssError::NotFound { .. } => DssError::NotFound {
                    kind: RecordKind::DataObject,
                    id: object_id.to_string(),
                },
                other => other,
            })?;

        let object =
            mapping::dss_file_to_dos(object_id, &headers, self.client.base_url(), &config.replicas);

        if mapping::is_reference(&object) {
            debug!(object_id, "enriching by-reference object");
            let reference = self
                .client
                .get_file_reference(object_id, config.primary_replica)
                .await
                .map_err(|e| DssError::Reference {
                    id: object_id.to_string(),
                    message: e.to_string(),
                })?;
            return Ok(mapping::apply_reference(object, reference));
        }

        let Some(bundle_uuid) = headers.bundle_uuid.as_deref() else {
            debug!(object_id, "no owning bundle reported; skipping replica fallback");
            return Ok(object);
        };

        let outcomes =
            resolve_replicas(&self.client, bundle_uuid, object_id, &config.replicas).await;
        let mut object = object;
        object
            .urls
            .extend(found_urls(&outcomes).into_iter().map(ObjectUrl::new));

        Ok(object)
    }

    /// List Data Bundles, one page at a time.
    pub async fn list_data_bundles(
        &self,
        page: &PageRequest,
    ) -> DssResult<ListDataBundlesResponse> {
        let page_result = self
            .client
            .search_bundles(self.client.config().primary_replica, page)
            .await?;

        let next_page_token = next_token_from_link_header(page_result.link.as_deref());

        let data_bundles = page_result
            .results
            .iter()
            .map(mapping::dss_list_bundle_to_dos)
            .collect::<DssResult<Vec<_>>>()?;

        info!(
            count = data_bundles.len(),
            has_next = next_page_token.is_some(),
            "listed data bundles"
        );

        Ok(ListDataBundlesResponse {
            data_bundles,
            next_page_token,
        })
    }

    /// Look up a Data Bundle, optionally at a given version.
    pub async fn get_data_bundle(
        &self,
        bundle_id: &str,
        version: Option<&str>,
    ) -> DssResult<DataBundle> {
        let bundle = self
            .client
            .get_bundle(bundle_id, self.client.config().primary_replica, version)
            .await?;
        Ok(mapping::dss_bundle_to_dos(bundle))
    }

    /// Page size used when a caller sends none.
    pub fn default_page_size(&self) -> u32 {
        self.client.config().default_page_size
    }
}
