//! Replica fallback: find extra URLs for an object by asking each replica
//! for the bundle that owns it.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::client::DssClient;
use crate::config::Replica;
use crate::error::DssError;
use crate::mapping::bundle_file_url;

/// What one replica said about the object.
#[derive(Debug)]
pub enum ReplicaOutcome {
    /// The owning bundle lists the object with this URL.
    Found { replica: Replica, url: String },

    /// The bundle was fetched but does not list the object with a URL.
    NotListed { replica: Replica },

    /// The bundle lookup itself failed.
    Failed { replica: Replica, error: DssError },
}

impl ReplicaOutcome {
    pub fn replica(&self) -> Replica {
        match self {
            Self::Found { replica, .. }
            | Self::NotListed { replica }
            | Self::Failed { replica, .. } => *replica,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Found { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Ask every replica for `bundle_uuid` and look for `object_id` in its files.
///
/// Lookups run concurrently; outcomes come back in `replicas` order.
pub async fn resolve_replicas(
    client: &DssClient,
    bundle_uuid: &str,
    object_id: &str,
    replicas: &[Replica],
) -> Vec<ReplicaOutcome> {
    let lookups = replicas.iter().map(|&replica| async move {
        match client.get_bundle(bundle_uuid, replica, None).await {
            Ok(bundle) => match bundle_file_url(&bundle, object_id) {
                Some(url) => ReplicaOutcome::Found {
                    replica,
                    url: url.to_string(),
                },
                None => ReplicaOutcome::NotListed { replica },
            },
            Err(error) => ReplicaOutcome::Failed { replica, error },
        }
    });

    join_all(lookups).await
}

/// URLs of all `Found` outcomes, in order, without deduplication.
///
/// Failed and unlisted replicas are logged and skipped.
pub fn found_urls(outcomes: &[ReplicaOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ReplicaOutcome::Found { url, .. } => Some(url.clone()),
            ReplicaOutcome::NotListed { replica } => {
                debug!(replica = %replica, "object not listed in replica bundle");
                None
            }
            ReplicaOutcome::Failed { replica, error } => {
                warn!(replica = %replica, error = %error, "replica lookup failed");
                None
            }
        })
        .collect()
}
