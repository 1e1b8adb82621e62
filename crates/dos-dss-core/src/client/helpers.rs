//! Pure helpers: URL building (no HTTP, no status logic).

use url::Url;

use crate::error::{DssError, DssResult, RecordKind};

/// DSS collection a record kind lives under.
fn collection(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::DataObject => "files",
        RecordKind::DataBundle => "bundles",
    }
}

/// `{base_url}/files/{id}` or `{base_url}/bundles/{id}`.
///
/// The id is pushed as a single percent-encoded path segment, so `?`, `#`
/// and `/` inside it cannot reach the upstream query or other paths. Empty
/// and dot-segment ids name no record.
pub(crate) fn record_url(base_url: &str, kind: RecordKind, id: &str) -> DssResult<String> {
    if matches!(id, "" | "." | "..") {
        return Err(DssError::NotFound {
            kind,
            id: id.to_string(),
        });
    }

    let mut url = Url::parse(base_url).map_err(|e| DssError::Config {
        message: format!("invalid DSS url {}: {}", base_url, e),
    })?;
    url.path_segments_mut()
        .map_err(|_| DssError::Config {
            message: format!("DSS url cannot carry a path: {}", base_url),
        })?
        .pop_if_empty()
        .push(collection(kind))
        .push(id);

    Ok(url.into())
}

/// First 200 characters of an error body, for messages.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_url_plain_id() {
        let url = record_url(
            "https://dss.test/v1",
            RecordKind::DataObject,
            "8ff23235-4435-4929-8fb2-5d55b4564999",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://dss.test/v1/files/8ff23235-4435-4929-8fb2-5d55b4564999"
        );
    }

    #[test]
    fn test_record_url_encodes_reserved_characters() {
        let url = record_url("https://dss.test/v1", RecordKind::DataObject, "a?replica=gcp")
            .unwrap();
        assert_eq!(url, "https://dss.test/v1/files/a%3Freplica=gcp");

        let url = record_url("https://dss.test/v1", RecordKind::DataBundle, "../search").unwrap();
        assert_eq!(url, "https://dss.test/v1/bundles/..%2Fsearch");

        let url = record_url("https://dss.test/v1", RecordKind::DataBundle, "b#1").unwrap();
        assert_eq!(url, "https://dss.test/v1/bundles/b%231");
    }

    #[test]
    fn test_record_url_trailing_slash_base() {
        let url = record_url("https://dss.test/v1/", RecordKind::DataBundle, "b1").unwrap();
        assert_eq!(url, "https://dss.test/v1/bundles/b1");
    }

    #[test]
    fn test_record_url_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            assert!(matches!(
                record_url("https://dss.test/v1", RecordKind::DataObject, id),
                Err(DssError::NotFound {
                    kind: RecordKind::DataObject,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_record_url_invalid_base() {
        assert!(matches!(
            record_url("not a url", RecordKind::DataObject, "a"),
            Err(DssError::Config { .. })
        ));
    }
}
