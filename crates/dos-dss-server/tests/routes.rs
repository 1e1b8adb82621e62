//! Route tests: the router is driven in-process against a wiremock DSS.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use dos_dss_core::{DosService, DssClient, DssConfig};
use dos_dss_server::{router, AppState, DEFAULT_BASE_PATH};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_app(mock_server: &MockServer) -> Router {
    let config = DssConfig::default().with_url(mock_server.uri());
    let service = DosService::new(DssClient::new(config).expect("failed to create client"));
    router(AppState {
        service,
        base_path: DEFAULT_BASE_PATH.to_string(),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).expect("body is not JSON"))
}

#[tokio::test]
async fn test_get_data_object_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/files/obj-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-dss-sha256", "aa")
                .insert_header("x-dss-version", "v1")
                .insert_header("x-dss-content-type", "text/plain"),
        )
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/dataobjects/obj-1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let object = &json["data_object"];
    assert_eq!(object["id"], "obj-1");
    assert_eq!(object["version"], "v1");
    assert_eq!(object["content_type"], "text/plain");
    let checksums = object["checksums"].as_array().unwrap();
    assert_eq!(checksums.len(), 4);
    assert_eq!(checksums[0], serde_json::json!({"checksum": "aa", "type": "sha256"}));
    assert_eq!(checksums[1], serde_json::json!({"checksum": null, "type": "etag"}));
    assert_eq!(object["urls"].as_array().unwrap().len(), 3);
    assert!(object.get("size").is_none());
}

#[tokio::test]
async fn test_object_alias_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/files/obj-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(create_app(&mock_server), "/ga4gh/dos/v1/objects/obj-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_object"]["id"], "obj-1");
}

#[tokio::test]
async fn test_get_data_object_not_found_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/files/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/dataobjects/missing",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["msg"],
        "Data Object with data_object_id missing was not found."
    );
}

#[tokio::test]
async fn test_list_data_objects_not_allowed() {
    let mock_server = MockServer::start().await;

    let (status, body) = get(create_app(&mock_server), "/ga4gh/dos/v1/dataobjects").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_data_bundles_route_defaults_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"bundle_fqid": "b1.2018-06-07T001704"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(create_app(&mock_server), "/ga4gh/dos/v1/databundles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({
            "data_bundles": [{"id": "b1", "version": "2018-06-07T001704"}],
            "next_page_token": null
        })
    );
}

#[tokio::test]
async fn test_list_data_bundles_route_paging() {
    let mock_server = MockServer::start().await;
    let link = format!(
        "<{}/search?replica=aws&per_page=2&search_after=cursor-3>; rel=\"next\"",
        mock_server.uri()
    );

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(query_param("per_page", "2"))
        .and(query_param("search_after", "cursor-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", link.as_str())
                .set_body_json(serde_json::json!({
                    "results": [{"bundle_fqid": "b2.v1"}, {"bundle_fqid": "b3.v1"}]
                })),
        )
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/bundles?page_size=2&page_token=cursor-1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_bundles"].as_array().unwrap().len(), 2);
    assert_eq!(json["next_page_token"], "cursor-3");
}

#[tokio::test]
async fn test_get_data_bundle_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bundles/b1"))
        .and(query_param("version", "v9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "bundle": {"uuid": "b1", "version": "v9", "files": [{"uuid": "f1"}, {"uuid": "f2"}]}
        })))
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/databundles/b1?version=v9",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({
            "data_bundle": {"id": "b1", "version": "v9", "data_object_ids": ["f1", "f2"]}
        })
    );
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bundles/b1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(create_app(&mock_server), "/ga4gh/dos/v1/databundles/b1").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["msg"].as_str().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_index_page() {
    let mock_server = MockServer::start().await;

    let (status, body) = get(create_app(&mock_server), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("/ga4gh/dos/v1/"));
}

#[tokio::test]
async fn test_unparseable_page_size_is_json_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/databundles?page_size=abc",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["msg"].as_str().unwrap().contains("page_size"));
}

#[tokio::test]
async fn test_zero_page_size_is_rejected_before_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/databundles?page_size=0",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["msg"], "page_size must be a positive integer");
}

#[tokio::test]
async fn test_encoded_object_id_reaches_upstream_as_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/files/victim%3Freplica=gcp"))
        .and(query_param("replica", "aws"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, json) = get_json(
        create_app(&mock_server),
        "/ga4gh/dos/v1/dataobjects/victim%3Freplica=gcp",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["msg"],
        "Data Object with data_object_id victim?replica=gcp was not found."
    );
}
