//! Integration tests for the API transport
//!
//! Runs the client against a mock provisioning API: header injection, URL
//! construction, status classification, raw downloads, and filtered
//! deletes.

use std::sync::Arc;

use anvil_client::api::{ApiClient, ApiClientConfig, ClientError};
use anvil_common::auth::{AccessTokenProvider, AuthError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedTokenProvider {
    token: String,
}

#[async_trait]
impl AccessTokenProvider for FixedTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl AccessTokenProvider for FailingProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        Err(AuthError::MissingCredential)
    }
}

fn client_for(server: &MockServer, auth: Option<Arc<dyn AccessTokenProvider>>) -> ApiClient {
    let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
    ApiClient::new(config, auth).unwrap()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Cluster {
    id: String,
    status: String,
    status_info: String,
}

#[tokio::test]
async fn get_sends_bearer_token_and_decodes_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1"))
        .and(header("Authorization", "Bearer fixture-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Cluster {
            id: "c1".to_string(),
            status: "installing".to_string(),
            status_info: "waiting for bootkube".to_string(),
        }))
        .mount(&server)
        .await;

    let auth = Arc::new(FixedTokenProvider { token: "fixture-token".to_string() });
    let client = client_for(&server, Some(auth));

    let cluster: Cluster = client.get("/clusters/c1").await.unwrap();
    assert_eq!(cluster.id, "c1");
    assert_eq!(cluster.status, "installing");
}

#[tokio::test]
async fn post_serializes_body_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/provision/v1/clusters"))
        .and(header("Content-Type", "application/json"))
        .and(wiremock::matchers::body_json(serde_json::json!({"name": "edge-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(Cluster {
            id: "c2".to_string(),
            status: "pending-for-input".to_string(),
            status_info: String::new(),
        }))
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    let created: Cluster =
        client.post("/clusters", &serde_json::json!({"name": "edge-1"})).await.unwrap();
    assert_eq!(created.id, "c2");
}

#[tokio::test]
async fn missing_auth_provider_sends_unauthenticated_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    let result: serde_json::Value = client.get("/ping").await.unwrap();
    assert!(result.is_object());

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("Authorization").is_none());
}

#[tokio::test]
async fn auth_failure_surfaces_before_any_request() {
    let server = MockServer::start().await;

    let client = client_for(&server, Some(Arc::new(FailingProvider)));

    let err = client.get::<serde_json::Value>("/clusters/c1").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert!(!err.is_transient());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn status_at_least_400_becomes_api_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("cluster not found"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    let not_found = client.get::<Cluster>("/clusters/missing").await.unwrap_err();
    match &not_found {
        ClientError::Api { status, body } => {
            assert_eq!(*status, 404);
            assert_eq!(body, "cluster not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!not_found.is_transient());

    let bad_gateway = client.get::<Cluster>("/clusters/broken").await.unwrap_err();
    assert!(matches!(bad_gateway, ClientError::Api { status: 502, .. }));
    assert!(bad_gateway.is_transient());
}

#[tokio::test]
async fn connection_failure_becomes_transient_transport_error() {
    // Bind-then-drop gives an address nothing is listening on. A pooled
    // server (`MockServer::start`) keeps its listener alive after drop, so
    // build an unpooled one that actually shuts down.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let config = ApiClientConfig { base_url: uri, ..Default::default() };
    let client = ApiClient::new(config, None).unwrap();

    let err = client.get::<serde_json::Value>("/clusters").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn download_raw_returns_undecoded_bytes() {
    let server = MockServer::start().await;

    let kubeconfig = b"apiVersion: v1\nkind: Config\n";
    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1/downloads/kubeconfig"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(kubeconfig.to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    let bytes = client.download_raw("/clusters/c1/downloads/kubeconfig").await.unwrap();
    assert_eq!(bytes, kubeconfig);
}

#[tokio::test]
async fn delete_with_query_carries_filter_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/provision/v1/clusters/c1/manifests"))
        .and(query_param("folder", "openshift"))
        .and(query_param("file_name", "50-workers.yaml"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    client
        .delete_with_query(
            "/clusters/c1/manifests",
            &[("folder", "openshift"), ("file_name", "50-workers.yaml")],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn execute_returns_raw_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": "c1"}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, None);

    let bytes = client.execute(reqwest::Method::GET, "/clusters", None).await.unwrap();
    let decoded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded[0]["id"], "c1");
}
