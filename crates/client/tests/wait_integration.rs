//! End-to-end wait scenarios: poll engine driving the transport
//!
//! Mirrors how resource logic uses the core: the refresh closure fetches
//! the entity over the API client and the engine owns the waiting.

use std::sync::Arc;
use std::time::Duration;

use anvil_client::api::{ApiClient, ApiClientConfig};
use anvil_client::poll::{wait_for_count, wait_for_state, CountPollConfig, Observation, PollConfig};
use anvil_client::validations::ValidationSet;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Cluster {
    status: String,
    status_info: String,
    #[serde(default)]
    validations_info: String,
}

#[derive(Debug, Deserialize)]
struct Host {
    #[allow(dead_code)]
    id: String,
}

fn client_for(server: &MockServer) -> Arc<ApiClient> {
    let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
    Arc::new(ApiClient::new(config, None).unwrap())
}

fn cluster_body(status: &str, info: &str) -> serde_json::Value {
    serde_json::json!({
        "status": status,
        "status_info": info,
        "validations_info": ""
    })
}

#[tokio::test]
async fn install_wait_follows_status_transitions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(cluster_body("installing", "bootstrapping")),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(cluster_body("installed", "cluster is up")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let config = PollConfig::new(
        ["installing", "finalizing"],
        ["installed"],
        Duration::from_millis(10),
        Duration::from_secs(5),
    )
    .unwrap();

    let cancel = CancellationToken::new();
    let refresh = || {
        let client = Arc::clone(&client);
        async move {
            let cluster: Cluster = client.get("/clusters/c1").await?;
            Ok(Observation::new(cluster.status, cluster.status_info))
        }
    };

    let observed = wait_for_state(&config, &cancel, refresh).await.unwrap();
    assert_eq!(observed.state, "installed");
    assert_eq!(observed.info, "cluster is up");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn install_wait_fails_fast_on_error_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(cluster_body("error", "host failed to boot")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let config = PollConfig::new(
        ["installing"],
        ["installed"],
        Duration::from_millis(10),
        Duration::from_secs(30),
    )
    .unwrap();

    let cancel = CancellationToken::new();
    let refresh = || {
        let client = Arc::clone(&client);
        async move {
            let cluster: Cluster = client.get("/clusters/c1").await?;
            Ok(Observation::new(cluster.status, cluster.status_info))
        }
    };

    let err = wait_for_state(&config, &cancel, refresh).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("error"));
    assert!(message.contains("host failed to boot"));
}

#[tokio::test]
async fn host_discovery_waits_for_expected_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1/hosts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": "h1"}])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "h1"}, {"id": "h2"}, {"id": "h3"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let config = CountPollConfig {
        expected: 3,
        interval: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
    };

    let cancel = CancellationToken::new();
    let refresh = || {
        let client = Arc::clone(&client);
        async move {
            let hosts: Vec<Host> = client.get("/clusters/c1/hosts").await?;
            Ok(hosts.len())
        }
    };

    let count = wait_for_count(&config, &cancel, refresh).await.unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn validations_fetched_over_the_wire_gate_readiness() {
    let server = MockServer::start().await;

    let validations = serde_json::json!({
        "network": [
            {"id": "machine-cidr-defined", "status": "success", "message": "defined"},
            {"id": "ntp-synced", "status": "failure", "message": "clock skew"}
        ],
        "cluster": [
            {"id": "sufficient-masters-count", "status": "failure", "message": "need 3 masters"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/provision/v1/clusters/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "pending-for-input",
            "status_info": "waiting for validations",
            "validations_info": validations.to_string()
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cluster: Cluster = client.get("/clusters/c1").await.unwrap();

    let set = ValidationSet::from_json(&cluster.validations_info, None).unwrap();
    assert_eq!(set.len(), 3);

    // sufficient-masters-count is blocking per the registry; ntp-synced is
    // not. The blocking failure keeps the cluster gated.
    assert!(!set.is_ready());

    let blocking: Vec<&str> =
        set.blocking_failures().map(|record| record.id.as_str()).collect();
    assert_eq!(blocking, vec!["sufficient-masters-count"]);
}
