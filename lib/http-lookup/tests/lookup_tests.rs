//! End-to-end lookup tests against a wiremock server.

use std::time::Duration;

use assert2::{check, let_assert};
use http_lookup::config::keys;
use http_lookup::{JsonDecoder, LookupArg, LookupConfig, LookupOutcome, PollingClient};
use serde::Deserialize;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

#[derive(Debug, PartialEq, Eq, Deserialize)]
struct Item {
    id: u64,
    name: String,
}

fn client(config: &LookupConfig) -> PollingClient<http_lookup::HyperClient, JsonDecoder<Item>> {
    PollingClient::from_config(config, JsonDecoder::new()).expect("valid client")
}

fn config(url: String) -> LookupConfig {
    LookupConfig::builder(url)
        .property(keys::SUCCESS_CODES, "2XX")
        .build()
        .expect("valid config")
}

#[tokio::test]
async fn test_found_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":42,"name":"x"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&config(format!("{}/items?", mock_server.uri())));
    let record = client.pull(&[LookupArg::new("id", "42")]).await;

    check!(
        record
            == Some(Item {
                id: 42,
                name: "x".to_string()
            })
    );
}

#[tokio::test]
async fn test_server_error_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("\"error\""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&config(format!("{}/items?", mock_server.uri())));
    let outcome = client.pull_outcome(&[LookupArg::new("id", "42")]).await;

    let_assert!(LookupOutcome::Rejected { status, body } = outcome);
    check!(status == 500);
    check!(body == "\"error\"");
}

#[tokio::test]
async fn test_blank_body_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("   "))
        .mount(&mock_server)
        .await;

    let client = client(&config(format!("{}/items", mock_server.uri())));

    check!(client.pull(&[LookupArg::new("id", "42")]).await.is_none());
}

#[tokio::test]
async fn test_status_outside_allow_list_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"id":1,"name":"y"}"#))
        .mount(&mock_server)
        .await;

    let client = client(&config(format!("{}/items", mock_server.uri())));
    let outcome = client.pull_outcome(&[LookupArg::new("id", "1")]).await;

    check!(matches!(outcome, LookupOutcome::Rejected { status: 404, .. }));
}

#[tokio::test]
async fn test_path_params_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/7/orders"))
        .and(query_param("user", "7"))
        .and(query_param("state", "open now"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":7,"name":"z"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = LookupConfig::builder(format!("{}/users/{{user}}/orders", mock_server.uri()))
        .header("Authorization", "user:pass")
        .header("X-Tenant", "acme")
        .build()
        .expect("valid config");
    let client = client(&config);

    let record = client
        .pull(&[LookupArg::new("user", "7"), LookupArg::new("state", "open now")])
        .await;

    check!(record.map(|item| item.id) == Some(7));
}

#[tokio::test]
async fn test_raw_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("Authorization", "Token abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"a"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = LookupConfig::builder(format!("{}/items", mock_server.uri()))
        .header("Authorization", "Token abc")
        .property(keys::USE_RAW_AUTH_HEADER, "true")
        .build()
        .expect("valid config");
    let client = client(&config);

    check!(client.pull(&[LookupArg::new("id", "1")]).await.is_some());
}

#[tokio::test]
async fn test_timeout_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id":1,"name":"late"}"#)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = LookupConfig::builder(format!("{}/items", mock_server.uri()))
        .request_timeout(Duration::from_millis(100))
        .build()
        .expect("valid config");
    let client = client(&config);

    let outcome = client.pull_outcome(&[LookupArg::new("id", "1")]).await;

    let_assert!(LookupOutcome::Failed(err) = outcome);
    check!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused_is_none() {
    let config = config("http://127.0.0.1:1/items".to_string());
    let client = client(&config);

    let outcome = client.pull_outcome(&[LookupArg::new("id", "1")]).await;

    let_assert!(LookupOutcome::Failed(err) = outcome);
    check!(err.is_connection());
}

#[tokio::test]
async fn test_decode_failure_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client(&config(format!("{}/items", mock_server.uri())));
    let outcome = client.pull_outcome(&[LookupArg::new("id", "1")]).await;

    check!(outcome.is_failed());
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&config(format!("{}/items", mock_server.uri())));

    check!(client.pull(&[LookupArg::new("id", "1")]).await.is_none());
}

#[tokio::test]
async fn test_retry_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = LookupConfig::builder(format!("{}/items", mock_server.uri()))
        .property(keys::MAX_RETRIES, "2")
        .build()
        .expect("valid config");
    let client = client(&config);

    check!(client.pull(&[LookupArg::new("id", "1")]).await.is_none());
}

#[tokio::test]
async fn test_concurrent_lookups() {
    let mock_server = MockServer::start().await;

    for id in 1..=3 {
        Mock::given(method("GET"))
            .and(query_param("id", id.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"id":{id},"name":"n{id}"}}"#)),
            )
            .mount(&mock_server)
            .await;
    }

    let client = std::sync::Arc::new(client(&config(format!("{}/items", mock_server.uri()))));
    let handles = (1..=3)
        .map(|id| {
            let client = std::sync::Arc::clone(&client);
            tokio::spawn(async move { client.pull(&[LookupArg::new("id", id.to_string())]).await })
        })
        .collect::<Vec<_>>();

    for (expected, handle) in (1..=3).zip(handles) {
        let record = handle.await.expect("join");
        check!(record.map(|item| item.id) == Some(expected));
    }
}
