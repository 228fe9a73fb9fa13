use std::time::Duration;

use assert_matches::assert_matches;
use httpmock::Method::{GET, POST};
use mk_mirror::contract::ContractCallRequest;
use mk_mirror::MirrorError;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::StatusCode;
use rstest::rstest;
use serde_json::{json, Value};
use tracing_test::traced_test;

use super::{fast_retry, MirrorMock};
use crate::{ClientConfig, MirrorNodeClient, NetworkTarget, ProviderConfig};

#[rstest]
#[case(400)]
#[case(401)]
#[case(403)]
#[case(405)]
#[case(422)]
#[tokio::test]
async fn test_client_errors_are_terminal(#[case] status: u16) {
    let mock = MirrorMock::start().await;
    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/network/stake");
            then.status(status).body("rejected");
        })
        .await;

    let err = mock.client().get_network_stake().await.unwrap_err();

    assert_matches!(err, MirrorError::Status { status: s, ref body, .. } if s.as_u16() == status && body == "rejected");
    assert_eq!(endpoint.hits_async().await, 1);
}

#[rstest]
#[case(404)]
#[case(429)]
#[case(500)]
#[case(502)]
#[case(503)]
#[tokio::test]
async fn test_transient_errors_use_every_attempt(#[case] status: u16) {
    let mock = MirrorMock::start().await;
    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/network/stake");
            then.status(status);
        })
        .await;

    let err = mock.client().get_network_stake().await.unwrap_err();

    assert_matches!(
        err,
        MirrorError::MaxRetriesReached { attempts: 3, last_status: Some(s), .. } if s.as_u16() == status
    );
    assert_eq!(endpoint.hits_async().await, 3);
}

#[rstest]
#[case::unavailable(503, 3)]
#[case::rate_limited(429, 3)]
#[case::bad_request(400, 1)]
#[case::forbidden(403, 1)]
#[tokio::test]
async fn test_contract_call_follows_the_same_retry_rules(#[case] status: u16, #[case] expected_hits: usize) {
    let mock = MirrorMock::start().await;
    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/contracts/call");
            then.status(status).body("call failed");
        })
        .await;

    let request = ContractCallRequest::new("0x00000000000000000000000000000000000003e9", "0x06fdde03");
    let err = mock.client().read_contract(&request).await.unwrap_err();

    if expected_hits > 1 {
        assert_matches!(
            err,
            MirrorError::MaxRetriesReached { attempts: 3, last_status: Some(s), .. } if s.as_u16() == status
        );
    } else {
        assert_matches!(err, MirrorError::Status { status: s, .. } if s.as_u16() == status);
    }
    assert_eq!(endpoint.hits_async().await, expected_hits);
}

#[tokio::test]
async fn test_transport_errors_are_retried() {
    // Nothing listens on port 1.
    let provider = ProviderConfig::default().with_custom_url("http://127.0.0.1:1");
    let config = ClientConfig::new(NetworkTarget::Mainnet).with_provider(provider).with_retry(fast_retry(2));
    let client = MirrorNodeClient::with_http_client(config, reqwest::Client::new());

    let err = client.get_network_stake().await.unwrap_err();

    assert_matches!(err, MirrorError::MaxRetriesReached { attempts: 2, last_status: None, .. });
}

#[tokio::test]
#[traced_test]
async fn test_recovers_after_transient_failure() {
    let mock = MirrorMock::start().await;
    let config = mock.config().with_retry(
        mk_resilience::RetryPolicy::new(3, Duration::from_millis(300), Duration::from_millis(300), 1.0).unwrap(),
    );
    let client = MirrorNodeClient::with_http_client(config, reqwest::Client::new());

    let mut failing = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/network/supply");
            then.status(503);
        })
        .await;

    let call = tokio::spawn(async move { client.get_network_supply(None).await });

    while failing.hits_async().await == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    failing.delete_async().await;
    let healthy = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/network/supply");
            then.status(200).json_body(json!({"released_supply": "1", "total_supply": "5000000000000000000"}));
        })
        .await;

    let supply = call.await.unwrap().unwrap();
    assert_eq!(supply.total_supply, "5000000000000000000");
    assert_eq!(healthy.hits_async().await, 1);
    assert!(logs_contain("Mirror node request failed, retrying"));
}

#[tokio::test]
async fn test_api_key_and_client_headers_are_sent() {
    let mock = MirrorMock::start().await;
    let provider = mock
        .provider()
        .with_api_key("secret")
        .with_header(HeaderName::from_static("x-team"), HeaderValue::from_static("mirror"));
    let client = MirrorNodeClient::with_http_client(mock.config().with_provider(provider), reqwest::Client::new());

    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/network/stake")
                .header("authorization", "Bearer secret")
                .header("x-api-key", "secret")
                .header("x-team", "mirror");
            then.status(200).json_body(json!({"stake_total": 42}));
        })
        .await;

    let stake = client.get_network_stake().await.unwrap();

    assert_eq!(stake.stake_total, 42);
    endpoint.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_per_call_headers_take_precedence() {
    let mock = MirrorMock::start().await;
    let provider = mock.provider().with_header(HeaderName::from_static("x-team"), HeaderValue::from_static("mirror"));
    let client = MirrorNodeClient::with_http_client(mock.config().with_provider(provider), reqwest::Client::new());

    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/blocks/1").header("x-team", "override");
            then.status(200).json_body(json!({"number": 1}));
        })
        .await;

    let block: Value = client
        .request("blocks/1")
        .await
        .add_header(HeaderName::from_static("x-team"), HeaderValue::from_static("override"))
        .send_get()
        .await
        .unwrap();

    assert_eq!(block["number"], 1);
    endpoint.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_api_key_is_substituted_in_origin() {
    let mock = MirrorMock::start().await;
    let provider = ProviderConfig::default()
        .with_custom_url(format!("{}/<API-KEY>", mock.server.base_url()))
        .with_api_key("abc");
    let client = MirrorNodeClient::with_http_client(mock.config().with_provider(provider), reqwest::Client::new());

    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/abc/api/v1/network/fees");
            then.status(200).json_body(json!({"fees": [{"gas": 100, "transaction_type": "ContractCall"}]}));
        })
        .await;

    let fees = client.get_network_fees(None).await.unwrap();

    assert_eq!(fees.fees[0].gas, 100);
    endpoint.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_undecodable_body_is_not_retried() {
    let mock = MirrorMock::start().await;
    let endpoint = mock
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/network/stake");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = mock.client().get_network_stake().await.unwrap_err();

    assert_matches!(err, MirrorError::DeserializeBody { .. });
    assert_eq!(endpoint.hits_async().await, 1);
}

#[tokio::test]
async fn test_status_text_is_kept_in_message() {
    let mock = MirrorMock::start().await;
    mock.server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/network/stake");
            then.status(401).body("missing credentials");
        })
        .await;

    let err = mock.client().get_network_stake().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.to_string().contains("401 Unauthorized"));
    assert!(err.to_string().contains("missing credentials"));
}
