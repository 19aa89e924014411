//! Integration tests for the status client's bounded retry behavior.

use blubar_client::{ClientError, StatusClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_BODY: &str = r#"<status etag="1">
    <artist>Nina Simone</artist>
    <name>Feeling Good</name>
    <state>play</state>
    <volume>30</volume>
</status>"#;

#[tokio::test]
async fn test_fetch_status_parses_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_BODY))
        .mount(&server)
        .await;

    let status = StatusClient::new(server.uri()).fetch_status().await.unwrap();

    assert_eq!(status.state, "play");
    assert_eq!(status.artist.as_deref(), Some("Nina Simone"));
    assert_eq!(status.summary(), "play: Nina Simone - Feeling Good");
}

#[tokio::test]
async fn test_fetch_recovers_from_transient_errors() {
    let server = MockServer::start().await;

    // First two attempts see a 500, the third succeeds.
    Mock::given(method("GET"))
        .and(path("/Status"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_BODY))
        .mount(&server)
        .await;

    let status = StatusClient::new(server.uri()).fetch_status().await.unwrap();

    assert_eq!(status.state, "play");
}

#[tokio::test]
async fn test_fetch_gives_up_after_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Status"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = StatusClient::new(server.uri()).fetch_status().await.unwrap_err();

    match err {
        ClientError::Fetch { attempts, reason, .. } => {
            assert_eq!(attempts, 3);
            assert!(reason.contains("500"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
