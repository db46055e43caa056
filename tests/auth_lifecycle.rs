//! Authenticated-request lifecycle tests against a mock backend:
//! bearer attachment, one-shot refresh-and-retry, session clearing.

use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use lms_console::config::{ApiConfig, SessionConfig};
use lms_console::error::AppError;
use lms_console::http::ApiClient;
use lms_console::repository::authors::AuthorsRepository;
use lms_console::session::{MemoryStorage, SessionStore, StorageBackend};

fn setup(base_url: &str) -> (ApiClient, Arc<SessionStore>) {
    let session = Arc::new(SessionStore::in_memory(&SessionConfig::default()));
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2000,
    };
    let client = ApiClient::new(&config, session.clone()).expect("client should build");
    (client, session)
}

#[tokio::test]
async fn bearer_token_attached_when_present() {
    let mut server = mockito::Server::new_async().await;
    let (client, session) = setup(&server.url());
    session.save_tokens("A1", "R1");

    let mock = server
        .mock("GET", "/api/authors")
        .match_header("authorization", "Bearer A1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let repository = AuthorsRepository::new(client);
    let authors = repository.get_all().await.expect("request should succeed");
    assert!(authors.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn request_goes_out_unauthenticated_without_token() {
    let mut server = mockito::Server::new_async().await;
    let (client, _session) = setup(&server.url());

    let mock = server
        .mock("GET", "/api/authors")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let repository = AuthorsRepository::new(client);
    repository.get_all().await.expect("request should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    let mut server = mockito::Server::new_async().await;
    let (client, session) = setup(&server.url());
    session.save_tokens("A1", "R1");

    let expired = server
        .mock("GET", "/api/authors")
        .match_header("authorization", "Bearer A1")
        .with_status(401)
        .with_body(r#"{"detail":"Token expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/token/refresh")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "refreshToken": "R1" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken":"A2"}"#)
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/api/authors")
        .match_header("authorization", "Bearer A2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"AuthorID":1,"Name":"Ursula K. Le Guin","Bio":"Novelist"}]"#)
        .expect(1)
        .create_async()
        .await;

    let repository = AuthorsRepository::new(client);
    let authors = repository.get_all().await.expect("retry should succeed");
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Ursula K. Le Guin");

    // New access token persisted, refresh token not rotated.
    assert_eq!(session.access_token().as_deref(), Some("A2"));
    assert_eq!(session.refresh_token().as_deref(), Some("R1"));

    expired.assert_async().await;
    refresh.assert_async().await;
    retried.assert_async().await;
}

#[tokio::test]
async fn failed_refresh_clears_session_and_propagates_the_401() {
    let mut server = mockito::Server::new_async().await;
    let (client, session) = setup(&server.url());
    session.save_tokens("A1", "R1");

    let expired = server
        .mock("GET", "/api/authors")
        .with_status(401)
        .with_body(r#"{"detail":"Token expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/token/refresh")
        .with_status(401)
        .with_body(r#"{"detail":"Refresh token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let repository = AuthorsRepository::new(client);
    let err = repository.get_all().await.expect_err("call should fail");
    assert_eq!(err.status(), Some(401));

    // Both tokens gone: the next guard check routes back to login.
    assert_eq!(session.access_token(), None);
    assert_eq!(session.refresh_token(), None);
    assert!(!session.is_authenticated());

    // expect(1) on the first mock proves the request was not retried.
    expired.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn second_401_does_not_trigger_a_second_refresh() {
    let mut server = mockito::Server::new_async().await;
    let (client, session) = setup(&server.url());
    session.save_tokens("A1", "R1");

    let expired = server
        .mock("GET", "/api/authors")
        .match_header("authorization", "Bearer A1")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/token/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken":"A2"}"#)
        .expect(1)
        .create_async()
        .await;
    let still_rejected = server
        .mock("GET", "/api/authors")
        .match_header("authorization", "Bearer A2")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let repository = AuthorsRepository::new(client);
    let err = repository.get_all().await.expect_err("call should fail");
    assert_eq!(err.status(), Some(401));

    assert!(!session.is_authenticated());
    expired.assert_async().await;
    refresh.assert_async().await;
    still_rejected.assert_async().await;
}

#[tokio::test]
async fn missing_refresh_token_fails_without_calling_the_refresh_endpoint() {
    let mut server = mockito::Server::new_async().await;

    // An access token with no refresh counterpart, as after a partial
    // storage loss.
    let backend = MemoryStorage::new();
    backend.write("access_token", "A1").expect("memory write");
    let session = Arc::new(SessionStore::new(
        Box::new(backend),
        &SessionConfig::default(),
    ));
    let config = ApiConfig {
        base_url: server.url(),
        timeout_ms: 2000,
    };
    let client = ApiClient::new(&config, session.clone()).expect("client should build");

    let expired = server
        .mock("GET", "/api/authors")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/token/refresh")
        .expect(0)
        .create_async()
        .await;

    let repository = AuthorsRepository::new(client);
    let err = repository.get_all().await.expect_err("call should fail");
    assert_eq!(err.status(), Some(401));
    assert!(!session.is_authenticated());

    expired.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn connection_failure_normalizes_to_a_network_error() {
    // Nothing listens on the discard port.
    let (client, session) = setup("http://127.0.0.1:9");
    session.save_tokens("A1", "R1");

    let repository = AuthorsRepository::new(client);
    let err = repository.get_all().await.expect_err("call should fail");
    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(err.to_string(), "No response received from the server");
}
