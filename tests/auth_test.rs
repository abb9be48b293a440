//! Integration tests for password authentication.

mod common;

use grandpad_archiver::{Credentials, Error, SessionClient, SyncOrchestrator};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{form_param, test_config, MemorySink, EMAIL, PASSWORD};

#[tokio::test]
async fn password_grant_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/from_password"))
        .and(form_param("email", EMAIL))
        .and(form_param("password", PASSWORD))
        .and(form_param("client", "puma"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "fresh-token"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = SessionClient::authenticate(&server.uri(), Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();

    assert_eq!(client.session().token(), "fresh-token");
    assert_eq!(client.session().credentials().email, EMAIL);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/session/from_password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "t"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/api/v2", server.uri());
    let client = SessionClient::authenticate(&base, Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();

    assert_eq!(
        client.resolve("/feed/recent").unwrap().path(),
        "/api/v2/feed/recent"
    );
}

#[tokio::test]
async fn rejected_credentials_fail_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/from_password"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad password"))
        .mount(&server)
        .await;

    let result = SessionClient::authenticate(&server.uri(), Credentials::new(EMAIL, "wrong")).await;
    assert!(matches!(result, Err(Error::Authentication(_))));
}

#[tokio::test]
async fn response_without_session_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/from_password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/feed/recent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/media/download_redirect"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let orchestrator = SyncOrchestrator::new(test_config(&server, temp.path()), MemorySink::default());

    let err = orchestrator.run().await.unwrap_err();
    assert!(matches!(err, Error::Authentication(_)), "got {:?}", err);
    assert!(orchestrator.sink().posts.lock().unwrap().is_none());
}
