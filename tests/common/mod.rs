//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::{Match, MockServer, Request};

use grandpad_archiver::api::{Post, User};
use grandpad_archiver::{Config, Credentials, RecordSink, Result, Session, SessionClient};

pub const TOKEN: &str = "tok-123";
pub const EMAIL: &str = "grandkid@example.com";
pub const PASSWORD: &str = "hunter2";

/// Matches a form-encoded request body field.
///
/// `None` as the expected value means the field must be absent.
pub struct FormParam {
    key: String,
    value: Option<String>,
}

pub fn form_param(key: &str, value: &str) -> FormParam {
    FormParam {
        key: key.to_string(),
        value: Some(value.to_string()),
    }
}

pub fn form_param_absent(key: &str) -> FormParam {
    FormParam {
        key: key.to_string(),
        value: None,
    }
}

impl Match for FormParam {
    fn matches(&self, request: &Request) -> bool {
        let found = form_value(request, &self.key);
        found == self.value
    }
}

/// Value of a form field in a recorded request.
pub fn form_value(request: &Request, key: &str) -> Option<String> {
    url::form_urlencoded::parse(&request.body)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Client holding a session for `server`, without going through the password grant.
pub fn session_client(server: &MockServer) -> SessionClient {
    let session = Session::new(&server.uri(), TOKEN, Credentials::new(EMAIL, PASSWORD))
        .expect("valid mock server url");
    SessionClient::from_session(session).expect("http client")
}

/// Feed page with posts `ids` and the given paging cursors.
pub fn feed_page(ids: std::ops::Range<i64>, current: Option<&str>, next: Option<&str>) -> Value {
    let posts: Vec<Value> = ids
        .map(|id| json!({"id": id, "body": format!("post {}", id), "comments": []}))
        .collect();
    feed_page_with_posts(posts, current, next)
}

pub fn feed_page_with_posts(posts: Vec<Value>, current: Option<&str>, next: Option<&str>) -> Value {
    json!({
        "users": [{"id": 1, "first_name": "Grandma"}],
        "posts": posts,
        "paging": {
            "self": {"before": current},
            "next": {"before": next}
        }
    })
}

/// Config pointing at `server`, writing media into `media_folder`.
pub fn test_config(server: &MockServer, media_folder: &Path) -> Config {
    let mut config = Config::default();
    config.api.url = server.uri();
    config.account.email = EMAIL.to_string();
    config.account.password = PASSWORD.to_string();
    config.output.media_folder = media_folder.to_path_buf();
    config.output.show_progress = false;
    config
}

/// Record sink keeping everything in memory.
#[derive(Default)]
pub struct MemorySink {
    pub posts: Mutex<Option<Vec<Post>>>,
    pub users: Mutex<Option<Vec<User>>>,
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn persist_posts(&self, posts: &[Post]) -> Result<()> {
        *self.posts.lock().unwrap() = Some(posts.to_vec());
        Ok(())
    }

    async fn persist_users(&self, users: &[User]) -> Result<()> {
        *self.users.lock().unwrap() = Some(users.to_vec());
        Ok(())
    }
}
