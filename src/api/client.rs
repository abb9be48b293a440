//! GrandPad API HTTP client.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::api::types::SessionResponse;
use crate::error::{Error, Result};

/// Form field carrying the session token on every authenticated call.
pub const SESSION_PARAM: &str = "session";

/// Client name announced during the password grant.
pub const DEFAULT_CLIENT_NAME: &str = "puma";

/// Password grant endpoint, relative to the API base URL.
const AUTH_PATH: &str = "session/from_password";

/// Form parameters of an API call.
pub type Params = BTreeMap<String, String>;

/// Account credentials exchanged for a session token.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub client: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            client: DEFAULT_CLIENT_NAME.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("client", &self.client)
            .finish()
    }
}

/// An authenticated API session.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: Url,
    token: String,
    credentials: Credentials,
}

impl Session {
    pub fn new(base_url: &str, token: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token: token.into(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// HTTP client bound to one authenticated session.
///
/// The token is written once by [`SessionClient::authenticate`] and only read
/// afterwards. Expired or revoked tokens are not refreshed.
pub struct SessionClient {
    client: Client,
    session: Session,
}

impl SessionClient {
    /// Exchange email and password for a session token.
    pub async fn authenticate(base_url: &str, credentials: Credentials) -> Result<Self> {
        let base = normalize_base_url(base_url)?;
        let client = build_http_client()?;
        let url = base.join(AUTH_PATH)?;

        tracing::debug!("POST {} as {}", url, credentials.email);

        let form = [
            ("email", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
            ("client", credentials.client.as_str()),
        ];
        let response = client.post(url).form(&form).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "HTTP {}: {}",
                status,
                if body.is_empty() {
                    "Authentication failed"
                } else {
                    body.as_str()
                }
            )));
        }

        let token = parse_session_token(&body)?;
        tracing::info!("Authenticated as {}", credentials.email);

        Ok(Self {
            client,
            session: Session {
                base_url: base,
                token,
                credentials,
            },
        })
    }

    /// Wrap an already established session.
    pub fn from_session(session: Session) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve a resource path such as `/feed/recent` against the base URL.
    pub fn resolve(&self, resource_path: &str) -> Result<Url> {
        Ok(self.session.base_url.join(resource_path.trim_matches('/'))?)
    }

    /// Make an authenticated call.
    ///
    /// The session token always replaces any caller supplied `session` value.
    /// Only network failures are reported here; interpreting the status is up
    /// to the caller.
    pub async fn call(&self, resource_path: &str, mut params: Params) -> Result<Response> {
        let url = self.resolve(resource_path)?;
        params.insert(SESSION_PARAM.to_string(), self.session.token.clone());

        tracing::debug!("POST {}", url);

        let response = self.client.post(url).form(&params).send().await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }
}

fn build_http_client() -> Result<Client> {
    Ok(Client::builder()
        .cookie_store(true)
        .user_agent(concat!("grandpad-archiver/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Parse the base URL and make sure it ends with `/` so that joined resource
/// paths extend it instead of replacing its last segment.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_session_token(body: &str) -> Result<String> {
    let response: SessionResponse = serde_json::from_str(body).map_err(|e| {
        Error::Authentication(format!("Unreadable session response: {} - {}", e, body))
    })?;

    match response.session {
        Some(Value::String(token)) if !token.is_empty() => Ok(token),
        Some(Value::Number(token)) => Ok(token.to_string()),
        _ => Err(Error::Authentication(
            "Response did not contain a session token".into(),
        )),
    }
}
