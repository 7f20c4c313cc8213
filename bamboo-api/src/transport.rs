//! HTTP transport used by the project and plan accessors
//!
//! The accessors only ever talk to a [`Transport`]: build a request against
//! the configured base URL, tweak its query string, execute it. Anything that
//! can do that (the reqwest-backed [`HttpTransport`], or a canned transport in
//! tests) can drive the whole API surface.

use async_trait::async_trait;
use bamboo_core::{Config, Credentials, Secrets};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{Error, Result};

/// Path of the REST API relative to the server root
const API_PREFIX: &str = "rest/api/latest/";

/// A request that has been resolved against the base URL but not sent yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL, including the query string
    pub url: Url,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url }
    }

    /// Add a query pair, keeping any existing pairs with the same key
    pub fn append_query(&mut self, key: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(key, value);
    }

    /// Replace all query pairs named `key` with a single pair
    pub fn set_query(&mut self, key: &str, value: &str) {
        let retained: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        self.url
            .query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(key, value);
    }

    /// First value of the query parameter `key`
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Path relative to the REST prefix, e.g. `plan/ABC-DEF/enable`
    pub fn api_path(&self) -> &str {
        let path = self.url.path();
        match path.find(API_PREFIX) {
            Some(idx) => &path[idx + API_PREFIX.len()..],
            None => path.trim_start_matches('/'),
        }
    }
}

/// A fully-read response from the server
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    reason: Option<String>,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    /// Attach the reason phrase from the server's status line
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status line text, e.g. `404 Not Found`
    ///
    /// Uses the server's reason phrase when the transport captured one,
    /// else the canonical reason; unknown codes without either are bare.
    pub fn status_text(&self) -> String {
        let reason = self
            .reason
            .as_deref()
            .filter(|r| !r.is_empty())
            .or_else(|| self.status.canonical_reason());
        match reason {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as (lossy) UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Builds and executes requests against a Bamboo server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Resolve `path` against the base URL
    ///
    /// A query string embedded in `path` is kept and can be extended
    /// before the request is executed.
    fn new_request(&self, method: Method, path: &str) -> Result<Request>;

    /// Perform the round trip and read the whole body
    async fn execute(&self, request: Request) -> Result<Response>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpTransport {
    /// Create an unauthenticated transport for the given server root
    pub fn new(server: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bamboo-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: api_base(server)?,
            credentials: Credentials::Anonymous,
        })
    }

    /// Create a transport from loaded configuration and secrets
    ///
    /// The auth scheme comes from [`Secrets::credentials`].
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        let credentials = secrets
            .credentials(config.server.username.as_deref())
            .map_err(|e| Error::Auth(e.to_string()))?;

        if credentials == Credentials::Anonymous {
            warn!("No Bamboo credentials configured, using anonymous access");
        } else {
            debug!(scheme = credentials.scheme(), "Resolved Bamboo credentials");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("bamboo-api/", env!("CARGO_PKG_VERSION")))
            .timeout(config.server.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: api_base(&config.server.url)?,
            credentials,
        })
    }

    /// Base URL all request paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn new_request(&self, method: Method, path: &str) -> Result<Request> {
        let url = self.base_url.join(path)?;
        Ok(Request::new(method, url))
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .header(ACCEPT, "application/json");

        builder = match &self.credentials {
            Credentials::Anonymous => builder,
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::Bearer(token) => builder.bearer_auth(token),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "Received response");

        Ok(Response::new(status, body.to_vec()))
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.credentials.scheme())
            .finish_non_exhaustive()
    }
}

/// Resolve the REST root for a server URL, keeping any context path
fn api_base(server: &str) -> Result<Url> {
    let mut base = Url::parse(server)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(API_PREFIX)?)
}
