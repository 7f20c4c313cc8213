//! Bamboo API client

use std::sync::Arc;

use bamboo_core::{Config, Secrets};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

use crate::transport::{HttpTransport, Request, Response, Transport};
use crate::{Error, PlanService, ProjectService, Result};

/// Bamboo REST client
///
/// The transport is injected at construction; cloning the client shares it.
#[derive(Clone)]
pub struct BambooClient {
    transport: Arc<dyn Transport>,
}

impl BambooClient {
    /// Create a client on top of an existing transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client talking HTTP to the configured server
    ///
    /// Credentials come from `secrets` (or the BAMBOO_TOKEN environment variable).
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        let transport = HttpTransport::from_config(config, secrets)?;
        info!(server = %config.server.url, "Created Bamboo client");
        Ok(Self::new(transport))
    }

    /// Load configuration and secrets from their default locations
    pub fn from_env() -> Result<Self> {
        let config = Config::load()?.with_env_overrides();
        let secrets = Secrets::load_with_overrides()?;
        Self::from_config(&config, &secrets)
    }

    /// Project operations
    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(self)
    }

    /// Plan operations
    pub fn plans(&self) -> PlanService<'_> {
        PlanService::new(self)
    }

    pub(crate) fn new_request(&self, method: Method, path: &str) -> Result<Request> {
        self.transport.new_request(method, path)
    }

    pub(crate) async fn send(&self, request: Request) -> Result<Response> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let response = self.transport.execute(request).await?;

        debug!(status = %response.status(), "Request completed");
        Ok(response)
    }
}

impl std::fmt::Debug for BambooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BambooClient").finish_non_exhaustive()
    }
}

/// Reject anything but 200 OK, naming what was being attempted
pub(crate) fn expect_ok(response: Response, context: &str) -> Result<Response> {
    if response.status() != StatusCode::OK {
        return Err(Error::unexpected_status(context, &response));
    }
    Ok(response)
}

/// Fail when any of the given arguments is empty
pub(crate) fn ensure_not_empty(values: &[&str], message: &str) -> Result<()> {
    if values.iter().any(|v| v.is_empty()) {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_ok_accepts_only_200() {
        let ok = Response::new(StatusCode::OK, "{}");
        assert!(expect_ok(ok, "ctx").is_ok());

        // 204 is a success status but not the one the server documents
        let no_content = Response::new(StatusCode::NO_CONTENT, "");
        let err = expect_ok(no_content, "Create plan branch").unwrap_err();
        assert_eq!(err.to_string(), "Create plan branch returned 204 No Content");
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(ensure_not_empty(&["PROJ"], "msg").is_ok());
        assert!(ensure_not_empty(&["PROJ", ""], "msg").unwrap_err().is_validation());
        assert!(ensure_not_empty(&[""], "msg").is_err());
    }

    #[test]
    fn test_client_is_clone_and_debug() {
        let transport = HttpTransport::new("http://localhost:8085").unwrap();
        let client = BambooClient::new(transport);
        let clone = client.clone();
        assert_eq!(format!("{:?}", clone), "BambooClient { .. }");
    }
}
