//! Jira REST API client core.
//!
//! Holds the HTTP plumbing shared by every resource operation: verb
//! helpers, authentication, and response-to-error mapping. The typed
//! operations themselves live in [`crate::resources`], one module per
//! resource, each extending [`JiraClient`] with its own `impl` block.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::config::{Credentials, JiraConfig};
use crate::error::Error;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the Jira core (`/rest/api/2`) and Agile (`/rest/agile/1.0`)
/// REST APIs.
#[derive(Clone)]
pub struct JiraClient {
    /// HTTP client.
    client: Client,
    /// Instance URL and credentials.
    config: JiraConfig,
}

impl JiraClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: JiraConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client configured from the environment.
    ///
    /// # Errors
    /// Returns error if required environment variables are missing.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(JiraConfig::from_env()?)
    }

    /// The configured instance base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Apply credentials to a request.
    fn authenticate(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config.credentials {
            Credentials::Basic {
                username,
                api_token,
            } => req.basic_auth(username, Some(api_token)),
            Credentials::Bearer { token } => req.bearer_auth(token),
        }
    }

    /// Make an authenticated GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Error> {
        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, "GET request");

        let response = self.authenticate(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, "POST request");

        let response = self
            .authenticate(self.client.post(&url))
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request that returns an empty body.
    pub(crate) async fn post_no_content<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, "POST request (empty response)");

        let response = self
            .authenticate(self.client.post(&url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Make an authenticated PUT request.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, "PUT request");

        let response = self
            .authenticate(self.client.put(&url))
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated DELETE request.
    ///
    /// 404 counts as success: teardown paths delete resources that may
    /// already be gone.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, "DELETE request");

        let response = self.authenticate(self.client.delete(&url)).send().await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Handle API response, parsing JSON or mapping to an error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                Error::Serialization(e)
            })
        } else if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound(text))
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
