//! Client configuration and credentials.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Credentials for authenticating against a Jira instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Credentials {
    /// Basic auth with an Atlassian account email and API token (Cloud).
    Basic { username: String, api_token: String },
    /// Bearer auth with a personal access token (Server / Data Center).
    Bearer { token: String },
}

/// Connection settings for a Jira instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the instance, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Credentials applied to every request.
    pub credentials: Credentials,
}

impl JiraConfig {
    /// Create a config, validating the base URL.
    ///
    /// A trailing slash is stripped so endpoint paths can be joined with a
    /// plain format string.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the base URL does not parse.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self, Error> {
        let mut base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url}: {e}")))?;
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            base_url,
            credentials,
        })
    }

    /// Build a config from the environment.
    ///
    /// Reads `JIRA_URL`, then either `JIRA_USER` + `JIRA_API_TOKEN` (basic)
    /// or `JIRA_PAT` (bearer). Basic auth wins when both are present.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `JIRA_URL` or all credentials are absent.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("JIRA_URL")
            .map_err(|_| Error::Config("JIRA_URL not set".to_string()))?;

        let credentials = match (
            std::env::var("JIRA_USER"),
            std::env::var("JIRA_API_TOKEN"),
            std::env::var("JIRA_PAT"),
        ) {
            (Ok(username), Ok(api_token), _) => Credentials::Basic {
                username,
                api_token,
            },
            (_, _, Ok(token)) => Credentials::Bearer { token },
            _ => {
                return Err(Error::Config(
                    "set JIRA_USER and JIRA_API_TOKEN, or JIRA_PAT".to_string(),
                ))
            }
        };

        Self::new(base_url, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = JiraConfig::new(
            "https://example.atlassian.net/",
            Credentials::Bearer {
                token: "pat".to_string(),
            },
        )
        .unwrap();
        assert_eq!(config.base_url, "https://example.atlassian.net");
    }

    #[test]
    fn test_config_rejects_invalid_url() {
        let result = JiraConfig::new(
            "not a url",
            Credentials::Bearer {
                token: "pat".to_string(),
            },
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_keeps_credentials() {
        let config = JiraConfig::new(
            "https://example.atlassian.net",
            Credentials::Basic {
                username: "dev@example.com".to_string(),
                api_token: "token".to_string(),
            },
        )
        .unwrap();
        match config.credentials {
            Credentials::Basic {
                username,
                api_token,
            } => {
                assert_eq!(username, "dev@example.com");
                assert_eq!(api_token, "token");
            }
            Credentials::Bearer { .. } => panic!("expected basic credentials"),
        }
    }
}
