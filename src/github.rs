use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::data_models::UserProfile;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub user {0:?} not found")]
    NotFound(String),
    #[error("GitHub API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Thin client over the two GitHub REST endpoints the viewer needs.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: Url,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_base = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid GitHub API URL {:?}", config.api_base_url))?;
        if api_base.cannot_be_a_base() {
            anyhow::bail!("GitHub API URL {:?} cannot be a base URL", config.api_base_url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent value")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &config.github_token {
            let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("Invalid token value")?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base,
            per_page: config.repos_per_page,
        })
    }

    /// `GET /users/{username}`
    pub async fn fetch_user(&self, username: &str) -> Result<UserProfile, FetchError> {
        let url = self.endpoint(&["users", username]);
        self.get_json(url, username).await
    }

    /// `GET /users/{username}/repos`, kept as raw JSON records.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<Value>, FetchError> {
        let mut url = self.endpoint(&["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        self.get_json(url, username).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        // checked in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, username: &str) -> Result<T, FetchError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| {
                log::error!("error sending request to {url}, error: {source:#}");
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(username.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("GitHub API error for {url} ({status}): {body}");
            return Err(FetchError::Status { status, body });
        }

        response.json::<T>().await.map_err(|source| {
            log::error!("error decoding response from {url}, error: {source:#}");
            FetchError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}
