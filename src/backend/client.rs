use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::loader::normalize_server_url;
use crate::config::types::ServerConfig;
use crate::error::FetchError;
use crate::repo::RepoIdentity;
use crate::types::Issue;

const USER_AGENT: &str = concat!("issuemyst/", env!("CARGO_PKG_VERSION"));

/// Body of the random-issue request. The backend calls the owner `username`.
#[derive(Debug, Serialize)]
struct RandomIssueRequest<'a> {
    username: &'a str,
    repo: &'a str,
}

/// HTTP client for the random-issue backend.
///
/// Cheap to clone: `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BackendClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("building HTTP client")?;
        Ok(Self {
            http,
            endpoint: format!("{}/", normalize_server_url(&config.url)),
        })
    }

    /// The URL every request is posted to: the server origin, root path.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the backend for one random open issue of `repo`.
    ///
    /// Exactly one request is sent; there is no retry.
    pub async fn fetch_random_issue(&self, repo: &RepoIdentity) -> Result<Issue, FetchError> {
        tracing::debug!("backend: POST {} for {repo}", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&RandomIssueRequest {
                username: &repo.owner,
                repo: &repo.repo,
            })
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        tracing::debug!("backend: {repo} answered HTTP {status} ({} bytes)", body.len());
        interpret_response(status, &body)
    }
}

/// Turn a raw backend answer into an issue or the error to display.
pub fn interpret_response(status: u16, body: &str) -> Result<Issue, FetchError> {
    if status != 200 {
        return Err(FetchError::from_status(status, body));
    }
    serde_json::from_str::<Issue>(body).map_err(|e| {
        tracing::warn!("backend: malformed issue payload: {e}");
        FetchError::MalformedResponse
    })
}
