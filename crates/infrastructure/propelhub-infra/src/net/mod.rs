use async_trait::async_trait;
use propelhub_app_core::RepoApi;
use propelhub_config::{normalize_base_url, BUILDS_PATH, COMMIT_PATH, REPO_PATH};
use propelhub_core::{ApiError, Payload};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("propelhub/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// [`RepoApi`] over HTTP.
///
/// Every operation is a `POST {base}/{path}` with the action payload as the
/// JSON body. The bearer credential is attached when non-empty.
#[derive(Clone)]
pub struct HttpRepoApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpRepoApi {
    pub fn new(client: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, payload: Option<Payload>) -> Result<Payload, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let body = payload.unwrap_or_else(|| json!({}));

        let mut req = self.client.post(&url).json(&body);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }

        debug!(%url, "POST");
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RepoApi for HttpRepoApi {
    async fn fetch_repos(&self, payload: Option<Payload>) -> Result<Payload, ApiError> {
        self.post(REPO_PATH, payload).await
    }

    async fn git_commit(&self, payload: Option<Payload>) -> Result<Payload, ApiError> {
        self.post(COMMIT_PATH, payload).await
    }

    async fn get_builds(&self, payload: Option<Payload>) -> Result<Payload, ApiError> {
        self.post(BUILDS_PATH, payload).await
    }
}
