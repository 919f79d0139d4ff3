//! reqwest-backed implementation of the backend collaborators.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::{Backend, EXTRACT_PATH, RECIPES_PATH, SPACES_PATH};
use crate::config::BackendConfig;
use crate::error::{BackendError, ConfigError};
use crate::types::{CreateRecipeRequest, ErrorBody, ExtractRequest, ExtractResponse, Space};

/// Configuration for [`HttpBackend`].
#[derive(Clone)]
pub struct HttpBackendBuilder {
    base_url: Url,
    api_token: Option<String>,
    timeout: Duration,
    user_agent: String,
}

impl HttpBackendBuilder {
    /// Start from a loaded [`BackendConfig`].
    pub fn new(config: BackendConfig) -> Self {
        Self {
            base_url: config.base_url,
            api_token: config.api_token,
            timeout: config.timeout,
            user_agent: format!("hearth/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the bearer token. None sends no Authorization header.
    pub fn api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<HttpBackend, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(HttpBackend {
            client,
            base_url: self.base_url.as_str().trim_end_matches('/').to_string(),
            api_token: self.api_token,
        })
    }
}

/// Production backend talking JSON over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    api_token: Option<String>,
}

impl HttpBackend {
    /// Create a backend from environment configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder(BackendConfig::from_env()?).build()
    }

    pub fn builder(config: BackendConfig) -> HttpBackendBuilder {
        HttpBackendBuilder::new(config)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and turn non-success statuses into [`BackendError::Status`].
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            tracing::debug!(status = status.as_u16(), ?message, "backend returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_spaces(&self) -> Result<Vec<Space>, BackendError> {
        let url = self.endpoint(SPACES_PATH);
        tracing::debug!(url = %url, "network: listing spaces");
        self.send_json(self.client.get(url)).await
    }

    async fn extract_recipe(
        &self,
        request: &ExtractRequest,
    ) -> Result<ExtractResponse, BackendError> {
        let url = self.endpoint(EXTRACT_PATH);
        tracing::debug!(
            url = %url,
            has_text = request.text.is_some(),
            has_image = request.image_base64.is_some(),
            "network: extracting recipe"
        );
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<(), BackendError> {
        let url = self.endpoint(RECIPES_PATH);
        tracing::debug!(url = %url, space_id = %request.space_id, "network: creating recipe");
        self.send(self.client.post(url).json(request)).await?;
        Ok(())
    }
}
