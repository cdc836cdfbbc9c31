use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::AgentApi;
use crate::config::ClientConfig;
use crate::errors::SyncError;
use crate::models::{
    CreateConversationBody, CreateOutcome, PollResponse, SubmitResponse, UpdateRequest,
};

/// [`AgentApi`] over HTTP.
#[derive(Clone)]
pub struct HttpAgentApi {
    client: reqwest::Client,
    base_url: String,
    update_path: String,
    create_path: String,
}

impl HttpAgentApi {
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            update_path: config.update_path.clone(),
            create_path: config.create_path.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL. Absolute URLs pass
    /// through untouched.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SyncError> {
        let resp = request.send().await.map_err(|e| {
            error!("Request to {endpoint} failed: {e}");
            SyncError::unreachable(endpoint, e)
        })?;

        if !resp.status().is_success() {
            error!("{endpoint} answered with HTTP {}", resp.status());
            return Err(SyncError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|e| {
            error!("Failed to decode response from {endpoint}: {e}");
            SyncError::decode(endpoint, e)
        })
    }
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn fetch_updates(&self, request: &UpdateRequest) -> Result<PollResponse, SyncError> {
        debug!(conv_id = %request.conv_id, start_id = request.start_id, "fetching updates");
        let url = self.url(&self.update_path);
        self.send_json(&self.update_path, self.client.post(url).form(request)).await
    }

    async fn submit(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<SubmitResponse, SyncError> {
        debug!(action, "submitting message form");
        let url = self.url(action);
        self.send_json(action, self.client.post(url).form(fields)).await
    }

    async fn create_conversation(&self) -> Result<CreateOutcome, SyncError> {
        let endpoint = self.create_path.as_str();
        let request = self
            .client
            .get(self.url(endpoint))
            .build()
            .map_err(|e| SyncError::unreachable(endpoint, e))?;
        let requested = request.url().clone();

        let resp = self.client.execute(request).await.map_err(|e| {
            error!("Request to {endpoint} failed: {e}");
            SyncError::unreachable(endpoint, e)
        })?;

        // reqwest follows redirects; a different final URL means the server
        // sent us somewhere else (login or cookie gate).
        if resp.url() != &requested {
            debug!(url = %resp.url(), "conversation creation redirected");
            return Ok(CreateOutcome::Redirected(resp.url().to_string()));
        }

        if !resp.status().is_success() {
            error!("{endpoint} answered with HTTP {}", resp.status());
            return Err(SyncError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.json::<CreateConversationBody>().await.map_err(|e| {
            error!("Failed to decode response from {endpoint}: {e}");
            SyncError::decode(endpoint, e)
        })?;

        let conv_id = body.conv_id().ok_or(SyncError::MissingConversationId)?;
        debug!(%conv_id, "conversation created");
        Ok(CreateOutcome::Created(conv_id))
    }
}
