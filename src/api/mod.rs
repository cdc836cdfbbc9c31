//! Transport seam between the sync loop and the agent server.

mod http;

use async_trait::async_trait;

pub use http::HttpAgentApi;

use crate::errors::SyncError;
use crate::models::{CreateOutcome, PollResponse, SubmitResponse, UpdateRequest};

/// The three requests the client makes. An `Err` always means the request
/// did not produce a usable response; application-level problems come back
/// inside the `Ok` value.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Delta fetch: messages from `request.start_id` onwards.
    async fn fetch_updates(&self, request: &UpdateRequest) -> Result<PollResponse, SyncError>;

    /// Posts the serialized message form to `action`.
    async fn submit(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<SubmitResponse, SyncError>;

    async fn create_conversation(&self) -> Result<CreateOutcome, SyncError>;
}
