use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::api::AgentApi;
use crate::config::DEFAULT_POLL_DELAY;
use crate::models::{ConvId, UpdateRequest};
use crate::view::ChatView;

/// Rendered when a delta fetch gets no usable response.
pub const UNREACHABLE_MESSAGE: &str = "Cannot reach the AI agent.";

/// Where a conversation's poll cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    /// Transport failure. Terminal for the cycle only; the next `poll` starts
    /// over.
    Failed,
}

/// How a poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub conv_id: ConvId,
    /// `Idle` or `Failed`.
    pub state: PollState,
    /// Delta fetches issued during the cycle.
    pub requests: u32,
}

/// Fetches everything after the view's cursor and keeps fetching while the
/// agent reports it is busy.
///
/// Fetches within a cycle are strictly sequential: request N+1 is only sent
/// after response N has been rendered, so the cursor it carries already
/// accounts for everything N returned.
pub struct PollLoop<A> {
    api: Arc<A>,
    view: ChatView,
    delay: Duration,
}

impl<A> Clone for PollLoop<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api), view: self.view.clone(), delay: self.delay }
    }
}

impl<A: AgentApi + 'static> PollLoop<A> {
    pub fn new(api: Arc<A>, view: ChatView) -> Self {
        Self { api, view, delay: DEFAULT_POLL_DELAY }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    /// Runs one poll cycle to completion.
    pub async fn poll(&self, conv_id: ConvId) -> PollOutcome {
        let mut state = PollState::Polling;
        let mut requests = 0;

        while state == PollState::Polling {
            let request = UpdateRequest { conv_id, start_id: self.view.next_cursor().await };
            requests += 1;

            let resp = match self.api.fetch_updates(&request).await {
                Ok(resp) => resp,
                Err(e) => {
                    error!(%conv_id, start_id = request.start_id, "poll failed, giving up: {e}");
                    self.view.append_error(UNREACHABLE_MESSAGE).await;
                    state = PollState::Failed;
                    continue;
                }
            };

            let errors = resp.errors();
            if !errors.is_empty() {
                for message in errors {
                    warn!(%conv_id, "agent reported: {message}");
                    self.view.append_error(message).await;
                }
            } else if let Some(fragment) = resp.fragment() {
                self.view.append_messages(fragment).await;
            }

            if resp.is_busy() {
                debug!(%conv_id, "agent busy, polling again in {:?}", self.delay);
                tokio::time::sleep(self.delay).await;
            } else {
                state = PollState::Idle;
            }
        }

        debug!(%conv_id, requests, ?state, "poll cycle finished");
        PollOutcome { conv_id, state, requests }
    }

    /// Runs [`poll`](Self::poll) as a background task.
    pub fn spawn(&self, conv_id: ConvId) -> JoinHandle<PollOutcome> {
        let poller = self.clone();
        tokio::spawn(async move { poller.poll(conv_id).await })
    }
}
