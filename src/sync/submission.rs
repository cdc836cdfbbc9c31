use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::poll_loop::{PollLoop, PollOutcome};
use crate::api::AgentApi;
use crate::models::{ConvId, CreateOutcome, SendForm};
use crate::view::{ChatView, InputControl, Navigator};

/// Rendered when the message form could not be delivered.
pub const SEND_FAILED_MESSAGE: &str = "Fail to get response from the AI agent, please try again.";

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The agent answered; `errors` are its validation messages, already
    /// rendered.
    Accepted { conv_id: ConvId, errors: Vec<String> },
    /// The form never got a usable answer.
    SendFailed { conv_id: ConvId },
    /// Conversation creation redirected; the navigator was sent there and
    /// nothing was submitted.
    Redirected { url: String },
    /// Conversation creation failed; nothing was submitted.
    CreationFailed { reason: String },
}

impl SubmitOutcome {
    pub fn conv_id(&self) -> Option<ConvId> {
        match self {
            SubmitOutcome::Accepted { conv_id, .. } | SubmitOutcome::SendFailed { conv_id } => {
                Some(*conv_id)
            }
            SubmitOutcome::Redirected { .. } | SubmitOutcome::CreationFailed { .. } => None,
        }
    }
}

/// Result of [`SubmissionCoordinator::submit`]: the outcome plus the poll
/// cycle it started, if the form was sent.
#[derive(Debug)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub poll: Option<JoinHandle<PollOutcome>>,
}

impl SubmitReport {
    fn aborted(outcome: SubmitOutcome) -> Self {
        Self { outcome, poll: None }
    }

    /// Waits for the trailing poll cycle, if one was started.
    pub async fn finish(self) -> (SubmitOutcome, Option<PollOutcome>) {
        let poll = match self.poll {
            Some(handle) => match handle.await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    error!("Poll task failed: {e}");
                    None
                }
            },
            None => None,
        };
        (self.outcome, poll)
    }
}

/// Runs the user's sends: locks the input while a send is in flight, creates
/// the conversation on first use, and always follows a send with a poll
/// cycle so whatever the agent produced reaches the view.
pub struct SubmissionCoordinator<A, I, N> {
    api: Arc<A>,
    poller: PollLoop<A>,
    input: I,
    navigator: N,
}

impl<A, I, N> SubmissionCoordinator<A, I, N>
where
    A: AgentApi + 'static,
    I: InputControl,
    N: Navigator,
{
    pub fn new(api: Arc<A>, poller: PollLoop<A>, input: I, navigator: N) -> Self {
        Self { api, poller, input, navigator }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn poller(&self) -> &PollLoop<A> {
        &self.poller
    }

    fn view(&self) -> &ChatView {
        self.poller.view()
    }

    /// Submits the current input through `form`, binding a freshly created
    /// conversation into it when it has none.
    pub async fn submit(&mut self, form: &mut SendForm) -> SubmitReport {
        self.input.set_enabled(false);

        let conv_id = match form.conv_id {
            Some(conv_id) => conv_id,
            None => match self.api.create_conversation().await {
                Ok(CreateOutcome::Created(conv_id)) => {
                    info!(%conv_id, "created conversation");
                    form.conv_id = Some(conv_id);
                    conv_id
                }
                Ok(CreateOutcome::Redirected(url)) => {
                    info!(%url, "conversation creation redirected, navigating away");
                    self.input.set_enabled(true);
                    self.navigator.navigate(&url);
                    return SubmitReport::aborted(SubmitOutcome::Redirected { url });
                }
                Err(e) => {
                    error!("Failed to create conversation: {e}");
                    let reason = format!("Failed to create a conversation: {e}");
                    self.view().append_error(reason.clone()).await;
                    self.input.set_enabled(true);
                    return SubmitReport::aborted(SubmitOutcome::CreationFailed { reason });
                }
            },
        };

        let fields = form.fields(&self.input.value());
        let outcome = match self.api.submit(&form.action, &fields).await {
            Ok(resp) => {
                self.input.set_enabled(true);
                self.input.clear();
                let errors = resp.errors();
                for message in &errors {
                    warn!(%conv_id, "submission rejected: {message}");
                    self.view().append_error(message.clone()).await;
                }
                SubmitOutcome::Accepted { conv_id, errors }
            }
            Err(e) => {
                error!(%conv_id, "Failed to submit message: {e}");
                self.input.set_enabled(true);
                self.view().append_error(SEND_FAILED_MESSAGE).await;
                SubmitOutcome::SendFailed { conv_id }
            }
        };

        SubmitReport { outcome, poll: Some(self.poller.spawn(conv_id)) }
    }
}
