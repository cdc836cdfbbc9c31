//! In-memory collaborators for the sync unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::api::AgentApi;
use crate::errors::SyncError;
use crate::models::{CreateOutcome, PollResponse, SubmitResponse, UpdateRequest};
use crate::view::{Fragment, InputControl, Navigator, Renderer};

pub(crate) fn transport_error() -> SyncError {
    SyncError::HttpStatus { endpoint: "/test".into(), status: 502 }
}

pub(crate) fn busy(messages: &str) -> PollResponse {
    PollResponse { messages: Some(messages.into()), busy: Some(true), ..Default::default() }
}

pub(crate) fn done(messages: &str) -> PollResponse {
    PollResponse { messages: Some(messages.into()), ..Default::default() }
}

/// Scripted agent. Each queue is consumed in order; an exhausted update queue
/// answers "nothing new, not busy".
#[derive(Default)]
pub(crate) struct FakeApi {
    updates: Mutex<VecDeque<Result<PollResponse, SyncError>>>,
    submits: Mutex<VecDeque<Result<SubmitResponse, SyncError>>>,
    creates: Mutex<VecDeque<Result<CreateOutcome, SyncError>>>,
    update_calls: Mutex<Vec<(UpdateRequest, Instant)>>,
    submit_calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    create_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_update(&self, resp: Result<PollResponse, SyncError>) -> &Self {
        self.updates.lock().unwrap().push_back(resp);
        self
    }

    pub(crate) fn push_submit(&self, resp: Result<SubmitResponse, SyncError>) -> &Self {
        self.submits.lock().unwrap().push_back(resp);
        self
    }

    pub(crate) fn push_create(&self, resp: Result<CreateOutcome, SyncError>) -> &Self {
        self.creates.lock().unwrap().push_back(resp);
        self
    }

    pub(crate) fn update_calls(&self) -> Vec<(UpdateRequest, Instant)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub(crate) fn submit_calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.submit_calls.lock().unwrap().clone()
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentApi for FakeApi {
    async fn fetch_updates(&self, request: &UpdateRequest) -> Result<PollResponse, SyncError> {
        self.update_calls.lock().unwrap().push((request.clone(), Instant::now()));
        let next = self.updates.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(PollResponse::default()))
    }

    async fn submit(
        &self,
        action: &str,
        fields: &[(String, String)],
    ) -> Result<SubmitResponse, SyncError> {
        self.submit_calls.lock().unwrap().push((action.to_string(), fields.to_vec()));
        let next = self.submits.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(SubmitResponse::default()))
    }

    async fn create_conversation(&self) -> Result<CreateOutcome, SyncError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.creates.lock().unwrap().pop_front();
        next.unwrap_or(Err(SyncError::MissingConversationId))
    }
}

pub(crate) struct Discard;

impl Renderer for Discard {
    fn render(&mut self, _fragment: &Fragment) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Enabled(bool),
    Cleared,
}

/// Input box that records every state change.
#[derive(Debug, Default)]
pub(crate) struct RecordingInput {
    pub(crate) value: String,
    pub(crate) events: Vec<InputEvent>,
}

impl RecordingInput {
    pub(crate) fn typed(value: &str) -> Self {
        Self { value: value.to_string(), events: Vec::new() }
    }

    pub(crate) fn enable_count(&self) -> usize {
        self.events.iter().filter(|e| **e == InputEvent::Enabled(true)).count()
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                InputEvent::Enabled(on) => Some(*on),
                InputEvent::Cleared => None,
            })
            .unwrap_or(true)
    }
}

impl InputControl for RecordingInput {
    fn set_enabled(&mut self, enabled: bool) {
        self.events.push(InputEvent::Enabled(enabled));
    }

    fn clear(&mut self) {
        self.value.clear();
        self.events.push(InputEvent::Cleared);
    }

    fn value(&self) -> String {
        self.value.clone()
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    pub(crate) visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) {
        self.visited.push(url.to_string());
    }
}
