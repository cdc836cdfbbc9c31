//! A scripted agent server for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};

use agent_chat_sync::config::ClientConfig;

/// How `/conv/new` answers.
#[derive(Debug, Clone)]
pub enum CreateMode {
    Json(Value),
    RedirectToLogin,
    Status(u16),
}

#[derive(Debug)]
pub struct StubState {
    pub updates: Mutex<VecDeque<Value>>,
    pub update_requests: Mutex<Vec<HashMap<String, String>>>,
    pub submissions: Mutex<Vec<HashMap<String, String>>>,
    pub submit_reply: Mutex<Result<Value, u16>>,
    pub create_mode: Mutex<CreateMode>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            updates: Mutex::new(VecDeque::new()),
            update_requests: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            submit_reply: Mutex::new(Ok(json!({}))),
            create_mode: Mutex::new(CreateMode::Json(json!({ "conv_id": 1 }))),
        }
    }
}

impl StubState {
    pub fn push_update(&self, body: Value) {
        self.updates.lock().unwrap().push_back(body);
    }

    pub fn set_submit_reply(&self, reply: Result<Value, u16>) {
        *self.submit_reply.lock().unwrap() = reply;
    }

    pub fn set_create_mode(&self, mode: CreateMode) {
        *self.create_mode.lock().unwrap() = mode;
    }

    /// `(conv_id, start_id)` of every delta fetch received, as sent.
    pub fn update_windows(&self) -> Vec<(String, String)> {
        self.update_requests
            .lock()
            .unwrap()
            .iter()
            .map(|f| (f["conv_id"].clone(), f["start_id"].clone()))
            .collect()
    }

    pub fn submissions(&self) -> Vec<HashMap<String, String>> {
        self.submissions.lock().unwrap().clone()
    }
}

pub struct StubAgent {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubAgent {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/conv/update", post(update_handler))
            .route("/conv/send", post(send_handler))
            .route("/conv/new", get(create_handler))
            .route("/login", get(login_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{addr}"), state }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            poll_delay: std::time::Duration::from_millis(20),
            ..ClientConfig::default()
        }
    }
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn update_handler(
    State(state): State<Arc<StubState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    state.update_requests.lock().unwrap().push(form);
    let next = state.updates.lock().unwrap().pop_front();
    Json(next.unwrap_or_else(|| json!({})))
}

async fn send_handler(
    State(state): State<Arc<StubState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.submissions.lock().unwrap().push(form);
    let reply = state.submit_reply.lock().unwrap().clone();
    match reply {
        Ok(body) => Json(body).into_response(),
        Err(status) => StatusCode::from_u16(status).unwrap().into_response(),
    }
}

async fn create_handler(State(state): State<Arc<StubState>>) -> Response {
    let mode = state.create_mode.lock().unwrap().clone();
    match mode {
        CreateMode::Json(body) => Json(body).into_response(),
        CreateMode::RedirectToLogin => Redirect::to("/login").into_response(),
        CreateMode::Status(status) => StatusCode::from_u16(status).unwrap().into_response(),
    }
}

async fn login_handler() -> Html<&'static str> {
    Html("<form>please log in</form>")
}
