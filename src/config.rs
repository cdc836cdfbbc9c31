use std::time::Duration;

use crate::errors::SyncError;
use crate::models::ConvId;

/// Fixed pause between polls while the agent reports it is busy.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_millis(1000);

/// Client settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub update_path: String,
    pub create_path: String,
    pub send_path: String,
    pub poll_delay: Duration,
    pub connect_timeout_secs: u64,
    /// Conversation to resume instead of creating a new one on first send.
    pub conv_id: Option<ConvId>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            update_path: "/conv/update".to_string(),
            create_path: "/conv/new".to_string(),
            send_path: "/conv/send".to_string(),
            poll_delay: DEFAULT_POLL_DELAY,
            connect_timeout_secs: 5,
            conv_id: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SyncError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            base_url: get("AGENT_BASE_URL").unwrap_or(defaults.base_url),
            update_path: get("AGENT_UPDATE_PATH").unwrap_or(defaults.update_path),
            create_path: get("AGENT_CREATE_PATH").unwrap_or(defaults.create_path),
            send_path: get("AGENT_SEND_PATH").unwrap_or(defaults.send_path),
            poll_delay: match get("AGENT_POLL_DELAY_MS") {
                Some(v) => Duration::from_millis(parse_number("AGENT_POLL_DELAY_MS", &v)?),
                None => defaults.poll_delay,
            },
            connect_timeout_secs: match get("AGENT_CONNECT_TIMEOUT_SECS") {
                Some(v) => parse_number("AGENT_CONNECT_TIMEOUT_SECS", &v)?,
                None => defaults.connect_timeout_secs,
            },
            conv_id: get("AGENT_CONV_ID")
                .map(|v| parse_number("AGENT_CONV_ID", &v).map(ConvId))
                .transpose()?,
        })
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, SyncError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| SyncError::Config {
        key: key.to_string(),
        message: format!("'{value}' is not a non-negative integer ({e})"),
    })
}
