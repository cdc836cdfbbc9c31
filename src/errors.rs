use thiserror::Error;

/// Errors raised by the sync client. None of these ever escape to the user
/// directly: the poll loop and the submission coordinator turn each one into a
/// rendered error fragment.
#[derive(Debug, Error)]
pub enum SyncError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Agent unreachable at {endpoint}: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Agent returned HTTP {status} for {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    // ── Conversation errors ──────────────────────────────────────────────────
    #[error("Conversation creation returned no usable conv_id")]
    MissingConversationId,

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid value for {key}: {message}")]
    Config { key: String, message: String },
}

impl SyncError {
    pub fn unreachable(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        SyncError::Unreachable { endpoint: endpoint.into(), source }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl ToString) -> Self {
        SyncError::Decode { endpoint: endpoint.into(), message: message.to_string() }
    }

    /// True when the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SyncError::Unreachable { .. } | SyncError::HttpStatus { .. } | SyncError::Decode { .. }
        )
    }
}
