use serde::{Deserialize, Serialize};

/// Server-assigned conversation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConvId(pub u64);

impl std::fmt::Display for ConvId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ConvId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ConvId)
    }
}

/// Body of the delta fetch, sent form-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    pub conv_id: ConvId,
    pub start_id: u64,
}

/// The `error` field of a response: the agent sends either a single string or
/// a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    One(String),
    Many(Vec<String>),
}

impl ErrorField {
    /// Flattens into individual messages, dropping blanks.
    pub fn into_messages(self) -> Vec<String> {
        let all = match self {
            ErrorField::One(s) => vec![s],
            ErrorField::Many(v) => v,
        };
        all.into_iter().filter(|s| !s.trim().is_empty()).collect()
    }
}

/// Response of the delta fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub error: Option<ErrorField>,
    #[serde(default)]
    pub messages: Option<String>,
    #[serde(default)]
    pub busy: Option<bool>,
}

impl PollResponse {
    /// Error messages carried by this response; empty when there are none.
    pub fn errors(&self) -> Vec<String> {
        self.error.clone().map(ErrorField::into_messages).unwrap_or_default()
    }

    /// The message fragment, if it has any content.
    pub fn fragment(&self) -> Option<&str> {
        self.messages.as_deref().filter(|m| !m.is_empty())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.unwrap_or(false)
    }
}

/// Response of the message submission endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub error: Option<ErrorField>,
}

impl SubmitResponse {
    pub fn errors(&self) -> Vec<String> {
        self.error.clone().map(ErrorField::into_messages).unwrap_or_default()
    }
}

/// Raw body of the conversation creation endpoint. `conv_id` is kept loose so
/// that a string or missing id is reported instead of failing decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConversationBody {
    #[serde(default)]
    pub conv_id: Option<serde_json::Value>,
}

impl CreateConversationBody {
    pub fn conv_id(&self) -> Option<ConvId> {
        match self.conv_id.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().map(ConvId),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// What the creation endpoint resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(ConvId),
    /// The server redirected elsewhere (e.g. a cookie/login gate); the
    /// client must navigate to this URL instead of continuing.
    Redirected(String),
}

/// The message form: where it posts, which conversation it is bound to and
/// any extra hidden fields the page carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendForm {
    pub action: String,
    pub conv_id: Option<ConvId>,
    pub hidden: Vec<(String, String)>,
}

impl SendForm {
    pub fn new(action: impl Into<String>, conv_id: Option<ConvId>) -> Self {
        Self { action: action.into(), conv_id, hidden: Vec::new() }
    }

    pub fn with_hidden(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.hidden.push((name.into(), value.into()));
        self
    }

    /// Serialized form fields, in the order a browser would send them.
    pub fn fields(&self, message: &str) -> Vec<(String, String)> {
        let mut fields = vec![(
            "conv_id".to_string(),
            self.conv_id.map(|c| c.to_string()).unwrap_or_default(),
        )];
        fields.extend(self.hidden.iter().cloned());
        fields.push(("message".to_string(), message.to_string()));
        fields
    }
}
