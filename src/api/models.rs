use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response envelope used by the conversation and history endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationResult {
    pub conversation_id: String,
}

/// Full conversation record as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    pub conversation_id: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub dialog: Vec<DialogEntry>,
}

/// One question/answer pair. Read-only, rebuilt on every history fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEntry {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default)]
    pub answer: Option<AnswerInfo>,
    #[serde(default)]
    pub created_at: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub ext_info: Option<Value>,
}

/// Decoded payload of a single `data:` SSE line. Transient, consumed
/// during parsing and never retained.
#[derive(Debug, Clone, Deserialize)]
pub struct SseMessage {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(rename = "type", default)]
    pub message_type: Option<String>,
    #[serde(rename = "inDialog", default)]
    pub in_dialog: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendEnvelope {
    #[serde(default)]
    pub result: Option<Vec<String>>,
}

/// Result of `query`/`follow_up`: a cleaned answer with its extracted
/// follow-up question suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub conversation_id: String,
    pub answer: String,
    pub follow_ups: Vec<String>,
}
