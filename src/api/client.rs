use colored::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tokio::time::Duration;

use crate::api::followups::split_trailing_questions;
use crate::api::models::{
    ConversationDetail, CreateConversationResult, Envelope, QueryOutcome, RecommendEnvelope,
};
use crate::api::sse::parse_sse_body;
use crate::error::{DocAskError, Result};

pub const DEFAULT_RECOMMEND_SCENE: &str = "ai_doc_recommend";

/// Operations against the documentation assistant. The tool adapter is
/// generic over this trait so it can be exercised without a live service.
#[allow(async_fn_in_trait)]
pub trait DocsApi {
    /// Create a conversation and return its id.
    async fn create_conversation(&self, query: &str) -> Result<String>;

    /// Ask a question in an existing conversation and return the raw
    /// concatenated answer text.
    async fn ask(&self, conversation_id: &str, query: &str) -> Result<String>;

    /// Fetch conversation metadata plus its ordered dialog entries.
    async fn get_history(&self, conversation_id: &str) -> Result<ConversationDetail>;

    /// Fetch recommended questions for a documentation page. Degrades to an
    /// empty list on any failure; recommendations are non-critical.
    async fn get_recommended_questions(&self, page_url: &str, scene: Option<&str>) -> Vec<String>;

    /// Create a conversation, ask `question` in it and split the raw answer
    /// into cleaned text plus follow-up suggestions.
    async fn query(&self, question: &str) -> Result<QueryOutcome>;

    /// Like `query` but reuses an existing conversation.
    async fn follow_up(&self, conversation_id: &str, question: &str) -> Result<QueryOutcome>;
}

/// HTTP client for the documentation assistant API family.
///
/// The conversation/history/recommend endpoints and the streaming endpoint
/// are independently addressable; in practice both base URLs usually point
/// at the same host.
pub struct DocsClient {
    http: reqwest::Client,
    api_base_url: String,
    sse_base_url: String,
    verbose: bool,
}

impl DocsClient {
    pub fn new(api_base_url: &str, sse_base_url: &str, timeout_secs: u64, verbose: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            sse_base_url: sse_base_url.trim_end_matches('/').to_string(),
            verbose,
        })
    }

    fn log_request(&self, method: &str, url: &str) {
        if self.verbose {
            eprintln!("{}", format!("[docask] {} {}", method, url).dimmed());
        }
    }

    /// Unwrap a `{success, result}` envelope, preserving the raw body in
    /// the error when the service reports failure.
    fn unwrap_envelope<T>(raw: serde_json::Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(raw.clone())?;
        if !envelope.success {
            return Err(DocAskError::Api { envelope: raw });
        }
        let result = envelope
            .result
            .ok_or(DocAskError::Api { envelope: raw })?;
        Ok(serde_json::from_value(result)?)
    }

    fn status_error(status: reqwest::StatusCode) -> DocAskError {
        DocAskError::Transport {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        }
    }
}

impl DocsApi for DocsClient {
    async fn create_conversation(&self, query: &str) -> Result<String> {
        let url = format!("{}/api/open/coding/conversation", self.api_base_url);
        self.log_request("POST", &url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response.status()));
        }

        let raw: serde_json::Value = response.json().await?;
        let result: CreateConversationResult = Self::unwrap_envelope(raw)?;
        Ok(result.conversation_id)
    }

    async fn ask(&self, conversation_id: &str, query: &str) -> Result<String> {
        let url = format!("{}/api/open/sse/coding/completions", self.sse_base_url);
        self.log_request("GET", &url);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        // The whole event stream is buffered before parsing; callers get
        // the final answer, not incremental fragments.
        let response = self
            .http
            .get(&url)
            .headers(headers)
            .query(&[("conversationId", conversation_id), ("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response.status()));
        }

        let body = response.text().await?;
        Ok(parse_sse_body(&body))
    }

    async fn get_history(&self, conversation_id: &str) -> Result<ConversationDetail> {
        let url = format!(
            "{}/api/open/coding/conversation/{}",
            self.api_base_url, conversation_id
        );
        self.log_request("GET", &url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response.status()));
        }

        let raw: serde_json::Value = response.json().await?;
        Self::unwrap_envelope(raw)
    }

    async fn get_recommended_questions(&self, page_url: &str, scene: Option<&str>) -> Vec<String> {
        let url = format!("{}/api/open/coding/followup/recommend", self.api_base_url);
        self.log_request("GET", &url);

        let scene = scene.unwrap_or(DEFAULT_RECOMMEND_SCENE);
        let response = self
            .http
            .get(&url)
            .query(&[("scene", scene), ("askPageUrl", page_url)])
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                if self.verbose {
                    eprintln!(
                        "{}",
                        format!("[docask] recommend returned status {}", r.status()).dimmed()
                    );
                }
                return Vec::new();
            }
            Err(e) => {
                if self.verbose {
                    eprintln!("{}", format!("[docask] recommend failed: {}", e).dimmed());
                }
                return Vec::new();
            }
        };

        match response.json::<RecommendEnvelope>().await {
            Ok(envelope) => envelope.result.unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    async fn query(&self, question: &str) -> Result<QueryOutcome> {
        let conversation_id = self.create_conversation(question).await?;
        self.follow_up(&conversation_id, question).await
    }

    async fn follow_up(&self, conversation_id: &str, question: &str) -> Result<QueryOutcome> {
        let raw = self.ask(conversation_id, question).await?;
        let (answer, follow_ups) = split_trailing_questions(&raw);
        Ok(QueryOutcome {
            conversation_id: conversation_id.to_string(),
            answer,
            follow_ups,
        })
    }
}
