use serde_json::{json, Value};

use crate::api::DocsApi;
use crate::session::ConversationStore;

pub const NO_ACTIVE_CONVERSATION: &str =
    "No active conversation. Ask a question first or pass a conversationId.";

const ASK_HINT: &str =
    "Use the followup tool with this conversationId (or omit it) to continue the conversation.";

/// A host-facing tool: name, description and JSON parameter schema.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "ask",
            description: "Ask the documentation assistant a question in a new conversation",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "Natural-language question about the documentation"
                    }
                },
                "required": ["question"]
            }),
        },
        ToolSpec {
            name: "followup",
            description: "Ask a follow-up question in an existing conversation",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The follow-up question"
                    },
                    "conversationId": {
                        "type": "string",
                        "description": "Conversation to continue; defaults to the most recent one"
                    }
                },
                "required": ["question"]
            }),
        },
        ToolSpec {
            name: "history",
            description: "Get the question/answer history of a conversation",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "conversationId": {
                        "type": "string",
                        "description": "Conversation to inspect; defaults to the most recent one"
                    }
                }
            }),
        },
        ToolSpec {
            name: "recommend",
            description: "Get recommended questions for a documentation page",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pageUrl": {
                        "type": "string",
                        "description": "URL of the documentation page being read"
                    },
                    "scene": {
                        "type": "string",
                        "description": "Recommendation scene; defaults to ai_doc_recommend"
                    }
                },
                "required": ["pageUrl"]
            }),
        },
    ]
}

/// Tool adapter over the client, stateless apart from the injected
/// conversation-pointer store. Every client failure is converted into an
/// `{"error": ...}` result here so nothing propagates into the host.
pub struct DocTools<C: DocsApi, S: ConversationStore> {
    client: C,
    store: S,
}

fn error_result(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

impl<C: DocsApi, S: ConversationStore> DocTools<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self { client, store }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatch a tool invocation by name. Always returns a result object,
    /// never an error.
    pub async fn call(&self, name: &str, args: &Value) -> Value {
        match name {
            "ask" => self.ask(args).await,
            "followup" => self.followup(args).await,
            "history" => self.history(args).await,
            "recommend" => self.recommend(args).await,
            other => error_result(format!("Unknown tool '{}'", other)),
        }
    }

    pub async fn ask(&self, args: &Value) -> Value {
        let question = str_arg(args, "question").unwrap_or("").trim();
        if question.is_empty() {
            return error_result("Question must not be empty.");
        }

        match self.client.query(question).await {
            Ok(outcome) => {
                self.store.set_current(&outcome.conversation_id);
                json!({
                    "conversationId": outcome.conversation_id,
                    "answer": outcome.answer,
                    "followUpQuestions": outcome.follow_ups,
                    "hint": ASK_HINT,
                })
            }
            Err(e) => error_result(e.to_string()),
        }
    }

    pub async fn followup(&self, args: &Value) -> Value {
        let question = str_arg(args, "question").unwrap_or("").trim();
        if question.is_empty() {
            return error_result("Question must not be empty.");
        }

        let conversation_id = match self.resolve_conversation_id(args) {
            Some(id) => id,
            None => return error_result(NO_ACTIVE_CONVERSATION),
        };

        // The conversation id is assumed already current; the pointer is
        // not updated here.
        match self.client.follow_up(&conversation_id, question).await {
            Ok(outcome) => json!({
                "conversationId": outcome.conversation_id,
                "answer": outcome.answer,
                "followUpQuestions": outcome.follow_ups,
            }),
            Err(e) => error_result(e.to_string()),
        }
    }

    pub async fn history(&self, args: &Value) -> Value {
        let conversation_id = match self.resolve_conversation_id(args) {
            Some(id) => id,
            None => return error_result(NO_ACTIVE_CONVERSATION),
        };

        match self.client.get_history(&conversation_id).await {
            Ok(detail) => {
                // Flattened view: internal question/answer ids are omitted.
                let dialog: Vec<Value> = detail
                    .dialog
                    .iter()
                    .map(|entry| {
                        json!({
                            "question": entry.question.clone().unwrap_or_default(),
                            "answer": entry
                                .answer
                                .as_ref()
                                .and_then(|a| a.answer.clone())
                                .unwrap_or_default(),
                            "createdAt": entry.created_at.clone().unwrap_or(Value::Null),
                        })
                    })
                    .collect();

                json!({
                    "conversationId": detail.conversation_id,
                    "dialog": dialog,
                })
            }
            Err(e) => error_result(e.to_string()),
        }
    }

    pub async fn recommend(&self, args: &Value) -> Value {
        let page_url = str_arg(args, "pageUrl").unwrap_or("").trim();
        if page_url.is_empty() {
            return error_result("pageUrl must not be empty.");
        }

        let scene = str_arg(args, "scene").filter(|s| !s.trim().is_empty());
        let questions = self.client.get_recommended_questions(page_url, scene).await;
        json!({ "questions": questions })
    }

    fn resolve_conversation_id(&self, args: &Value) -> Option<String> {
        str_arg(args, "conversationId")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .or_else(|| self.store.current())
    }
}
