pub mod client;
pub mod followups;
pub mod models;
pub mod sse;

pub use client::{DocsApi, DocsClient, DEFAULT_RECOMMEND_SCENE};
pub use followups::{clean_answer, extract_follow_ups, split_trailing_questions};
pub use models::{ConversationDetail, DialogEntry, QueryOutcome};
pub use sse::parse_sse_body;
