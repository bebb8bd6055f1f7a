//! OpenAI chat completion request model
//!
//! Only the request side is typed. Responses are inspected as raw
//! `serde_json::Value` so that any JSON shape can be reported.

use crate::core::constants::{request, role};
use serde::{Deserialize, Serialize};

/// OpenAI message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIChatCompletionRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub max_tokens: u32,
}

impl OpenAIChatCompletionRequest {
    /// The fixed probe request: one "Hello" user message, 10 tokens max
    pub fn probe(model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![OpenAIMessage {
                role: role::USER.to_string(),
                content: request::PROMPT.to_string(),
            }],
            max_tokens: request::MAX_TOKENS,
        }
    }
}
