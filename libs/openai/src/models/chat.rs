pub mod implementation;

use std::pin::Pin;

use futures_core::Stream;
use reqwest::Body;
use serde::{Deserialize, Serialize};

pub static GPT_3_5_TURBO: &str = "gpt-3.5-turbo";

static CHAT_COMPLETIONS: &str = "v1/chat/completions";

pub type ChatStream = Pin<
    Box<dyn Stream<Item = anyhow::Result<Vec<ChatCompletionChunk>>> + Send>,
>;

pub trait ChatCompletion {
    fn chat(
        &self,
        request: ChatRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<ChatResponse>>
           + Send;

    /// Sends the request and checks the status eagerly. The returned
    /// stream only carries body chunks.
    fn chat_with_stream(
        &self,
        request: ChatRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<ChatStream>> + Send;
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    pub delta: Delta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// Concatenated text deltas carried by this chunk.
    pub fn text(&self) -> String {
        self.choices
            .iter()
            .filter_map(|c| c.delta.content.clone())
            .collect()
    }
}

impl Into<Body> for ChatRequest {
    fn into(self) -> Body {
        let body = serde_json::to_string(&self).unwrap();
        Body::from(body)
    }
}

/// Parses one server-sent-events payload into chunks. Anything that is not
/// a chunk, such as the final `[DONE]` marker, is skipped.
pub(crate) fn parse_data_chunks(payload: &str) -> Vec<ChatCompletionChunk> {
    payload
        .split("data: ")
        .flat_map(serde_json::from_str)
        .collect()
}
