use anyhow::Context;
use async_stream::stream;
use futures_util::StreamExt;

use crate::models::Models;

use super::{
    parse_data_chunks, ChatCompletion, ChatRequest, ChatResponse, ChatStream,
    CHAT_COMPLETIONS,
};

impl ChatCompletion for Models {
    async fn chat(
        &self,
        request: ChatRequest,
    ) -> anyhow::Result<ChatResponse> {
        let text = self.string_response(request, CHAT_COMPLETIONS).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }

    async fn chat_with_stream(
        &self,
        request: ChatRequest,
    ) -> anyhow::Result<ChatStream> {
        let mut stream =
            self.stream_response(request, CHAT_COMPLETIONS).await?;

        Ok(Box::pin(stream! {
            while let Some(s) = stream.next().await.transpose()? {
                let data = parse_data_chunks(&String::from_utf8(s.to_vec())?);
                yield Ok(data);
            }
        }))
    }
}
