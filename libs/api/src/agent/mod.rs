use openai::models::{
    chat::{ChatCompletion, ChatRequest, ChatStream, Message},
    Models,
};
use serde_json::Value;

pub struct QuestionAnswerAgent {
    client: Models,
    model: String,
    system_prompt: String,
}

impl QuestionAnswerAgent {
    pub fn new(client: Models, model: String) -> Self {
        let system_prompt = r#"
            You answer a reader's question using only the provided search results.
            Stay close to the wording of the search results and keep the author's tone.
            You never ask questions back.
            # Edge case
            If the search results don't cover the question, you should answer you don't know.
        "#
        .to_string();
        Self {
            client,
            model,
            system_prompt,
        }
    }

    /// Renders the search results into a context block and streams the
    /// generated answer.
    pub async fn prompt(
        self,
        results: &[Value],
        question: &str,
    ) -> anyhow::Result<ChatStream> {
        let context = render_context(results);

        let user_prompt = format!(
            r#"
    Question:
    "{}"
    Search results:
    "{}"
    Current Date:
    "{}"
    "#,
            question,
            context,
            chrono::Utc::now().format("%d/%m/%Y %H:%M")
        );

        let messages = vec![
            Message {
                role: "system".to_string(),
                content: self.system_prompt.clone(),
            },
            Message {
                role: "user".to_string(),
                content: user_prompt,
            },
        ];

        self.client
            .chat_with_stream(ChatRequest {
                model: self.model.clone(),
                messages,
                stream: Some(true),
                max_tokens: None,
                temperature: None,
            })
            .await
    }
}

fn render_context(results: &[Value]) -> String {
    results.iter().map(render_result).collect::<Vec<_>>().join("\n")
}

fn render_result(result: &Value) -> String {
    // Result objects are opaque. Prefer the common text fields and fall
    // back to the raw JSON.
    for key in ["text", "content", "passage"] {
        let Some(text) = result.get(key).and_then(|v| v.as_str()) else {
            continue;
        };
        return format!("1. {}", text);
    }
    format!("1. {}", result)
}
