use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Default)]
pub struct Client {
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    inputs: SearchInputs<'a>,
}

#[derive(Serialize)]
struct SearchInputs<'a> {
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
}

impl Client {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Posts the query to the search endpoint. A non-success status means
    /// "no results", not an error. The result objects are owned by the
    /// search backend and passed through without schema validation.
    pub async fn fetch(
        &self,
        url: &str,
        question: &str,
        author: Option<&str>,
    ) -> anyhow::Result<Option<Vec<Value>>> {
        let response = self
            .client
            .post(url)
            .json(&SearchRequest {
                inputs: SearchInputs { question, author },
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let results = response
            .json::<Vec<Value>>()
            .await
            .context("failed to parse search response")?;

        Ok(Some(results))
    }
}
