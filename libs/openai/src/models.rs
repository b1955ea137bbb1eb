use anyhow::ensure;
use bytes::Bytes;
use futures_core::Stream;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Client,
};

pub mod chat;

#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    client: Client,
}

impl Models {
    pub fn new(base_url: &str, token: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_str("*/*").unwrap());
        headers.insert(
            "Content-Type",
            HeaderValue::from_str("application/json").unwrap(),
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", token).as_str())
                .unwrap(),
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .unwrap();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn string_response<R: Into<Body>>(
        &self,
        request: R,
        path: &str,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .body(request)
            .send()
            .await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }

    async fn stream_response<R: Into<Body>>(
        &self,
        request: R,
        path: &str,
    ) -> anyhow::Result<impl Stream<Item = reqwest::Result<Bytes>>> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .body(request)
            .send()
            .await?;

        let status_code = response.status();

        ensure!(status_code.is_success(), "status code: {}", status_code);

        Ok(response.bytes_stream())
    }
}
