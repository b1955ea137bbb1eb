use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, Method},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use tracing::{debug, error, info};

use crate::{
    agent::QuestionAnswerAgent, response::ApiResponse,
    stream::message_stream, token::is_valid_payment_token, ApiError,
    ApiState,
};

use self::request::AskParam;

pub mod request;

static BODY_LIMIT: usize = 1024 * 1024;

/// Answers a reader's question. Payment-token gated; the search backend at
/// the sibling `search` route provides the context for the answer.
#[utoipa::path(
        post,
        path = "/api/ask",
        request_body = AskParam,
        responses(
            (status = 200, description = "Streamed answer, or the no-answer message when search finds nothing"),
            (status = 400, description = "Malformed request body or generation failure"),
            (status = 402, description = "Missing or invalid payment token"),
            (status = 405, description = "Method not allowed"),
        )
    )]
pub async fn post_ask(
    State(state): State<Arc<ApiState>>,
    req: Request,
) -> ApiResponse<Response> {
    if req.method() != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .map(|header| header.to_string());

    let Some(token) = token else {
        return Err(ApiError::PaymentError("No Payment Token".to_string()));
    };

    if !is_valid_payment_token(&state.accept_tokens, &token) {
        return Err(ApiError::PaymentError("Invalid Token".to_string()));
    }
    debug!(task = "validate payment token");

    let fetch_url = search_url(&format!(
        "{}{}",
        state.config.server.base_url,
        req.uri().path()
    ));

    let bytes = to_bytes(req.into_body(), BODY_LIMIT).await.map_err(|e| {
        error!(task = "read request body", error = e.to_string());
        ApiError::ClientError("Malformed request".to_string())
    })?;
    let param = serde_json::from_slice::<AskParam>(&bytes).map_err(|e| {
        error!(task = "parse request body", error = e.to_string());
        ApiError::ClientError("Malformed request".to_string())
    })?;
    let (query, author) = (param.inputs.query, param.inputs.author);

    let results = state
        .search
        .fetch(&fetch_url, &query, author.as_deref())
        .await
        .map_err(|e| {
            error!(task = "fetch search results", error = e.to_string());
            ApiError::ServerError(e.to_string())
        })?;

    // A failed or empty search is "no answer", not an error
    let Some(results) = results.filter(|results| !results.is_empty())
    else {
        info!(task = "no search results", url = fetch_url);
        let body = message_stream(state.config.messages.no_answer.clone());
        return Ok(body.into_response());
    };

    let agent = QuestionAnswerAgent::new(
        state.openai.clone(),
        state.config.openai.model.clone(),
    );

    match agent.prompt(&results, &query).await {
        Ok(answer) => {
            let body = Body::from_stream(answer.map(|chunks| {
                chunks.map(|chunks| {
                    chunks.iter().map(|c| c.text()).collect::<String>()
                })
            }));
            Ok(body.into_response())
        }
        Err(e) => {
            error!(task = "generate answer", error = e.to_string());
            Err(ApiError::GenerationError(generation_error_message(
                e.to_string(),
                &state.config.messages.unknown,
            )))
        }
    }
}

/// Generation failures surface their own message; an empty one falls back
/// to the configured unknown-error sentinel.
fn generation_error_message(message: String, unknown: &str) -> String {
    if message.is_empty() {
        unknown.to_string()
    } else {
        message
    }
}

/// Derives the sibling search URL by rewriting the last path segment.
/// Not a general-purpose router: a URL with no path beyond the host
/// collapses badly, see the test below.
pub(crate) fn search_url(url: &str) -> String {
    let mut req_url = url.split('/').collect::<Vec<_>>();
    req_url.pop();
    req_url.push("search");
    req_url.join("/")
}

#[cfg(test)]
mod test {
    use super::{generation_error_message, search_url};

    #[test]
    fn test_search_url_rewrites_last_segment() {
        // Arrange
        let url = "https://host/api/server";

        // Act
        let derived = search_url(url);

        // Assert
        assert_eq!(derived, "https://host/api/search");
    }

    #[test]
    fn test_search_url_with_deeper_path() {
        // Arrange
        let url = "http://localhost:8000/api/ask";

        // Act
        let derived = search_url(url);

        // Assert
        assert_eq!(derived, "http://localhost:8000/api/search");
    }

    #[test]
    fn test_search_url_host_only_collapses() {
        // Arrange
        let url = "https://host";

        // Act
        let derived = search_url(url);

        // Assert
        // Known sharp edge: the host itself is treated as the last
        // segment and dropped.
        assert_eq!(derived, "https://search");
    }

    #[test]
    fn test_generation_error_message_passes_through() {
        // Arrange & Act
        let message =
            generation_error_message("boom".to_string(), "unknown error");

        // Assert
        assert_eq!(message, "boom");
    }

    #[test]
    fn test_generation_error_message_empty_falls_back_to_unknown() {
        // Arrange & Act
        let message =
            generation_error_message(String::new(), "unknown error");

        // Assert
        assert_eq!(message, "unknown error");
    }
}
