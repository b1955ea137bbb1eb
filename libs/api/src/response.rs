use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({"message": "Method not allowed"})),
            )
                .into_response(),
            ApiError::PaymentError(message) => (
                StatusCode::PAYMENT_REQUIRED,
                Json(json!({"message": message})),
            )
                .into_response(),
            ApiError::ClientError(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
                    .into_response()
            }
            ApiError::GenerationError(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
                    .into_response()
            }
            ApiError::ServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": message})),
            )
                .into_response(),
        }
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

#[cfg(test)]
mod test {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};

    use crate::ApiError;

    #[tokio::test]
    async fn test_method_not_allowed_body() {
        // Arrange
        let error = ApiError::MethodNotAllowed;

        // Act
        let response = error.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"message":"Method not allowed"}"#);
    }

    #[tokio::test]
    async fn test_payment_error_status() {
        // Arrange
        let error = ApiError::PaymentError("No Payment Token".to_string());

        // Act
        let response = error.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"message":"No Payment Token"}"#);
    }

    #[tokio::test]
    async fn test_generation_error_body_uses_error_key() {
        // Arrange
        let error = ApiError::GenerationError("boom".to_string());

        // Act
        let response = error.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"boom"}"#);
    }
}
