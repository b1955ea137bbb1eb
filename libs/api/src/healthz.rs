use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub(super) async fn get_health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
