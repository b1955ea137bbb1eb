use std::convert::Infallible;

use async_stream::stream;
use axum::body::{Body, Bytes};

/// Wraps a canned message into a single-chunk body stream, so that the
/// no-answer path has the same shape as a generated answer.
pub fn message_stream(message: String) -> Body {
    Body::from_stream(stream! {
        yield Ok::<_, Infallible>(Bytes::from(message));
    })
}
