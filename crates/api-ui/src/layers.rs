use axum::http::HeaderMap;
use axum::{middleware::Next, response::Response};
use http::HeaderValue;
use std::str::FromStr;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags each response with a request id, reusing the caller's when it is a
/// UUID.
pub async fn add_request_metadata(
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let request_id: Uuid = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|value| Uuid::from_str(value).ok())
        .unwrap_or_else(Uuid::now_v7);
    tracing::debug!(%request_id, method = %request.method(), uri = %request.uri(), "request");
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
