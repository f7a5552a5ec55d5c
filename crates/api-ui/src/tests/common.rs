#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::{HeaderMap, StatusCode};
use std::net::SocketAddr;

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn content_type(&self) -> &str {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

/// GETs `path`, passing `query` as the `query` parameter when given.
pub async fn http_get(addr: SocketAddr, path: &str, query: Option<&str>) -> TestResponse {
    http_get_with_headers(addr, path, query, HeaderMap::new()).await
}

pub async fn http_get_with_headers(
    addr: SocketAddr,
    path: &str,
    query: Option<&str>,
    headers: HeaderMap,
) -> TestResponse {
    let client = reqwest::Client::new();
    let mut request = client.get(format!("http://{addr}{path}")).headers(headers);
    if let Some(query) = query {
        request = request.query(&[("query", query)]);
    }
    let response = request.send().await.expect("Request failed");
    eprintln!("req: GET {path} {query:?}, {}", response.status());

    TestResponse {
        status: response.status(),
        headers: response.headers().clone(),
        body: response.text().await.expect("Failed to get response text"),
    }
}
