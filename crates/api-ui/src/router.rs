use crate::analysis::handlers::{ApiDoc as AnalysisApiDoc, analyze};
use crate::layers::add_request_metadata;
use crate::page::STYLESHEET;
use crate::queries::handlers::{ApiDoc as QueryApiDoc, index, query};
use crate::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use http::header;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WebSocket Log UI",
        description = "Pages for browsing the logged WebSocket messages.",
        version = "0.1.0",
        license(
            name = "Apache 2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        ),
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn ui_open_api_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(QueryApiDoc::openapi())
        .merge_from(AnalysisApiDoc::openapi())
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/query", get(query))
        .route("/analyze", get(analyze))
        .route(
            "/style",
            get(|| async { ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET) }),
        )
        .route("/health", get(|| async { Json("OK") }))
        .route(
            "/openapi.json",
            get(|| async { Json(ui_open_api_spec()) }),
        )
        .layer(axum::middleware::from_fn(add_request_metadata))
}
