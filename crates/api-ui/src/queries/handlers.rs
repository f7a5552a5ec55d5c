use crate::error::UIResult;
use crate::queries::models::QueryParams;
use crate::queries::page::query_page;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use core_executor::EmptyInputPolicy;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(index, query),
    components(schemas(QueryParams)),
    tags(
      (name = "queries", description = "Query pages"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    operation_id = "indexPage",
    tags = ["queries"],
    params(QueryParams),
    responses(
        (status = 200, description = "Result page, running the default query when none is given", content_type = "text/html", body = String),
        (status = 500, description = "Database unreachable", content_type = "text/plain", body = String),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err)]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> UIResult<Html<String>> {
    run_query_page(&state, params, &state.policies.index).await
}

#[utoipa::path(
    get,
    path = "/query",
    operation_id = "queryPage",
    tags = ["queries"],
    params(QueryParams),
    responses(
        (status = 200, description = "Result table, or the error the query ran into", content_type = "text/html", body = String),
        (status = 500, description = "Database unreachable", content_type = "text/plain", body = String),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err)]
pub async fn query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> UIResult<Html<String>> {
    run_query_page(&state, params, &state.policies.query).await
}

async fn run_query_page(
    state: &AppState,
    params: QueryParams,
    policy: &EmptyInputPolicy,
) -> UIResult<Html<String>> {
    let submission = state
        .executor
        .submit(params.query.as_deref(), policy)
        .await?;
    Ok(Html(query_page(
        &submission,
        &state.renderer,
        state.executor.limiter().max_rows(),
    )))
}
