use crate::analysis::page::{failed_profile_page, profile_page};
use crate::error::UIResult;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;
use core_executor::analysis::{MessageProfile, PROFILE_QUERY};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(analyze),
    tags(
      (name = "analysis", description = "Message log profile"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/analyze",
    operation_id = "analyzePage",
    tags = ["analysis"],
    responses(
        (status = 200, description = "Structure of the received messages, per event", content_type = "text/html", body = String),
        (status = 500, description = "Database unreachable", content_type = "text/plain", body = String),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err)]
pub async fn analyze(State(state): State<AppState>) -> UIResult<Html<String>> {
    let mut profile = MessageProfile::new();
    let scanned = state
        .executor
        .scan(PROFILE_QUERY, |fields, row| profile.observe_row(fields, &row))
        .await;
    match scanned {
        Ok(rows) => {
            tracing::debug!(
                rows,
                profiled = profile.profiled,
                undecodable = profile.undecodable,
                "message log profiled"
            );
            Ok(Html(profile_page(&profile)))
        }
        Err(err) if err.is_connection_failure() => Err(err.into()),
        Err(err) => Ok(Html(failed_profile_page(&err.to_string()))),
    }
}
