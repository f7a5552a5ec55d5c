use axum::response::{IntoResponse, Response};
use core_executor::error::ExecutionError;
use http::StatusCode;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum UIError {
    #[snafu(transparent)]
    Execution { source: ExecutionError },
}
pub type UIResult<T> = Result<T, UIError>;

pub(crate) trait IntoStatusCode {
    fn status_code(&self) -> StatusCode;
}

impl IntoStatusCode for UIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Execution { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Plain text, outside the page template.
impl IntoResponse for UIError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let reason = code.canonical_reason().unwrap_or_default();
        let body = format!("{} {reason}\n{self}", code.as_u16());
        (code, body).into_response()
    }
}
