use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
pub struct QueryParams {
    /// Query text. Absent or empty falls back to the endpoint's policy.
    pub query: Option<String>,
}
