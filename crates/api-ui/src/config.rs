use core_executor::EmptyInputPolicy;

/// Query shown when the index page is opened without one.
pub const DEFAULT_QUERY: &str = "SELECT dir, op, t, s FROM message WHERE op != 1";

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Empty-input policy per query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPolicies {
    /// `GET /`
    pub index: EmptyInputPolicy,
    /// `GET /query`
    pub query: EmptyInputPolicy,
}

impl QueryPolicies {
    /// The index always falls back to `default_query`; `/query` does what `query` says.
    #[must_use]
    pub fn new(default_query: impl Into<String>, query: EmptyInputPolicy) -> Self {
        Self {
            index: EmptyInputPolicy::UseDefault(default_query.into()),
            query,
        }
    }
}

impl Default for QueryPolicies {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY, EmptyInputPolicy::Reject)
    }
}
