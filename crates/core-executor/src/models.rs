/// Message shown when a query ran without error but matched nothing.
pub const EMPTY_RESULT_MESSAGE: &str = "Query returned an empty set of results.";

/// Message shown when there is no query text to run.
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide a query.";

/// Schema metadata of one output column.
///
/// Names may repeat within a result (`SELECT a, a FROM t`), so the position
/// is what ties a field to the values of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub index: usize,
    pub name: String,
    pub r#type: String,
}

impl Field {
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            r#type: r#type.into(),
        }
    }
}

/// A single value as delivered by the store, in its textual representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Null,
    Value(String),
}

impl Cell {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One record, positionally aligned with the result's fields.
pub type Row = Vec<Cell>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub fields: Vec<Field>,
    pub rows: Vec<Row>,
    /// Set when the store had more rows than were materialized.
    pub truncated: bool,
}

impl ResultSet {
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The single result of submitting one query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Success(ResultSet),
    Failure(String),
    EmptyInput,
}

impl QueryOutcome {
    /// Message to show instead of a table, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
            Self::EmptyInput => Some(EMPTY_INPUT_MESSAGE),
        }
    }
}

/// What to do when a request carries no query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyInputPolicy {
    UseDefault(String),
    Reject,
}

impl EmptyInputPolicy {
    /// Picks the query text to run. `None` means the input is rejected.
    #[must_use]
    pub fn resolve(&self, submitted: Option<&str>) -> Option<String> {
        match (submitted, self) {
            (Some(query), _) if !query.is_empty() => Some(query.to_string()),
            (_, Self::UseDefault(default)) if !default.is_empty() => Some(default.clone()),
            _ => None,
        }
    }
}
