use crate::json::JsonError;
use crate::store::StoreError;
use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExecutionError {
    #[snafu(display("Failed to connect to database: {source}"))]
    Connect { source: StoreError },

    #[snafu(display("{source}"))]
    Execute { source: StoreError },

    #[snafu(display("{source}"))]
    Fetch { source: StoreError },

    #[snafu(display("Failed to store message: {source}"))]
    Insert { source: StoreError },

    #[snafu(display("Cannot decode message: {source}"))]
    Message { source: JsonError },

    #[snafu(display("Row {row} has {width} values but the result has {fields} fields"))]
    RowWidth {
        row: usize,
        width: usize,
        fields: usize,
    },
}

impl ExecutionError {
    /// Whether the store could not be reached at all, as opposed to a query
    /// the store refused or failed to complete.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
