use crate::error::{ExecutionResult, FetchSnafu, RowWidthSnafu};
use crate::models::{Field, ResultSet, Row};
use crate::store::StoreResult;
use futures::{Stream, StreamExt};
use snafu::{ResultExt, ensure};

/// Upper bound on rows materialized for one query.
pub const MAX_ROWS: usize = 1000;

/// Pulls at most `max_rows` rows off a cursor and records whether more existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimiter {
    max_rows: usize,
}

impl Default for ResultLimiter {
    fn default() -> Self {
        Self::new(MAX_ROWS)
    }
}

impl ResultLimiter {
    /// A cap of zero is raised to one.
    #[must_use]
    pub fn new(max_rows: usize) -> Self {
        Self {
            max_rows: max_rows.max(1),
        }
    }

    #[must_use]
    pub const fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Consumes the row stream up to the cap.
    ///
    /// Past the cap exactly one more row is requested. Getting one means the
    /// result was cut short; the row itself is dropped.
    pub async fn collect<S>(&self, fields: Vec<Field>, mut rows: S) -> ExecutionResult<ResultSet>
    where
        S: Stream<Item = StoreResult<Row>> + Unpin,
    {
        let mut materialized = Vec::new();
        while materialized.len() < self.max_rows {
            let Some(row) = rows.next().await else {
                break;
            };
            let row = row.context(FetchSnafu)?;
            ensure!(
                row.len() == fields.len(),
                RowWidthSnafu {
                    row: materialized.len(),
                    width: row.len(),
                    fields: fields.len(),
                }
            );
            materialized.push(row);
        }

        let truncated = if materialized.len() == self.max_rows {
            matches!(rows.next().await, Some(Ok(_)))
        } else {
            false
        };
        if truncated {
            tracing::debug!(max_rows = self.max_rows, "result truncated");
        }

        Ok(ResultSet {
            fields,
            rows: materialized,
            truncated,
        })
    }
}
