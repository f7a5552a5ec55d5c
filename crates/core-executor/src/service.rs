use std::sync::Arc;

use futures::StreamExt;
use snafu::ResultExt;

use crate::error::{self as ex_error, ExecutionResult};
use crate::ingest::MessageRecord;
use crate::limiter::ResultLimiter;
use crate::models::{
    EMPTY_RESULT_MESSAGE, EmptyInputPolicy, Field, QueryOutcome, ResultSet, Row,
};
use crate::store::{Store, StoreConnection};

/// A query as it was finally run, next to what came of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Text to echo back into the form.
    pub query: String,
    pub outcome: QueryOutcome,
}

/// Runs operator queries, one connection per call.
pub struct QueryExecutor {
    store: Arc<dyn Store>,
    limiter: ResultLimiter,
}

impl QueryExecutor {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            limiter: ResultLimiter::default(),
        }
    }

    #[must_use]
    pub const fn with_limiter(mut self, limiter: ResultLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    #[must_use]
    pub const fn limiter(&self) -> ResultLimiter {
        self.limiter
    }

    /// Applies `policy` to the submitted text, then runs whatever it resolves to.
    pub async fn submit(
        &self,
        submitted: Option<&str>,
        policy: &EmptyInputPolicy,
    ) -> ExecutionResult<Submission> {
        let Some(query) = policy.resolve(submitted) else {
            return Ok(Submission {
                query: submitted.unwrap_or_default().to_string(),
                outcome: QueryOutcome::EmptyInput,
            });
        };
        let outcome = self.run(&query).await?;
        Ok(Submission { query, outcome })
    }

    /// Executes `query` and bounds its result.
    ///
    /// Only a failure to reach the store is returned as `Err`. Anything the
    /// store says about the query itself ends up in `QueryOutcome::Failure`.
    #[tracing::instrument(name = "QueryExecutor::run", level = "debug", skip(self), err)]
    pub async fn run(&self, query: &str) -> ExecutionResult<QueryOutcome> {
        if query.is_empty() {
            return Ok(QueryOutcome::EmptyInput);
        }

        let mut conn = self.connect().await?;
        let result = self.execute_limited(conn.as_mut(), query).await;
        release(conn).await;

        Ok(match result {
            Ok(result_set) if result_set.rows.is_empty() => {
                QueryOutcome::Failure(EMPTY_RESULT_MESSAGE.to_string())
            }
            Ok(result_set) => {
                tracing::debug!(
                    rows = result_set.row_count(),
                    truncated = result_set.truncated,
                    "query succeeded"
                );
                QueryOutcome::Success(result_set)
            }
            Err(err) => {
                tracing::warn!("query failed: {err}");
                QueryOutcome::Failure(err.to_string())
            }
        })
    }

    /// Streams every row of `query` through `visit` without any row cap,
    /// returning how many rows were visited.
    #[tracing::instrument(name = "QueryExecutor::scan", level = "debug", skip(self, visit), err)]
    pub async fn scan<F>(&self, query: &str, mut visit: F) -> ExecutionResult<usize>
    where
        F: FnMut(&[Field], Row) + Send,
    {
        let mut conn = self.connect().await?;
        let result = async {
            let mut cursor = conn.execute(query).await.context(ex_error::ExecuteSnafu)?;
            let mut visited = 0;
            while let Some(row) = cursor.rows.next().await {
                let row = row.context(ex_error::FetchSnafu)?;
                snafu::ensure!(
                    row.len() == cursor.fields.len(),
                    ex_error::RowWidthSnafu {
                        row: visited,
                        width: row.len(),
                        fields: cursor.fields.len(),
                    }
                );
                visit(&cursor.fields, row);
                visited += 1;
            }
            Ok::<_, ex_error::ExecutionError>(visited)
        }
        .await;
        release(conn).await;
        result
    }

    /// Redacts one WebSocket frame and appends it to the message log.
    #[tracing::instrument(name = "QueryExecutor::log_message", level = "debug", skip(self, raw), err)]
    pub async fn log_message(&self, is_send: bool, raw: &str) -> ExecutionResult<MessageRecord> {
        let record = MessageRecord::from_raw(is_send, raw).context(ex_error::MessageSnafu)?;
        self.insert(&record).await?;
        Ok(record)
    }

    pub async fn insert(&self, record: &MessageRecord) -> ExecutionResult<()> {
        let mut conn = self.connect().await?;
        let inserted = conn
            .insert_message(record)
            .await
            .context(ex_error::InsertSnafu);
        release(conn).await;
        inserted
    }

    async fn connect(&self) -> ExecutionResult<Box<dyn StoreConnection>> {
        self.store
            .connect()
            .await
            .inspect_err(|err| tracing::error!("cannot connect to store: {err}"))
            .context(ex_error::ConnectSnafu)
    }

    async fn execute_limited(
        &self,
        conn: &mut dyn StoreConnection,
        query: &str,
    ) -> ExecutionResult<ResultSet> {
        let cursor = conn.execute(query).await.context(ex_error::ExecuteSnafu)?;
        self.limiter.collect(cursor.fields, cursor.rows).await
    }
}

async fn release(conn: Box<dyn StoreConnection>) {
    if let Err(err) = conn.close().await {
        tracing::warn!("failed to close store connection: {err}");
    }
}
