use crate::ingest::MessageRecord;
use crate::models::{Field, Row};
use futures::stream::BoxStream;
use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    /// Error reported by the server itself, carrying its literal text.
    #[snafu(display("{message}"))]
    Database { message: String },

    #[snafu(display("{source}"))]
    Driver { source: sqlx::Error },

    #[snafu(display("Cannot decode value of column {ordinal}: {message}"))]
    Decode { ordinal: usize, message: String },

    #[snafu(display("{message}"))]
    Unavailable { message: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(db_error) => Self::Database {
                message: db_error.message().to_string(),
            },
            source => Self::Driver { source },
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Forward-only source of rows for one executed query.
///
/// `fields` is fixed before the first row is pulled and stays valid for the
/// whole life of the cursor.
pub struct QueryCursor<'c> {
    pub fields: Vec<Field>,
    pub rows: BoxStream<'c, StoreResult<Row>>,
}

impl std::fmt::Debug for QueryCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCursor")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// A relational store able to hand out one connection per request.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn connect(&self) -> StoreResult<Box<dyn StoreConnection>>;
}

#[async_trait::async_trait]
pub trait StoreConnection: Send {
    /// Runs `query` and returns its schema plus a lazy row stream.
    async fn execute<'c>(&'c mut self, query: &'c str) -> StoreResult<QueryCursor<'c>>;

    /// Appends one logged message to the `message` table.
    async fn insert_message(&mut self, record: &MessageRecord) -> StoreResult<()>;

    /// Releases the connection. Dropping without calling this still frees it,
    /// only less politely.
    async fn close(self: Box<Self>) -> StoreResult<()>;
}
