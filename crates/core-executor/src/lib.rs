pub mod analysis;
pub mod error;
pub mod ingest;
pub mod json;
pub mod limiter;
pub mod memory;
pub mod models;
pub mod mysql;
pub mod service;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use ingest::{Direction, MessageRecord};
pub use limiter::{MAX_ROWS, ResultLimiter};
pub use models::{Cell, EmptyInputPolicy, Field, QueryOutcome, ResultSet, Row};
pub use service::{QueryExecutor, Submission};
pub use store::{QueryCursor, Store, StoreConnection, StoreError};
