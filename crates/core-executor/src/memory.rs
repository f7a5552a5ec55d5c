use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream;

use crate::ingest::MessageRecord;
use crate::models::{Field, Row};
use crate::store::{QueryCursor, Store, StoreConnection, StoreError, StoreResult};

#[derive(Debug, Clone)]
enum Canned {
    Rows { fields: Vec<Field>, rows: Vec<Row> },
    Error(String),
}

#[derive(Debug, Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    pulled: AtomicUsize,
    inserted: Mutex<Vec<MessageRecord>>,
}

/// Store that answers a fixed set of queries from memory.
///
/// Queries are matched by their exact text. Unknown text is answered with a
/// syntax error, the way a real server would answer gibberish.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    answers: HashMap<String, Canned>,
    unreachable: Option<String>,
    insert_error: Option<String>,
    counters: Arc<Counters>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store every connection attempt to fails with `message`.
    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            unreachable: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rows(mut self, query: impl Into<String>, fields: Vec<Field>, rows: Vec<Row>) -> Self {
        self.answers
            .insert(query.into(), Canned::Rows { fields, rows });
        self
    }

    #[must_use]
    pub fn with_error(mut self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.answers
            .insert(query.into(), Canned::Error(message.into()));
        self
    }

    /// A store refusing every insert with `message`.
    #[must_use]
    pub fn with_insert_error(mut self, message: impl Into<String>) -> Self {
        self.insert_error = Some(message.into());
        self
    }

    /// Messages inserted so far, in order.
    #[must_use]
    pub fn inserted(&self) -> Vec<MessageRecord> {
        self.counters
            .inserted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Connections handed out so far.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Connections closed through `StoreConnection::close`.
    #[must_use]
    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Rows pulled off cursors so far, across all connections.
    #[must_use]
    pub fn pulled(&self) -> usize {
        self.counters.pulled.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn connect(&self) -> StoreResult<Box<dyn StoreConnection>> {
        if let Some(message) = &self.unreachable {
            return Err(StoreError::Unavailable {
                message: message.clone(),
            });
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryConnection {
            answers: self.answers.clone(),
            insert_error: self.insert_error.clone(),
            counters: self.counters.clone(),
        }))
    }
}

struct MemoryConnection {
    answers: HashMap<String, Canned>,
    insert_error: Option<String>,
    counters: Arc<Counters>,
}

#[async_trait::async_trait]
impl StoreConnection for MemoryConnection {
    async fn execute<'c>(&'c mut self, query: &'c str) -> StoreResult<QueryCursor<'c>> {
        match self.answers.get(query) {
            Some(Canned::Rows { fields, rows }) => {
                let counters = self.counters.clone();
                let rows = stream::iter(rows.clone().into_iter().map(move |row| {
                    counters.pulled.fetch_add(1, Ordering::SeqCst);
                    Ok(row)
                }));
                Ok(QueryCursor {
                    fields: fields.clone(),
                    rows: Box::pin(rows),
                })
            }
            Some(Canned::Error(message)) => Err(StoreError::Database {
                message: message.clone(),
            }),
            None => Err(StoreError::Database {
                message: format!(
                    "You have an error in your SQL syntax; check the manual that corresponds \
                     to your MySQL server version for the right syntax to use near '{query}' \
                     at line 1"
                ),
            }),
        }
    }

    async fn insert_message(&mut self, record: &MessageRecord) -> StoreResult<()> {
        if let Some(message) = &self.insert_error {
            return Err(StoreError::Database {
                message: message.clone(),
            });
        }
        self.counters
            .inserted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
