use crate::ingest::{INSERT_MESSAGE, MessageRecord};
use crate::models::{Cell, Field, Row};
use crate::store::{DecodeSnafu, QueryCursor, Store, StoreConnection, StoreError, StoreResult};
use futures::StreamExt;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Decode, Executor, Row as _, TypeInfo, ValueRef};

/// Where the message log lives.
#[derive(Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub schema: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.schema)
            .charset("utf8mb4")
    }
}

/// Opens a fresh, unpooled connection for every request.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    config: StoreConfig,
}

impl MySqlStore {
    #[must_use]
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Store for MySqlStore {
    #[tracing::instrument(name = "MySqlStore::connect", level = "debug", skip(self), err)]
    async fn connect(&self) -> StoreResult<Box<dyn StoreConnection>> {
        let conn = MySqlConnection::connect_with(&self.config.connect_options()).await?;
        Ok(Box::new(MySqlStoreConnection { conn }))
    }
}

pub struct MySqlStoreConnection {
    conn: MySqlConnection,
}

#[async_trait::async_trait]
impl StoreConnection for MySqlStoreConnection {
    async fn execute<'c>(&'c mut self, query: &'c str) -> StoreResult<QueryCursor<'c>> {
        // Preparing the statement gives the column list up front, even for
        // results without rows. The rows themselves come over the text
        // protocol so every value arrives in the server's textual form.
        let described = (&mut self.conn).describe(query).await?;
        let fields = described
            .columns()
            .iter()
            .map(|column| Field::new(column.ordinal(), column.name(), column.type_info().name()))
            .collect();

        let rows = (&mut self.conn)
            .fetch(query)
            .map(|row| row.map_err(StoreError::from).and_then(|row| decode_row(&row)))
            .boxed();

        Ok(QueryCursor { fields, rows })
    }

    async fn insert_message(&mut self, record: &MessageRecord) -> StoreResult<()> {
        sqlx::query(INSERT_MESSAGE)
            .bind(record.dir.code())
            .bind(record.op.as_deref())
            .bind(record.s.as_deref())
            .bind(record.t.as_deref())
            .bind(record.raw.as_str())
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}

fn decode_row(row: &MySqlRow) -> StoreResult<Row> {
    (0..row.len())
        .map(|ordinal| {
            let value = row.try_get_raw(ordinal)?;
            if value.is_null() {
                return Ok(Cell::Null);
            }
            let bytes = <&[u8] as Decode<MySql>>::decode(value).map_err(|err| {
                DecodeSnafu {
                    ordinal,
                    message: err.to_string(),
                }
                .build()
            })?;
            Ok(Cell::Value(String::from_utf8_lossy(bytes).into_owned()))
        })
        .collect()
}
