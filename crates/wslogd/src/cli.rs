use api_ui::config::{DEFAULT_QUERY, QueryPolicies, WebConfig};
use clap::{Parser, ValueEnum};
use core_executor::mysql::StoreConfig;
use core_executor::{EmptyInputPolicy, MAX_ROWS};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        long,
        env = "DB_HOST",
        default_value = "localhost",
        help = "MySQL host",
        help_heading = "Database Options"
    )]
    pub db_host: String,

    #[arg(
        long,
        env = "DB_PORT",
        default_value = "3306",
        help = "MySQL port",
        help_heading = "Database Options"
    )]
    pub db_port: u16,

    #[arg(
        long,
        env = "DB_USER",
        help = "MySQL user",
        help_heading = "Database Options"
    )]
    pub db_user: String,

    #[arg(
        long,
        env = "DB_PASSWORD",
        hide_env_values = true,
        default_value = "",
        help = "MySQL password",
        help_heading = "Database Options"
    )]
    db_password: String,

    #[arg(
        long,
        env = "DB_SCHEMA",
        help = "Schema holding the message table",
        help_heading = "Database Options"
    )]
    pub db_schema: String,

    #[arg(
        long,
        env = "WSLOG_HOST",
        default_value = "localhost",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(long, env = "WSLOG_PORT", default_value = "3000", help = "Port to bind to")]
    pub port: u16,

    #[arg(
        long,
        env = "WSLOG_DEFAULT_QUERY",
        default_value = DEFAULT_QUERY,
        help = "Query the index page runs when none is given"
    )]
    pub default_query: String,

    #[arg(
        long,
        value_enum,
        env = "WSLOG_QUERY_ON_EMPTY",
        default_value = "reject",
        help = "What /query does with an empty query"
    )]
    pub query_on_empty: QueryOnEmpty,

    #[arg(
        long,
        env = "WSLOG_MAX_ROWS",
        default_value_t = MAX_ROWS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        help = "Rows shown before a result is truncated"
    )]
    pub max_rows: usize,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overrided by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

impl CliOpts {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            schema: self.db_schema.clone(),
        }
    }

    pub fn web_config(&self) -> WebConfig {
        WebConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }

    pub fn query_policies(&self) -> QueryPolicies {
        let query = match self.query_on_empty {
            QueryOnEmpty::Default => EmptyInputPolicy::UseDefault(self.default_query.clone()),
            QueryOnEmpty::Reject => EmptyInputPolicy::Reject,
        };
        QueryPolicies::new(self.default_query.clone(), query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryOnEmpty {
    /// Run the default query
    Default,
    /// Ask for a query
    Reject,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TracingLevel {
    Off,
    Info,
    Debug,
    Trace,
}

#[allow(clippy::from_over_into)]
impl Into<LevelFilter> for TracingLevel {
    fn into(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}
