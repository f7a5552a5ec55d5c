pub(crate) mod cli;

use api_ui::router::create_router;
use api_ui::state::AppState;
use clap::Parser;
use core_executor::mysql::MySqlStore;
use core_executor::{QueryExecutor, ResultLimiter};
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const TARGETS: [&str; 3] = ["wslogd", "api_ui", "core_executor"];

#[tokio::main]
#[allow(clippy::expect_used)]
async fn main() {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    let store_config = opts.store_config();
    let web_config = opts.web_config();
    tracing::info!(?store_config, "message log store");

    let store = Arc::new(MySqlStore::new(store_config));
    let executor =
        QueryExecutor::new(store).with_limiter(ResultLimiter::new(opts.max_rows));
    let state = AppState::new(Arc::new(executor), Arc::new(opts.query_policies()));

    let router = create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(1200)))
        .layer(CatchPanicLayer::new())
        .into_make_service_with_connect_info::<SocketAddr>();

    let host = web_config.host;
    let port = web_config.port;
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to get local address");
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };
    let level: LevelFilter = opts.tracing_level.clone().into();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(LevelFilter::DEBUG))
                                .with_default(LevelFilter::DEBUG)
                        }
                    },
                    // No var set: use the --tracing-level
                    _ => Targets::default()
                        .with_targets(targets_with_level(level))
                        .with_default(LevelFilter::WARN.min(level)),
                }),
        )
        .init();
}

/// Waits for either a Ctrl+C or a SIGTERM signal.
///
/// # Panics
/// If the function fails to install the signal handler, it will panic.
#[allow(clippy::expect_used, clippy::redundant_pub_crate)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::warn!("Ctrl+C received, starting graceful shutdown");
        },
        () = terminate => {
            tracing::warn!("SIGTERM received, starting graceful shutdown");
        },
    }
}
