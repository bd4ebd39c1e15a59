//! Traveller - Relay GraphQL backend for Traveller campaigns.
//!
//! # Usage
//!
//! ```bash
//! # Start with default config
//! traveller
//!
//! # Start with environment overrides
//! DATABASE_URL=postgres://localhost/traveller PAGINATION_MODE=paged traveller
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use traveller_core::metrics::init_metrics;
use traveller_core::ports::{PaginationMode, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use traveller_graphql::{build_schema, serve_with_shutdown, RelayConfig, ServerConfig};
use traveller_storage::{Database, DatabaseConfig, PgRepositories};

/// Traveller CLI - campaign backend.
#[derive(Parser, Debug)]
#[command(name = "traveller")]
#[command(about = "Traveller - Relay GraphQL backend for tabletop campaigns")]
#[command(version)]
struct Cli {
    /// PostgreSQL database URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost/traveller"
    )]
    database_url: String,

    /// GraphQL server bind address.
    #[arg(long, env = "GRAPHQL_HOST", default_value = "0.0.0.0")]
    graphql_host: String,

    /// GraphQL server port.
    #[arg(long, env = "GRAPHQL_PORT", default_value = "4000")]
    graphql_port: u16,

    /// Disable the GraphiQL playground.
    #[arg(long, env = "DISABLE_PLAYGROUND")]
    disable_playground: bool,

    /// Prometheus metrics port.
    #[arg(long, env = "METRICS_PORT", default_value = "9090")]
    metrics_port: u16,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Run database migrations and exit.
    #[arg(long)]
    migrate_only: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Connection pagination: materialized (slice in memory) or paged (offset/limit in SQL).
    #[arg(long, env = "PAGINATION_MODE", default_value = "materialized", value_parser = parse_pagination_mode)]
    pagination_mode: PaginationMode,

    /// Reject `first` together with `last` (and mixed cursor directions).
    #[arg(long, env = "STRICT_PAGINATION")]
    strict_pagination: bool,

    /// Page size used in paged mode when neither `first` nor `last` is given.
    #[arg(long, env = "DEFAULT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    default_page_size: usize,
}

/// Parse pagination mode from string.
fn parse_pagination_mode(s: &str) -> Result<PaginationMode, String> {
    match s.to_lowercase().as_str() {
        "materialized" => Ok(PaginationMode::Materialized),
        "paged" => Ok(PaginationMode::Paged),
        _ => Err(format!(
            "Invalid pagination mode '{}'. Use 'materialized' or 'paged'.",
            s
        )),
    }
}

/// Parse a page size, bounded to `1..=MAX_PAGE_SIZE`.
fn parse_page_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|_| format!("Invalid page size '{}'. Expected a positive integer.", s))?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(format!(
            "Invalid page size '{}'. Use a value between 1 and {}.",
            s, MAX_PAGE_SIZE
        ));
    }
    Ok(size)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    // Prometheus metrics exporter (optional - failures don't crash the app)
    let metrics_enabled =
        match format!("0.0.0.0:{}", cli.metrics_port).parse::<std::net::SocketAddr>() {
            Ok(metrics_addr) => {
                match PrometheusBuilder::new()
                    .with_http_listener(metrics_addr)
                    .install()
                {
                    Ok(()) => {
                        init_metrics();
                        true
                    }
                    Err(e) => {
                        warn!("⚠️  Failed to start metrics exporter: {}. Continuing without metrics.", e);
                        false
                    }
                }
            }
            Err(e) => {
                warn!("⚠️  Invalid metrics address: {}. Continuing without metrics.", e);
                false
            }
        };

    // ─────────────────────────────────────────────────────────────────────────
    // 🚀 STARTUP
    // ─────────────────────────────────────────────────────────────────────────
    info!("🚀 Starting Traveller backend");
    debug!(database_url = %mask_password(&cli.database_url), "Database endpoint");

    // ─────────────────────────────────────────────────────────────────────────
    // 🗄️ DATABASE
    // ─────────────────────────────────────────────────────────────────────────
    let db_config = if cli.migrate_only {
        DatabaseConfig::for_maintenance(&cli.database_url)
    } else {
        DatabaseConfig::for_graphql(&cli.database_url)
    };

    info!("🗄️  Connecting to database...");
    let db = Database::connect(&db_config)
        .await
        .context("Failed to connect to database")?;

    db.migrate().await.context("Failed to run migrations")?;
    if !db.is_healthy().await {
        warn!("⚠️  Database did not answer the health probe after migrations");
    }
    info!("🗄️  Database ready (migrations applied)");

    if cli.migrate_only {
        info!("🛑 --migrate-only flag set, exiting");
        db.close().await;
        return Ok(());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // ⚡ GRAPHQL
    // ─────────────────────────────────────────────────────────────────────────
    let repositories = Arc::new(PgRepositories::new(&db));
    let relay = RelayConfig {
        mode: cli.pagination_mode,
        strict: cli.strict_pagination,
        default_page_size: cli.default_page_size,
    };
    debug!(mode = ?relay.mode, strict = relay.strict, "Relay pagination");

    let schema = build_schema(repositories, relay);
    let server_config = ServerConfig {
        host: cli.graphql_host.clone(),
        port: cli.graphql_port,
        enable_playground: !cli.disable_playground,
    };

    // ─────────────────────────────────────────────────────────────────────────
    // ✅ READY
    // ─────────────────────────────────────────────────────────────────────────
    info!("✅ Traveller ready");
    info!("   ⚡ GraphQL:  http://localhost:{}/graphql", cli.graphql_port);
    if metrics_enabled {
        info!(
            "   📊 Metrics:  http://localhost:{}/metrics",
            cli.metrics_port
        );
    } else {
        info!("   📊 Metrics:  disabled");
    }
    info!("   Press Ctrl+C to stop");

    if let Err(e) = serve_with_shutdown(schema, server_config, shutdown_signal()).await {
        error!(error = %e, "❌ Server error");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 🛑 SHUTDOWN
    // ─────────────────────────────────────────────────────────────────────────
    info!("🛑 Shutting down...");
    db.close().await;

    info!("🛑 Shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// Mask password in database URL for logging.
fn mask_password(url_str: &str) -> String {
    match url::Url::parse(url_str) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("****"));
            }
            url.to_string()
        }
        Err(_) => url_str.to_string(),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
