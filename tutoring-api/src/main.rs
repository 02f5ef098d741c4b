//! tutoring-api - Teacher, student and class-session ledger service
//!
//! Serves the JSON API over HTTP. The SQLite store is created on first run and
//! its schema is (re)applied idempotently on every startup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutoring_api::api::buildinfo::BuildInfo;
use tutoring_api::{build_router, cors_layer, AppState};
use tutoring_common::config::{ConfigOverrides, ServiceConfig, TomlConfig};
use tutoring_common::db::init_database;

/// Command-line arguments for tutoring-api
#[derive(Parser, Debug)]
#[command(name = "tutoring-api")]
#[command(about = "Teacher, student and class-session ledger service")]
#[command(version)]
struct Args {
    /// SQLite database file (overrides TUTORING_DATABASE and config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to listen on (overrides TUTORING_BIND and config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "TUTORING_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    let overrides = ConfigOverrides {
        database_path: args.database,
        bind_addr: args.bind,
    };
    let config = ServiceConfig::resolve(&overrides, &toml);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting tutoring-api v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    info!("Database path: {}", config.database_path.display());

    let pool = match init_database(&config.database_path, config.db_options).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    let app = build_router(AppState::new(pool.clone()))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("tutoring-api listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
