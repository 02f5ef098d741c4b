//! tutoring-seed - one-shot import of a legacy database into the ledger store
//!
//! The legacy file is opened read-only. The target store is created if missing.
//! The whole import is one transaction: on any error nothing is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tutoring_api::api::buildinfo::BuildInfo;
use tutoring_api::db::connect_readonly;
use tutoring_api::seed::import_legacy;
use tutoring_common::config::{ConfigOverrides, ServiceConfig, TomlConfig};
use tutoring_common::db::init_database;

#[derive(Parser, Debug)]
#[command(name = "tutoring-seed")]
#[command(about = "Import teachers, rates, students and class records from a legacy database")]
#[command(version)]
struct Args {
    /// Legacy SQLite database to read from
    #[arg(short, long, default_value = "data.db")]
    source: PathBuf,

    /// Target database (overrides TUTORING_DATABASE and config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

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
        bind_addr: None,
    };
    let config = ServiceConfig::resolve(&overrides, &toml);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting tutoring-seed v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    info!("Source: {}", args.source.display());
    info!("Target: {}", config.database_path.display());

    let source = connect_readonly(&args.source)
        .await
        .context("Failed to open legacy database")?;
    let target = init_database(&config.database_path, config.db_options)
        .await
        .context("Failed to open target database")?;

    let report = import_legacy(&source, &target)
        .await
        .context("Legacy import failed; target database left unchanged")?;

    info!(
        "Imported {} teachers, {} rates, {} students, {} class records",
        report.teachers, report.rates, report.students, report.class_records
    );

    source.close().await;
    target.close().await;
    Ok(())
}
