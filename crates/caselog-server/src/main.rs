//! caselog-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays
//! `CASELOG_*` environment variables, opens the configured store and serves
//! the JSON API over HTTP.
//!
//! ```toml
//! host       = "127.0.0.1"
//! port       = 5000
//! backend    = "csv"          # or "sqlite"
//! store_path = "~/caselog/cases.csv"
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use caselog_core::{CaseLog, paths::expand_tilde, store::CaseStore};
use caselog_server::{Backend, ServerConfig};
use caselog_store_csv::CsvStore;
use caselog_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "caselog HTTP server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000)?
    .set_default("backend", "csv")?
    .set_default("store_path", "cases.csv")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CASELOG"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let address = server_cfg.address();

  match server_cfg.backend {
    Backend::Csv => serve(CsvStore::new(&store_path), &address).await,
    Backend::Sqlite => {
      let store = SqliteStore::open(&store_path)
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      serve(store, &address).await
    }
  }
}

async fn serve<S>(store: S, address: &str) -> anyhow::Result<()>
where
  S: CaseStore + 'static,
{
  let app = caselog_server::router(Arc::new(CaseLog::new(store)));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
