//! HTTP front end for the case log.
//!
//! Wraps [`caselog_api::api_router`] with request tracing and defines the
//! configuration the `caselog-server` binary reads.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use caselog_core::{CaseLog, store::CaseStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`CaseStore`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  Csv,
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `CASELOG_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub backend:    Backend,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router for `log`, with one tracing span per request.
pub fn router<S>(log: Arc<CaseLog<S>>) -> Router
where
  S: CaseStore + 'static,
{
  caselog_api::api_router(log).layer(TraceLayer::new_for_http())
}
