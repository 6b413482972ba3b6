//! JSON REST API for the case log.
//!
//! Exposes an axum [`Router`] backed by a [`CaseLog`] over any
//! [`CaseStore`]. Store calls are blocking, so every handler runs them on
//! tokio's blocking pool.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", caselog_api::api_router(Arc::new(CaseLog::new(store))))
//! ```

pub mod cases;
pub mod counts;
pub mod error;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use caselog_core::{CaseLog, store::CaseStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `log`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(log: Arc<CaseLog<S>>) -> Router<()>
where
  S: CaseStore + 'static,
{
  Router::new()
    // Cases
    .route("/cases", get(cases::list::<S>).post(cases::create::<S>))
    .route(
      "/cases/{id}",
      get(cases::get_one::<S>)
        .put(cases::update::<S>)
        .delete(cases::delete::<S>),
    )
    // Lookups
    .route("/search", get(search::handler::<S>))
    .route("/counts", get(counts::handler::<S>))
    .with_state(log)
}

/// Run `op` against `log` on the blocking pool.
pub(crate) async fn blocking<S, T, F>(log: &Arc<CaseLog<S>>, op: F) -> Result<T, ApiError>
where
  S: CaseStore + 'static,
  T: Send + 'static,
  F: FnOnce(&CaseLog<S>) -> caselog_core::Result<T> + Send + 'static,
{
  let log = Arc::clone(log);
  let result = tokio::task::spawn_blocking(move || op(&log)).await?;
  Ok(result?)
}

#[cfg(test)]
mod tests;
