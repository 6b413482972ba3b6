//! Handler for `GET /search`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use caselog_core::{Case, CaseLog, store::CaseStore};
use serde::Deserialize;

use crate::{blocking, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Substring, or a glob when it contains `*`. Missing is the same as empty.
  #[serde(default)]
  pub q: String,
}

/// `GET /search?q=<query>`
pub async fn handler<S>(
  State(log): State<Arc<CaseLog<S>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Case>>, ApiError>
where
  S: CaseStore + 'static,
{
  let cases = blocking(&log, move |log| log.search(&params.q)).await?;
  Ok(Json(cases))
}
