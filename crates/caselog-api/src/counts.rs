//! Handler for `GET /counts`: the counters a form would show before saving.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use caselog_core::{CaseId, CaseLog, Counts, store::CaseStore};
use serde::Deserialize;

use crate::{blocking, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct CountsParams {
  #[serde(default)]
  pub phone:   String,
  #[serde(default)]
  pub email:   String,
  /// Id of the stored case being edited; omit for a new case.
  pub case_id: Option<CaseId>,
}

/// `GET /counts[?phone=...][&email=...][&case_id=...]`
pub async fn handler<S>(
  State(log): State<Arc<CaseLog<S>>>,
  Query(params): Query<CountsParams>,
) -> Result<Json<Counts>, ApiError>
where
  S: CaseStore + 'static,
{
  let counts = blocking(&log, move |log| {
    log.preview_counts(params.case_id.as_ref(), &params.phone, &params.email)
  })
  .await?;
  Ok(Json(counts))
}
