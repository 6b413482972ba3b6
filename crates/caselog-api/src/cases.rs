//! Handlers for `/cases` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/cases`      | Every case, in store order |
//! | `POST`   | `/cases`      | Body: [`CaseFields`]; 201 |
//! | `GET`    | `/cases/{id}` | 404 if not found |
//! | `PUT`    | `/cases/{id}` | Body: [`CaseFields`]; 404 if not found |
//! | `DELETE` | `/cases/{id}` | 204, also for unknown ids |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use caselog_core::{Case, CaseFields, CaseId, CaseLog, store::CaseStore};

use crate::{blocking, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /cases`
pub async fn list<S>(State(log): State<Arc<CaseLog<S>>>) -> Result<Json<Vec<Case>>, ApiError>
where
  S: CaseStore + 'static,
{
  let cases = blocking(&log, |log| log.list_all()).await?;
  Ok(Json(cases))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /cases`
pub async fn create<S>(
  State(log): State<Arc<CaseLog<S>>>,
  Json(fields): Json<CaseFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore + 'static,
{
  let case = blocking(&log, move |log| log.create(&fields)).await?;
  tracing::info!(case_id = %case.case_id, "case created");
  Ok((StatusCode::CREATED, Json(case)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /cases/{id}`
pub async fn get_one<S>(
  State(log): State<Arc<CaseLog<S>>>,
  Path(id): Path<CaseId>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore + 'static,
{
  let case = blocking(&log, move |log| log.get(&id)).await?;
  Ok(Json(case))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /cases/{id}`
pub async fn update<S>(
  State(log): State<Arc<CaseLog<S>>>,
  Path(id): Path<CaseId>,
  Json(fields): Json<CaseFields>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore + 'static,
{
  let case = blocking(&log, move |log| log.update(&id, &fields)).await?;
  Ok(Json(case))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /cases/{id}`
pub async fn delete<S>(
  State(log): State<Arc<CaseLog<S>>>,
  Path(id): Path<CaseId>,
) -> Result<StatusCode, ApiError>
where
  S: CaseStore + 'static,
{
  blocking(&log, move |log| log.delete(&id)).await?;
  Ok(StatusCode::NO_CONTENT)
}
