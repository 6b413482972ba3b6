//! Error types for `caselog-core`.

use thiserror::Error;

use crate::case::CaseId;

#[derive(Debug, Error)]
pub enum Error {
  /// A submitted field failed validation (e.g. it is too long).
  #[error("invalid {field}: {reason}")]
  Validation { field: &'static str, reason: String },

  #[error("case not found: {0}")]
  NotFound(CaseId),

  /// Identifier generation kept producing ids that are already in use.
  #[error("case id {0} is already in use")]
  DuplicateId(CaseId),

  #[error("search query is empty")]
  EmptyQuery,

  /// The backing store failed to read or write. The backend's own error is
  /// kept as the source, unmodified.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
