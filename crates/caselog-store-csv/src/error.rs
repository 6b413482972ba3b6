//! Error type for `caselog-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("row {row}: bad timestamp {value:?}")]
  Timestamp { row: u64, value: String },

  #[error("{path} has no case_id column")]
  MissingCaseId { path: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
