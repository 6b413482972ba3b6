//! Flat-file CSV backend for the caselog store.
//!
//! The whole collection lives in one CSV file with a header row. Every write
//! rewrites the file through a sibling temp file that is renamed into place,
//! so a failed write never truncates a good store.

mod row;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use row::{COLUMNS, Schema};
pub use store::CsvStore;
