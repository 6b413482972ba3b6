//! SQLite backend for the caselog store.
//!
//! One `cases` table in a single database file. The connection is guarded by
//! a mutex; every call is a short blocking transaction.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
