//! Core types and the record-consistency engine for the caselog store.
//!
//! This crate is deliberately free of HTTP and file-format dependencies.
//! Storage backends implement [`store::CaseStore`]; front ends talk to
//! [`CaseLog`], which keeps the per-contact counters consistent on every write.

pub mod case;
pub mod counts;
pub mod error;
pub mod identity;
pub mod memory;
pub mod paths;
pub mod query;
pub mod service;
pub mod store;
pub mod validate;

pub use case::{Case, CaseFields, CaseId, Selection};
pub use counts::Counts;
pub use error::{Error, Result};
pub use service::CaseLog;
