//! Encoding and decoding helpers between [`Case`] and the plain values stored
//! in SQLite columns.
//!
//! Timestamps are RFC 3339 strings. Absent counters and selections are
//! `NULL`.

use caselog_core::{Case, CaseId, Selection};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Column list shared by every `SELECT` and `INSERT`, in [`RawCase`] order.
pub const CASE_COLUMNS: &str = "case_id, created_at, phone_number, email, \
                                main_reaction, main_response, email_count, \
                                phone_count, comments";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Counters ────────────────────────────────────────────────────────────────

pub fn encode_count(count: Option<u32>) -> Option<i64> { count.map(i64::from) }

pub fn decode_count(raw: Option<i64>) -> Result<Option<u32>> {
  raw
    .map(|n| u32::try_from(n).map_err(|_| Error::Count(n)))
    .transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `cases` row.
pub struct RawCase {
  pub case_id:       String,
  pub created_at:    String,
  pub phone_number:  String,
  pub email:         String,
  pub main_reaction: Option<String>,
  pub main_response: Option<String>,
  pub email_count:   Option<i64>,
  pub phone_count:   Option<i64>,
  pub comments:      String,
}

impl RawCase {
  /// Read a row selected with [`CASE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      case_id:       row.get(0)?,
      created_at:    row.get(1)?,
      phone_number:  row.get(2)?,
      email:         row.get(3)?,
      main_reaction: row.get(4)?,
      main_response: row.get(5)?,
      email_count:   row.get(6)?,
      phone_count:   row.get(7)?,
      comments:      row.get(8)?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_id:       CaseId::new(self.case_id),
      created_at:    decode_dt(&self.created_at)?,
      phone_number:  self.phone_number,
      email:         self.email,
      main_reaction: self.main_reaction.as_deref().and_then(Selection::parse),
      main_response: self.main_response.as_deref().and_then(Selection::parse),
      email_count:   decode_count(self.email_count)?,
      phone_count:   decode_count(self.phone_count)?,
      comments:      self.comments,
    })
  }
}
