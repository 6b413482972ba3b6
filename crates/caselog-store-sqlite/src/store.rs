//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::{
  path::Path,
  sync::{Mutex, MutexGuard},
};

use caselog_core::{Case, CaseId, store::CaseStore};
use rusqlite::Connection;
use tracing::debug;

use crate::{
  Error, Result,
  encode::{CASE_COLUMNS, RawCase, encode_count, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A case store backed by a single SQLite file.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open a store that lives only as long as this value.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self {
      conn: Mutex::new(conn),
    })
  }

  fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| Error::Poisoned)
  }
}

const INSERT: &str = "VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// Insert `case` as a new row. A `case_id` already present violates the
/// UNIQUE constraint.
fn insert_row(conn: &Connection, case: &Case) -> Result<()> {
  conn.execute(
    &format!("INSERT INTO cases ({CASE_COLUMNS}) {INSERT}"),
    row_params(case),
  )?;
  Ok(())
}

/// Insert `case` as a new row, or overwrite the row with the same `case_id`
/// in place (keeping its position).
fn upsert_row(conn: &Connection, case: &Case) -> Result<()> {
  conn.execute(
    &format!(
      "INSERT INTO cases ({CASE_COLUMNS}) {INSERT}
       ON CONFLICT(case_id) DO UPDATE SET
         created_at    = excluded.created_at,
         phone_number  = excluded.phone_number,
         email         = excluded.email,
         main_reaction = excluded.main_reaction,
         main_response = excluded.main_response,
         email_count   = excluded.email_count,
         phone_count   = excluded.phone_count,
         comments      = excluded.comments"
    ),
    row_params(case),
  )?;
  Ok(())
}

/// Bind values for [`CASE_COLUMNS`], in order.
fn row_params(case: &Case) -> impl rusqlite::Params + '_ {
  (
    case.case_id.as_str(),
    encode_dt(case.created_at),
    case.phone_number.as_str(),
    case.email.as_str(),
    case.main_reaction.as_ref().map(|s| s.as_str()),
    case.main_response.as_ref().map(|s| s.as_str()),
    encode_count(case.email_count),
    encode_count(case.phone_count),
    case.comments.as_str(),
  )
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = Error;

  fn load_all(&self) -> Result<Vec<Case>> {
    let conn = self.conn()?;
    let mut stmt = conn.prepare(&format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY id"))?;
    let raws = stmt
      .query_map([], RawCase::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  /// Replace every row inside one transaction. Duplicate `case_id`s in
  /// `cases` fail the write and roll back to the previous contents.
  fn save_all(&self, cases: &[Case]) -> Result<()> {
    let mut conn = self.conn()?;
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM cases", [])?;
    for case in cases {
      insert_row(&tx, case)?;
    }
    tx.commit()?;

    debug!(rows = cases.len(), "rewrote cases table");
    Ok(())
  }

  fn upsert(&self, case: Case) -> Result<()> {
    let conn = self.conn()?;
    upsert_row(&conn, &case)
  }

  fn delete_by_case_id(&self, case_id: &CaseId) -> Result<()> {
    let conn = self.conn()?;
    conn.execute(
      "DELETE FROM cases WHERE case_id = ?1",
      rusqlite::params![case_id.as_str()],
    )?;
    Ok(())
  }
}
