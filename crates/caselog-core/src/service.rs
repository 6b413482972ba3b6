//! [`CaseLog`] — the operations front ends call.
//!
//! Every write loads the whole collection, applies the change, recomputes the
//! contact counters over the full set and persists it with a single
//! [`CaseStore::save_all`]. Either every row is rewritten with consistent
//! counters or nothing is written.
//!
//! Deletes repair eagerly: the surviving cases are recounted and rewritten
//! immediately, so a read straight after a delete never shows a stale count.

use chrono::{SubsecRound as _, Utc};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  case::{Case, CaseFields, CaseId},
  counts::{self, Counts},
  identity,
  query::{self, CaseQuery},
  store::{CaseStore, replace_or_push},
  validate,
};

/// How many fresh ids [`CaseLog::create`] tries before giving up.
pub const ID_ATTEMPTS: usize = 8;

/// The case log service over a store `S`.
///
/// Holds no state besides the store itself; cloning a store handle (where the
/// backend allows it) and building a second `CaseLog` is always safe.
pub struct CaseLog<S> {
  store:  S,
  new_id: fn() -> CaseId,
}

impl<S: CaseStore> CaseLog<S> {
  pub fn new(store: S) -> Self {
    Self {
      store,
      new_id: identity::new_case_id,
    }
  }

  /// Replace the id generator (used to exercise collision handling).
  pub fn with_id_generator(mut self, new_id: fn() -> CaseId) -> Self {
    self.new_id = new_id;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  fn load(&self) -> Result<Vec<Case>> { self.store.load_all().map_err(Error::store) }

  fn save(&self, cases: &[Case]) -> Result<()> {
    self.store.save_all(cases).map_err(Error::store)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Every case, in store order.
  pub fn list_all(&self) -> Result<Vec<Case>> { self.load() }

  /// Every case matching `raw` (see [`CaseQuery`]), in store order.
  pub fn search(&self, raw: &str) -> Result<Vec<Case>> {
    let query = CaseQuery::parse(raw)?;
    let matches = query::search(self.load()?, &query);
    debug!(query = raw, matches = matches.len(), "search");
    Ok(matches)
  }

  pub fn get(&self, case_id: &CaseId) -> Result<Case> {
    self
      .load()?
      .into_iter()
      .find(|c| &c.case_id == case_id)
      .ok_or_else(|| Error::NotFound(case_id.clone()))
  }

  /// Counters a case would show if saved now. `editing` is the id of the
  /// stored case being edited, or `None` for a case not yet saved.
  pub fn preview_counts(
    &self,
    editing: Option<&CaseId>,
    phone:   &str,
    email:   &str,
  ) -> Result<Counts> {
    Ok(counts::preview(&self.load()?, editing, phone, email))
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Validate `fields`, assign a fresh id and timestamp, and persist the new
  /// case along with any siblings whose counters it changes.
  pub fn create(&self, fields: &CaseFields) -> Result<Case> {
    let clean = validate::clean(fields)?;
    let mut cases = self.load()?;

    let case_id = self.fresh_id(&cases)?;
    let mut case = Case::new(case_id, Utc::now().trunc_subsecs(0));
    case.apply(clean);

    let index = replace_or_push(&mut cases, case);
    let touched = counts::recount(&mut cases);
    self.save(&cases)?;

    let created = cases[index].clone();
    debug!(case_id = %created.case_id, touched, "created case");
    Ok(created)
  }

  /// Replace the editable fields of an existing case.
  pub fn update(&self, case_id: &CaseId, fields: &CaseFields) -> Result<Case> {
    let clean = validate::clean(fields)?;
    let mut cases = self.load()?;

    let index = cases
      .iter()
      .position(|c| &c.case_id == case_id)
      .ok_or_else(|| Error::NotFound(case_id.clone()))?;
    cases[index].apply(clean);

    let touched = counts::recount(&mut cases);
    self.save(&cases)?;

    debug!(%case_id, touched, "updated case");
    Ok(cases[index].clone())
  }

  /// Remove a case and repair the counters of the cases left behind.
  /// Deleting an unknown id changes nothing.
  pub fn delete(&self, case_id: &CaseId) -> Result<()> {
    let mut cases = self.load()?;
    let before = cases.len();
    cases.retain(|c| &c.case_id != case_id);

    if cases.len() == before {
      debug!(%case_id, "delete of unknown case ignored");
      return Ok(());
    }

    let touched = counts::recount(&mut cases);
    self.save(&cases)?;
    debug!(%case_id, touched, "deleted case");
    Ok(())
  }

  /// Recount the whole store and rewrite it. The rewrite happens even when
  /// no counter changed, so a backend stored in an older layout is brought up
  /// to date. Returns the number of cases whose counters changed.
  pub fn repair(&self) -> Result<usize> {
    let mut cases = self.load()?;
    let changed = counts::recount(&mut cases);
    self.save(&cases)?;
    info!(changed, total = cases.len(), "repaired contact counters");
    Ok(changed)
  }

  fn fresh_id(&self, cases: &[Case]) -> Result<CaseId> {
    let taken = |id: &CaseId| cases.iter().any(|c| &c.case_id == id);

    let mut id = (self.new_id)();
    for _ in 1..ID_ATTEMPTS {
      if !taken(&id) {
        return Ok(id);
      }
      warn!(%id, "generated case id already in use, retrying");
      id = (self.new_id)();
    }

    if taken(&id) { Err(Error::DuplicateId(id)) } else { Ok(id) }
  }
}
