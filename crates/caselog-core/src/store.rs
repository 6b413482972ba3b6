//! The `CaseStore` trait.
//!
//! The trait is implemented by storage backends (`caselog-store-csv`,
//! `caselog-store-sqlite`, and [`MemoryStore`](crate::memory::MemoryStore)).
//! Higher layers depend on this abstraction, never on a concrete backend.
//!
//! Every operation is a blocking, whole-collection read-modify-write. There is
//! no locking between processes; a single active writer is assumed.

use crate::case::{Case, CaseId};

/// Abstraction over a durable, ordered collection of cases keyed by
/// `case_id`.
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every stored case in insertion order. A store that does not exist
  /// yet is empty, not an error.
  fn load_all(&self) -> Result<Vec<Case>, Self::Error>;

  /// Replace the entire collection with `cases`, in the given order.
  ///
  /// Implementations must not leave a previously valid store corrupted if
  /// the write fails part way.
  fn save_all(&self, cases: &[Case]) -> Result<(), Self::Error>;

  /// Replace the case with the same `case_id`, or append it.
  fn upsert(&self, case: Case) -> Result<(), Self::Error> {
    let mut cases = self.load_all()?;
    replace_or_push(&mut cases, case);
    self.save_all(&cases)
  }

  /// Remove the case with `case_id`. Unknown ids are a no-op.
  fn delete_by_case_id(&self, case_id: &CaseId) -> Result<(), Self::Error> {
    let mut cases = self.load_all()?;
    let before = cases.len();
    cases.retain(|c| &c.case_id != case_id);
    if cases.len() == before {
      return Ok(());
    }
    self.save_all(&cases)
  }
}

/// Overwrite the case sharing `case.case_id` in place, or append it. Returns
/// the index the case now occupies.
pub fn replace_or_push(cases: &mut Vec<Case>, case: Case) -> usize {
  match cases.iter().position(|c| c.case_id == case.case_id) {
    Some(index) => {
      cases[index] = case;
      index
    }
    None => {
      cases.push(case);
      cases.len() - 1
    }
  }
}
