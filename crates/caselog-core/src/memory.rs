//! [`MemoryStore`] — a process-local [`CaseStore`] for tests and embedding.

use std::{
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{case::Case, store::CaseStore};

/// Cases held in a `Vec` behind a mutex. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
  cases: Mutex<Vec<Case>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store pre-filled with `cases`, taken as-is (counters included).
  pub fn with_cases(cases: Vec<Case>) -> Self {
    Self {
      cases: Mutex::new(cases),
    }
  }

  fn lock(&self) -> MutexGuard<'_, Vec<Case>> {
    // A panic while holding the lock cannot leave a half-written Vec behind:
    // every write replaces the whole collection.
    self.cases.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl CaseStore for MemoryStore {
  type Error = Infallible;

  fn load_all(&self) -> Result<Vec<Case>, Infallible> { Ok(self.lock().clone()) }

  fn save_all(&self, cases: &[Case]) -> Result<(), Infallible> {
    *self.lock() = cases.to_vec();
    Ok(())
  }
}
