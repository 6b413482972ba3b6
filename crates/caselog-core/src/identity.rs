//! Case identifiers.

use uuid::Uuid;

use crate::case::CaseId;

/// Number of hex digits kept from the random UUID.
pub const CASE_ID_LEN: usize = 8;

/// A short, human-typable id: the first eight lowercase hex digits of a
/// random v4 UUID.
///
/// Collisions are possible (32 bits of entropy); [`CaseLog::create`] checks
/// the id against the store before using it.
///
/// [`CaseLog::create`]: crate::CaseLog::create
pub fn new_case_id() -> CaseId {
  let mut hex = Uuid::new_v4().simple().to_string();
  hex.truncate(CASE_ID_LEN);
  CaseId::new(hex)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn eight_lowercase_hex_digits() {
    let id = new_case_id();
    assert_eq!(id.as_str().len(), CASE_ID_LEN);
    assert!(
      id.as_str()
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
  }

  #[test]
  fn ids_differ() {
    assert_ne!(new_case_id(), new_case_id());
  }
}
