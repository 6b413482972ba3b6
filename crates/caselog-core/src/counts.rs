//! Per-contact aggregate counters.
//!
//! Every case carries two derived numbers: how many cases share its email
//! address and how many share its phone number. Both are a pure function of
//! the full record set. They are recomputed over the whole set on every write
//! and the whole set is persisted in one go, so no stale value survives an
//! update or a delete.
//!
//! Emails are compared case-insensitively, phone numbers exactly. Both are
//! trimmed first, and an empty value is never counted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::case::{Case, CaseId};

/// Grouping key for an email address, or `None` if it is blank.
pub fn email_key(email: &str) -> Option<String> {
  let trimmed = email.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Grouping key for a phone number, or `None` if it is blank.
pub fn phone_key(phone: &str) -> Option<&str> {
  let trimmed = phone.trim();
  (!trimmed.is_empty()).then_some(trimmed)
}

/// The pair of counters carried by one case. `None` means "no value to
/// count", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
  pub email_count: Option<u32>,
  pub phone_count: Option<u32>,
}

// ─── Tally ───────────────────────────────────────────────────────────────────

/// Occurrences of every email and phone key in a record set.
#[derive(Debug, Default)]
pub struct Tally {
  emails: HashMap<String, u32>,
  phones: HashMap<String, u32>,
}

impl Tally {
  pub fn of<'a>(cases: impl IntoIterator<Item = &'a Case>) -> Self {
    let mut tally = Self::default();
    for case in cases {
      if let Some(key) = email_key(&case.email) {
        *tally.emails.entry(key).or_default() += 1;
      }
      if let Some(key) = phone_key(&case.phone_number) {
        *tally.phones.entry(key.to_owned()).or_default() += 1;
      }
    }
    tally
  }

  pub fn email(&self, email: &str) -> Option<u32> {
    email_key(email).and_then(|key| self.emails.get(&key).copied())
  }

  pub fn phone(&self, phone: &str) -> Option<u32> {
    phone_key(phone).and_then(|key| self.phones.get(key).copied())
  }

  /// Counters for `case`, which must be a member of the tallied set.
  pub fn counts_for(&self, case: &Case) -> Counts {
    Counts {
      email_count: self.email(&case.email),
      phone_count: self.phone(&case.phone_number),
    }
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Recompute both counters on every case from the set itself.
///
/// Returns the number of cases whose counters changed.
pub fn recount(cases: &mut [Case]) -> usize {
  let tally = Tally::of(cases.iter());
  let mut changed = 0;
  for case in cases.iter_mut() {
    let counts = tally.counts_for(case);
    if case.counts() != counts {
      case.set_counts(counts);
      changed += 1;
    }
  }
  changed
}

/// The counters a case would carry if it were saved now with `phone` and
/// `email`.
///
/// `editing` names the stored case being edited, if any. Its stored row is
/// skipped and the case is counted once for itself, so an edit is never
/// counted twice and a new case is counted before it exists.
pub fn preview(
  cases:   &[Case],
  editing: Option<&CaseId>,
  phone:   &str,
  email:   &str,
) -> Counts {
  let others = || cases.iter().filter(move |c| Some(&c.case_id) != editing);

  let email_count = email_key(email).map(|key| {
    let matching = others()
      .filter(|c| email_key(&c.email).as_deref() == Some(key.as_str()))
      .count();
    1 + matching as u32
  });

  let phone_count = phone_key(phone).map(|key| {
    let matching = others()
      .filter(|c| phone_key(&c.phone_number) == Some(key))
      .count();
    1 + matching as u32
  });

  Counts {
    email_count,
    phone_count,
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn case(id: &str, phone: &str, email: &str) -> Case {
    let mut case = Case::new(CaseId::from(id), Utc::now());
    case.phone_number = phone.into();
    case.email = email.into();
    case
  }

  #[test]
  fn emails_fold_case_phones_do_not() {
    let mut cases = vec![
      case("a", "555-0100", "Bob@Example.com"),
      case("b", "555-0100", "bob@example.COM"),
      case("c", "555-0101", "bob@example.com"),
    ];
    recount(&mut cases);

    assert!(cases.iter().all(|c| c.email_count == Some(3)));
    assert_eq!(cases[0].phone_count, Some(2));
    assert_eq!(cases[1].phone_count, Some(2));
    assert_eq!(cases[2].phone_count, Some(1));
  }

  #[test]
  fn phone_match_is_case_sensitive() {
    let mut cases = vec![case("a", "ext-A", ""), case("b", "EXT-A", "")];
    recount(&mut cases);
    assert_eq!(cases[0].phone_count, Some(1));
    assert_eq!(cases[1].phone_count, Some(1));
  }

  #[test]
  fn blank_values_are_not_counted() {
    let mut cases = vec![case("a", "", "  "), case("b", "", "")];
    recount(&mut cases);
    assert!(cases.iter().all(|c| c.counts() == Counts::default()));
  }

  #[test]
  fn recount_reports_changes_and_repairs_stale_values() {
    let mut cases = vec![case("a", "", "a@x.com"), case("b", "", "a@x.com")];
    assert_eq!(recount(&mut cases), 2);
    assert_eq!(recount(&mut cases), 0);

    // Simulate a deletion that left `b` with a stale count.
    cases.remove(0);
    assert_eq!(cases[0].email_count, Some(2));
    assert_eq!(recount(&mut cases), 1);
    assert_eq!(cases[0].email_count, Some(1));
  }

  #[test]
  fn preview_counts_a_new_case_once() {
    let mut cases = vec![case("a", "555", "a@x.com")];
    recount(&mut cases);

    let counts = preview(&cases, None, "555", "A@X.com");
    assert_eq!(counts.email_count, Some(2));
    assert_eq!(counts.phone_count, Some(2));
  }

  #[test]
  fn preview_does_not_double_count_an_edit() {
    let mut cases = vec![case("a", "555", "a@x.com"), case("b", "", "a@x.com")];
    recount(&mut cases);

    let editing = CaseId::from("a");
    let counts = preview(&cases, Some(&editing), "555", "a@x.com");
    assert_eq!(counts.email_count, Some(2));
    assert_eq!(counts.phone_count, Some(1));

    // Moving `a` to a new address counts only `a` itself there.
    let counts = preview(&cases, Some(&editing), "", "new@x.com");
    assert_eq!(counts.email_count, Some(1));
    assert_eq!(counts.phone_count, None);
  }
}
