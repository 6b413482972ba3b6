//! The `Case` record, the only entity in the store.
//!
//! A case is a plain value. It is created with a fresh id and timestamp,
//! edited by replacing its editable fields, and removed outright. The two
//! counter fields are derived from the whole record set by
//! [`counts::recount`](crate::counts::recount) and are never set by hand.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{counts::Counts, validate::CleanFields};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Short opaque identifier; the primary key of every store.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CaseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for CaseId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for CaseId {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Selections ──────────────────────────────────────────────────────────────

/// Text shown by the drop-down lists before anything is picked. Submitting it
/// means "no selection".
pub const PLACEHOLDER: &str = "Select an option";

/// Options offered for [`Case::main_reaction`].
pub const REACTIONS: &[&str] = &["I am not interested"];

/// Options offered for [`Case::main_response`].
pub const RESPONSES: &[&str] = &["I will call you back"];

/// A value picked from one of the form's drop-down lists.
///
/// The option lists are open-ended: values outside [`REACTIONS`] /
/// [`RESPONSES`] are kept verbatim so older stores keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(String);

impl Selection {
  /// Normalise raw widget input. Blank input and the placeholder both mean
  /// nothing was picked.
  pub fn parse(raw: &str) -> Option<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
      None
    } else {
      Some(Self(trimmed.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Whether this value is one of `options`.
  pub fn is_listed(&self, options: &[&str]) -> bool {
    options.contains(&self.0.as_str())
  }
}

impl fmt::Display for Selection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Case ────────────────────────────────────────────────────────────────────

/// One logged customer contact.
///
/// Empty `phone_number` / `email` mean "not given"; their counters are then
/// `None`, which is distinct from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  pub case_id:       CaseId,
  pub created_at:    DateTime<Utc>,
  pub phone_number:  String,
  pub email:         String,
  pub main_reaction: Option<Selection>,
  pub main_response: Option<Selection>,
  /// Number of cases (including this one) sharing this email, ignoring case.
  pub email_count:   Option<u32>,
  /// Number of cases (including this one) sharing this exact phone number.
  pub phone_count:   Option<u32>,
  pub comments:      String,
}

impl Case {
  /// A blank case with the given identity.
  pub fn new(case_id: CaseId, created_at: DateTime<Utc>) -> Self {
    Self {
      case_id,
      created_at,
      phone_number: String::new(),
      email: String::new(),
      main_reaction: None,
      main_response: None,
      email_count: None,
      phone_count: None,
      comments: String::new(),
    }
  }

  /// Replace every editable field. Identity and counters are untouched.
  pub fn apply(&mut self, fields: CleanFields) {
    self.phone_number = fields.phone_number;
    self.email = fields.email;
    self.main_reaction = fields.main_reaction;
    self.main_response = fields.main_response;
    self.comments = fields.comments;
  }

  /// The editable fields of this case, as a front end would submit them.
  pub fn fields(&self) -> CaseFields {
    CaseFields {
      phone_number:  self.phone_number.clone(),
      email:         self.email.clone(),
      main_reaction: self.main_reaction.as_ref().map(|s| s.as_str().to_owned()),
      main_response: self.main_response.as_ref().map(|s| s.as_str().to_owned()),
      comments:      self.comments.clone(),
    }
  }

  pub fn counts(&self) -> Counts {
    Counts {
      email_count: self.email_count,
      phone_count: self.phone_count,
    }
  }

  pub(crate) fn set_counts(&mut self, counts: Counts) {
    self.email_count = counts.email_count;
    self.phone_count = counts.phone_count;
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// The editable part of a case, exactly as submitted by a form.
///
/// Nothing here is trusted: [`validate::clean`](crate::validate::clean) trims,
/// length-checks and normalises it before it reaches a [`Case`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseFields {
  pub phone_number:  String,
  pub email:         String,
  pub main_reaction: Option<String>,
  pub main_response: Option<String>,
  pub comments:      String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn placeholder_and_blank_are_no_selection() {
    assert_eq!(Selection::parse(PLACEHOLDER), None);
    assert_eq!(Selection::parse("   "), None);
    assert_eq!(
      Selection::parse(" I am not interested ").map(|s| s.as_str().to_owned()),
      Some("I am not interested".to_owned())
    );
  }

  #[test]
  fn unlisted_selection_is_kept() {
    let sel = Selection::parse("Wrong number").unwrap();
    assert!(!sel.is_listed(REACTIONS));
    assert!(Selection::parse(REACTIONS[0]).unwrap().is_listed(REACTIONS));
  }

  #[test]
  fn fields_reflect_case() {
    let mut case = Case::new(CaseId::from("abcd1234"), Utc::now());
    case.email = "a@x.com".into();
    case.main_response = Selection::parse(RESPONSES[0]);

    let fields = case.fields();
    assert_eq!(fields.email, "a@x.com");
    assert_eq!(fields.main_response.as_deref(), Some(RESPONSES[0]));
    assert_eq!(fields.main_reaction, None);
  }

  #[test]
  fn case_json_shape() {
    let case = Case::new(CaseId::from("abcd1234"), Utc::now());
    let json = serde_json::to_value(&case).unwrap();
    assert_eq!(json["case_id"], "abcd1234");
    assert!(json["email_count"].is_null());
  }
}
