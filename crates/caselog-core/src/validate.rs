//! Input validation and normalisation for submitted case fields.

use crate::{
  Error, Result,
  case::{CaseFields, Selection},
};

/// Upper bound, in characters, on every single-line input field.
pub const MAX_FIELD_LEN: usize = 100;

/// Submitted fields after trimming, length checks and placeholder handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanFields {
  pub phone_number:  String,
  pub email:         String,
  pub main_reaction: Option<Selection>,
  pub main_response: Option<Selection>,
  pub comments:      String,
}

/// Reject `value` if it is longer than [`MAX_FIELD_LEN`] characters.
pub fn check_len(field: &'static str, value: &str) -> Result<()> {
  let len = value.chars().count();
  if len > MAX_FIELD_LEN {
    return Err(Error::Validation {
      field,
      reason: format!("{len} characters exceeds the limit of {MAX_FIELD_LEN}"),
    });
  }
  Ok(())
}

/// Trim and check every field. Length limits apply to the trimmed value,
/// which is what gets stored. The email keeps the letter case it was typed
/// in; only comparisons fold it.
pub fn clean(fields: &CaseFields) -> Result<CleanFields> {
  let phone_number = fields.phone_number.trim();
  let email = fields.email.trim();
  check_len("phone_number", phone_number)?;
  check_len("email", email)?;

  let main_reaction = selection("main_reaction", fields.main_reaction.as_deref())?;
  let main_response = selection("main_response", fields.main_response.as_deref())?;

  Ok(CleanFields {
    phone_number: phone_number.to_owned(),
    email: email.to_owned(),
    main_reaction,
    main_response,
    comments: fields.comments.trim().to_owned(),
  })
}

fn selection(field: &'static str, raw: Option<&str>) -> Result<Option<Selection>> {
  let Some(raw) = raw else { return Ok(None) };
  check_len(field, raw.trim())?;
  Ok(Selection::parse(raw))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::case::PLACEHOLDER;

  #[test]
  fn trims_contact_fields() {
    let clean = clean(&CaseFields {
      phone_number: "  555-0100 ".into(),
      email: " Bob@Example.com ".into(),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(clean.phone_number, "555-0100");
    assert_eq!(clean.email, "Bob@Example.com");
  }

  #[test]
  fn rejects_overlong_email() {
    let err = clean(&CaseFields {
      email: "x".repeat(MAX_FIELD_LEN + 1),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "email", .. }));
  }

  #[test]
  fn exactly_max_len_is_accepted() {
    let phone = "9".repeat(MAX_FIELD_LEN);
    let clean = clean(&CaseFields {
      phone_number: phone.clone(),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(clean.phone_number, phone);
  }

  #[test]
  fn limit_applies_to_the_trimmed_value() {
    let email = "e".repeat(MAX_FIELD_LEN);
    let padded = format!("   {email}   ");
    assert!(padded.chars().count() > MAX_FIELD_LEN);

    let clean = clean(&CaseFields {
      email: padded,
      ..Default::default()
    })
    .unwrap();
    assert_eq!(clean.email, email);
  }

  #[test]
  fn placeholder_selection_becomes_none() {
    let clean = clean(&CaseFields {
      main_reaction: Some(PLACEHOLDER.into()),
      main_response: Some("I will call you back".into()),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(clean.main_reaction, None);
    assert_eq!(
      clean.main_response.as_ref().map(Selection::as_str),
      Some("I will call you back")
    );
  }

  #[test]
  fn comments_are_not_capped() {
    let long = "note ".repeat(100);
    let clean = clean(&CaseFields {
      comments: long.clone(),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(clean.comments, long.trim());
  }
}
