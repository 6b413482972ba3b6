//! Conversion between [`Case`] values and CSV rows.
//!
//! Absent counters are empty fields, never `0`. Timestamps are written as
//! `YYYY-MM-DD HH:MM:SS` (RFC 3339 when the value carries sub-second
//! precision) and either form is accepted back.

use caselog_core::{Case, CaseId, Selection};
use chrono::{DateTime, NaiveDateTime, SubsecRound as _, Utc};
use serde::Deserialize;

use crate::{Error, Result};

/// Column order of the two-counter schema, which is always what gets written.
pub const COLUMNS: [&str; 9] = [
  "case_id",
  "timestamp",
  "phone_number",
  "email",
  "main_reaction",
  "main_response",
  "email_count",
  "phone_count",
  "comments",
];

/// Single counter column of the older schema.
pub const LEGACY_COUNT_COLUMN: &str = "call_count";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of a case file, as told by its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
  /// Separate `email_count` and `phone_count` columns.
  Split,
  /// One `call_count` column. Read-only: counters load as absent and the
  /// next write upgrades the file to [`Schema::Split`].
  Legacy,
}

impl Schema {
  pub fn detect(headers: &csv::StringRecord) -> Self {
    let has = |name: &str| headers.iter().any(|h| h == name);
    if has(LEGACY_COUNT_COLUMN) && !has("email_count") && !has("phone_count") {
      Self::Legacy
    } else {
      Self::Split
    }
  }
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// A row as stored. Columns missing from the header take their defaults and
/// unknown columns (such as `call_count`) are ignored.
#[derive(Debug, Deserialize)]
pub struct RawRow {
  case_id:       String,
  #[serde(default)]
  timestamp:     String,
  #[serde(default)]
  phone_number:  String,
  #[serde(default)]
  email:         String,
  #[serde(default)]
  main_reaction: String,
  #[serde(default)]
  main_response: String,
  // Counters are derived; an unreadable one is treated as absent and gets
  // rebuilt on the next write.
  #[serde(default, deserialize_with = "csv::invalid_option")]
  email_count:   Option<u32>,
  #[serde(default, deserialize_with = "csv::invalid_option")]
  phone_count:   Option<u32>,
  #[serde(default)]
  comments:      String,
}

impl RawRow {
  /// `row` is the 1-based line number, for error messages.
  pub fn into_case(self, row: u64) -> Result<Case> {
    let created_at =
      decode_timestamp(&self.timestamp).ok_or_else(|| Error::Timestamp {
        row,
        value: self.timestamp.clone(),
      })?;

    Ok(Case {
      case_id: CaseId::new(self.case_id),
      created_at,
      phone_number: self.phone_number,
      email: self.email,
      main_reaction: Selection::parse(&self.main_reaction),
      main_response: Selection::parse(&self.main_response),
      email_count: self.email_count,
      phone_count: self.phone_count,
      comments: self.comments,
    })
  }
}

fn decode_timestamp(s: &str) -> Option<DateTime<Utc>> {
  let s = s.trim();
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .or_else(|_| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(|dt| dt.and_utc()))
    .ok()
}

// ─── Writing ─────────────────────────────────────────────────────────────────

fn encode_timestamp(dt: DateTime<Utc>) -> String {
  if dt.trunc_subsecs(0) == dt {
    dt.format(TIMESTAMP_FORMAT).to_string()
  } else {
    dt.to_rfc3339()
  }
}

fn encode_count(count: Option<u32>) -> String {
  count.map(|n| n.to_string()).unwrap_or_default()
}

fn encode_selection(sel: Option<&Selection>) -> String {
  sel.map(|s| s.as_str().to_owned()).unwrap_or_default()
}

/// Fields of `case` in [`COLUMNS`] order.
pub fn encode(case: &Case) -> [String; 9] {
  [
    case.case_id.as_str().to_owned(),
    encode_timestamp(case.created_at),
    case.phone_number.clone(),
    case.email.clone(),
    encode_selection(case.main_reaction.as_ref()),
    encode_selection(case.main_response.as_ref()),
    encode_count(case.email_count),
    encode_count(case.phone_count),
    case.comments.clone(),
  ]
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_in_both_forms_decode() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
    assert_eq!(decode_timestamp("2024-03-09 14:05:00"), Some(expected));
    assert_eq!(decode_timestamp("2024-03-09T14:05:00+00:00"), Some(expected));
    assert_eq!(decode_timestamp("yesterday"), None);
  }

  #[test]
  fn whole_second_timestamps_use_the_short_form() {
    let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
    assert_eq!(encode_timestamp(dt), "2024-03-09 14:05:00");

    let precise = dt + chrono::Duration::milliseconds(250);
    assert_eq!(decode_timestamp(&encode_timestamp(precise)), Some(precise));
  }

  #[test]
  fn absent_counts_are_empty_fields() {
    let mut case = Case::new(CaseId::from("abc"), Utc::now());
    case.email_count = Some(3);
    let fields = encode(&case);
    assert_eq!(fields[6], "3");
    assert_eq!(fields[7], "");
  }
}
