//! Free-text case lookup.
//!
//! A query is matched against three fields of every case: `case_id`,
//! `phone_number` and `email`, ignoring letter case. A case matches when any
//! of the three does. Queries containing `*` are shell-style patterns that
//! must match a whole field; anything else is a plain substring search.

use crate::{Error, Result, case::Case, validate};

/// The character that switches a query into pattern mode.
pub const WILDCARD: char = '*';

/// A parsed, lower-cased search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseQuery {
  /// Contiguous substring of any searched field.
  Substring(String),
  /// Pattern matched against each searched field in full.
  Glob(Glob),
}

impl CaseQuery {
  /// Trim and lower-case `raw`, then pick the matching mode.
  ///
  /// Blank input is rejected with [`Error::EmptyQuery`]; front ends are
  /// expected to prompt for a query instead of searching.
  pub fn parse(raw: &str) -> Result<Self> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
      return Err(Error::EmptyQuery);
    }
    validate::check_len("query", &query)?;

    if query.contains(WILDCARD) {
      Ok(Self::Glob(Glob::new(&query)))
    } else {
      Ok(Self::Substring(query))
    }
  }

  pub fn matches(&self, case: &Case) -> bool {
    [
      case.case_id.as_str(),
      case.phone_number.as_str(),
      case.email.as_str(),
    ]
    .into_iter()
    .map(str::to_lowercase)
    .any(|field| match self {
      Self::Substring(needle) => field.contains(needle.as_str()),
      Self::Glob(glob) => glob.matches(&field),
    })
  }
}

/// Every case matching `query`, in store order.
pub fn search(cases: Vec<Case>, query: &CaseQuery) -> Vec<Case> {
  cases.into_iter().filter(|c| query.matches(c)).collect()
}

// ─── Glob ────────────────────────────────────────────────────────────────────

/// A shell-style pattern: `*` matches any run of characters, `?` a single
/// character, `[...]` one character from a set (`[!...]` negates, `a-z`
/// ranges). An unterminated `[` is a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
  tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
  Literal(char),
  AnyChar,
  AnyRun,
  Class {
    negated: bool,
    ranges:  Vec<(char, char)>,
  },
}

impl Token {
  fn accepts(&self, ch: char) -> bool {
    match self {
      Token::Literal(c) => *c == ch,
      Token::AnyChar | Token::AnyRun => true,
      Token::Class { negated, ranges } => {
        ranges.iter().any(|&(lo, hi)| lo <= ch && ch <= hi) != *negated
      }
    }
  }
}

impl Glob {
  pub fn new(pattern: &str) -> Self {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
      match chars[i] {
        '*' => {
          // Consecutive stars are equivalent to one.
          if tokens.last() != Some(&Token::AnyRun) {
            tokens.push(Token::AnyRun);
          }
          i += 1;
        }
        '?' => {
          tokens.push(Token::AnyChar);
          i += 1;
        }
        '[' => match parse_class(&chars, i + 1) {
          Some((token, next)) => {
            tokens.push(token);
            i = next;
          }
          None => {
            tokens.push(Token::Literal('['));
            i += 1;
          }
        },
        c => {
          tokens.push(Token::Literal(c));
          i += 1;
        }
      }
    }

    Self { tokens }
  }

  /// Whether the whole of `text` matches the pattern.
  pub fn matches(&self, text: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let tokens = &self.tokens;

    let (mut t, mut x) = (0, 0);
    // Most recent star: (token index, text index it currently absorbs up to).
    let mut star: Option<(usize, usize)> = None;

    while x < text.len() {
      match tokens.get(t) {
        Some(Token::AnyRun) => {
          star = Some((t, x));
          t += 1;
        }
        Some(token) if token.accepts(text[x]) => {
          t += 1;
          x += 1;
        }
        _ => match star {
          Some((star_t, star_x)) => {
            star = Some((star_t, star_x + 1));
            t = star_t + 1;
            x = star_x + 1;
          }
          None => return false,
        },
      }
    }

    tokens[t..].iter().all(|token| *token == Token::AnyRun)
  }
}

/// Parse a character class whose body starts at `start` (just past `[`).
/// Returns the token and the index after the closing `]`, or `None` if the
/// class is never closed.
fn parse_class(chars: &[char], start: usize) -> Option<(Token, usize)> {
  let mut i = start;
  let negated = chars.get(i) == Some(&'!');
  if negated {
    i += 1;
  }
  let body_start = i;
  // A `]` directly after the opening bracket is a member, not the end.
  if chars.get(i) == Some(&']') {
    i += 1;
  }
  while i < chars.len() && chars[i] != ']' {
    i += 1;
  }
  if i >= chars.len() {
    return None;
  }

  let body = &chars[body_start..i];
  let mut ranges = Vec::new();
  let mut j = 0;
  while j < body.len() {
    if j + 2 < body.len() && body[j + 1] == '-' {
      let (lo, hi) = (body[j], body[j + 2]);
      // Reversed ranges match nothing.
      if lo <= hi {
        ranges.push((lo, hi));
      }
      j += 3;
    } else {
      ranges.push((body[j], body[j]));
      j += 1;
    }
  }

  Some((Token::Class { negated, ranges }, i + 1))
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::case::CaseId;

  fn case(id: &str, phone: &str, email: &str) -> Case {
    let mut case = Case::new(CaseId::from(id), Utc::now());
    case.phone_number = phone.into();
    case.email = email.into();
    case
  }

  fn ids(cases: &[Case]) -> Vec<&str> {
    cases.iter().map(|c| c.case_id.as_str()).collect()
  }

  fn glob(pattern: &str, text: &str) -> bool { Glob::new(pattern).matches(text) }

  #[test]
  fn blank_query_is_rejected() {
    assert!(matches!(CaseQuery::parse("   "), Err(Error::EmptyQuery)));
  }

  #[test]
  fn overlong_query_is_rejected() {
    let err = CaseQuery::parse(&"q".repeat(101)).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "query", .. }));
  }

  #[test]
  fn mode_depends_on_star() {
    assert_eq!(
      CaseQuery::parse("  Alice ").unwrap(),
      CaseQuery::Substring("alice".into())
    );
    assert!(matches!(CaseQuery::parse("a*").unwrap(), CaseQuery::Glob(_)));
    // `?` alone does not trigger pattern mode.
    assert!(matches!(
      CaseQuery::parse("a?").unwrap(),
      CaseQuery::Substring(_)
    ));
  }

  #[test]
  fn substring_matches_any_field_ignoring_case() {
    let cases = vec![
      case("0a1b2c3d", "555-0100", "carol@example.com"),
      case("ffff0000", "555-0199", "Dave@Example.com"),
      case("12345678", "", ""),
    ];
    let q = CaseQuery::parse("DAVE@").unwrap();
    assert_eq!(ids(&search(cases.clone(), &q)), vec!["ffff0000"]);

    let q = CaseQuery::parse("0a1b").unwrap();
    assert_eq!(ids(&search(cases.clone(), &q)), vec!["0a1b2c3d"]);

    let q = CaseQuery::parse("555-01").unwrap();
    assert_eq!(ids(&search(cases, &q)), vec!["0a1b2c3d", "ffff0000"]);
  }

  #[test]
  fn glob_matches_whole_field() {
    let cases = vec![
      case("1", "", "alice@example.com"),
      case("2", "", "Anna@EXAMPLE.com"),
      case("3", "", "bob@example.com"),
      case("4", "", "alice@example.com.evil"),
    ];
    let q = CaseQuery::parse("a*@example.com").unwrap();
    assert_eq!(ids(&search(cases, &q)), vec!["1", "2"]);
  }

  #[test]
  fn lone_star_matches_everything() {
    let cases = vec![case("1", "", ""), case("2", "555", "x@y.z")];
    let q = CaseQuery::parse("*").unwrap();
    assert_eq!(search(cases, &q).len(), 2);
  }

  #[test]
  fn results_keep_store_order() {
    let cases = vec![
      case("c", "", "x@y.com"),
      case("a", "", "x@y.com"),
      case("b", "", "x@y.com"),
    ];
    let q = CaseQuery::parse("x@y").unwrap();
    assert_eq!(ids(&search(cases, &q)), vec!["c", "a", "b"]);
  }

  #[test]
  fn glob_tokens() {
    assert!(glob("h?llo*", "hello world"));
    assert!(!glob("h?llo", "hllo"));
    assert!(glob("*.com", ".com"));
    assert!(glob("**x", "abcx"));
    assert!(!glob("*x", "abc"));
    assert!(glob("a*b*c", "aXXbYYc"));
    assert!(!glob("a*b*c", "aXXbYY"));
  }

  #[test]
  fn glob_classes() {
    assert!(glob("55[0-4]*", "553-1234"));
    assert!(!glob("55[0-4]*", "559-1234"));
    assert!(glob("[!a]*", "bob"));
    assert!(!glob("[!a]*", "alice"));
    assert!(glob("[]x]*", "]"));
    assert!(!glob("[z-a]*", "m"));
  }

  #[test]
  fn unterminated_bracket_is_literal() {
    assert!(glob("[ab*", "[ab-anything"));
    assert!(!glob("[ab*", "a"));
  }
}
