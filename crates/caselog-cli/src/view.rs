//! Plain-text rendering of each [`Screen`].

use std::io::{self, Write};

use caselog_core::{Case, Selection, case::PLACEHOLDER};

use crate::app::Screen;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Write `screen` to `out`, preceded by `status` when it is non-empty.
pub fn draw(out: &mut impl Write, screen: &Screen, status: &str) -> io::Result<()> {
  if !status.is_empty() {
    writeln!(out, "{status}")?;
  }
  match screen {
    Screen::Main => Ok(()),
    Screen::Editor { case: Some(case), .. } => draw_form(out, case),
    Screen::Editor { case: None, .. } => writeln!(out, "New case"),
    Screen::Results { heading, cases } => draw_results(out, heading, cases),
  }
}

// ─── Form ─────────────────────────────────────────────────────────────────────

fn count(n: Option<u32>) -> String { n.map(|n| n.to_string()).unwrap_or_default() }

fn selection(sel: Option<&Selection>) -> &str { sel.map(Selection::as_str).unwrap_or(PLACEHOLDER) }

pub fn draw_form(out: &mut impl Write, case: &Case) -> io::Result<()> {
  let rows = [
    ("Case ID", case.case_id.to_string()),
    ("Timestamp", case.created_at.format(TIMESTAMP_FORMAT).to_string()),
    ("Phone number", case.phone_number.clone()),
    ("Email address", case.email.clone()),
    ("Main reaction", selection(case.main_reaction.as_ref()).to_owned()),
    ("Main response", selection(case.main_response.as_ref()).to_owned()),
    ("Cases with this email", count(case.email_count)),
    ("Cases with this phone number", count(case.phone_count)),
  ];
  for (label, value) in rows {
    writeln!(out, "{:<30}{value}", format!("{label}:"))?;
  }
  writeln!(out, "Comments:")?;
  for line in case.comments.lines() {
    writeln!(out, "  {line}")?;
  }
  Ok(())
}

// ─── Results ──────────────────────────────────────────────────────────────────

pub fn draw_results(out: &mut impl Write, heading: &str, cases: &[Case]) -> io::Result<()> {
  writeln!(out, "{heading} ({})", cases.len())?;
  writeln!(
    out,
    "{:<10} {:<19} {:<20} {:<30} {:>5} {:>5}",
    "CASE", "TIMESTAMP", "PHONE", "EMAIL", "#MAIL", "#TEL"
  )?;
  for case in cases {
    writeln!(
      out,
      "{:<10} {:<19} {:<20} {:<30} {:>5} {:>5}",
      case.case_id.as_str(),
      case.created_at.format(TIMESTAMP_FORMAT).to_string(),
      case.phone_number,
      case.email,
      count(case.email_count),
      count(case.phone_count),
    )?;
  }
  Ok(())
}
