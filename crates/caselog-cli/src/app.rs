//! Application state machine: which screen is showing and how searches,
//! saves and deletes move between screens.

use caselog_core::{Case, CaseFields, CaseId, CaseLog, store::CaseStore};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Search box, "new case" and "browse all".
  Main,
  /// The case form. `case` is `None` while entering a new case.
  Editor {
    case: Option<Case>,
    back: Box<Screen>,
  },
  /// A list of cases to pick from.
  Results { heading: String, cases: Vec<Case> },
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level front-end state over a [`CaseLog`].
pub struct App<S> {
  pub log: CaseLog<S>,

  /// Current screen.
  pub screen: Screen,

  /// One-line status message ("No results found.", "Saved case …").
  pub status_msg: String,
}

impl<S: CaseStore> App<S> {
  pub fn new(log: CaseLog<S>) -> Self {
    Self {
      log,
      screen: Screen::Main,
      status_msg: String::new(),
    }
  }

  /// The main screen's summary line.
  pub fn summary(&self) -> anyhow::Result<String> {
    Ok(format!("Loaded {} cases", self.log.list_all()?.len()))
  }

  fn go_to_editor(&mut self, case: Option<Case>) {
    let back = std::mem::replace(&mut self.screen, Screen::Main);
    self.screen = Screen::Editor {
      case,
      back: Box::new(back),
    };
  }

  // ── Main screen ───────────────────────────────────────────────────────────

  /// Run a search and route on the number of matches: none stays on the
  /// main screen, one opens the editor, more shows a results list.
  pub fn search(&mut self, query: &str) -> anyhow::Result<()> {
    self.status_msg.clear();
    let mut cases = self.log.search(query)?;
    match cases.len() {
      0 => {
        self.screen = Screen::Main;
        self.status_msg = "No results found.".into();
      }
      1 => {
        self.screen = Screen::Main;
        self.go_to_editor(cases.pop());
      }
      _ => {
        self.screen = Screen::Results {
          heading: "Search results".into(),
          cases,
        };
      }
    }
    Ok(())
  }

  /// Show every case, or report that there are none.
  pub fn browse_all(&mut self) -> anyhow::Result<()> {
    self.status_msg.clear();
    let cases = self.log.list_all()?;
    if cases.is_empty() {
      self.screen = Screen::Main;
      self.status_msg = "No entries found.".into();
    } else {
      self.screen = Screen::Results {
        heading: "All entries".into(),
        cases,
      };
    }
    Ok(())
  }

  /// Open a blank form.
  pub fn new_case(&mut self) { self.go_to_editor(None); }

  /// Open the form for a stored case from wherever we are now.
  pub fn open(&mut self, case_id: &CaseId) -> anyhow::Result<()> {
    let case = self.log.get(case_id)?;
    self.go_to_editor(Some(case));
    Ok(())
  }

  // ── Editor ────────────────────────────────────────────────────────────────

  /// Save the form: create a new case or update the one being edited. Returns
  /// to the main screen with the stored case.
  pub fn save(&mut self, fields: &CaseFields) -> anyhow::Result<Case> {
    let Screen::Editor { case, .. } = &self.screen else {
      anyhow::bail!("no case is open");
    };
    let saved = match case {
      Some(existing) => self.log.update(&existing.case_id, fields)?,
      None => self.log.create(fields)?,
    };
    self.screen = Screen::Main;
    self.status_msg = format!("Saved case {}.", saved.case_id);
    Ok(saved)
  }

  /// Delete the case being edited and return to the previous screen. A
  /// results list it came from drops the deleted case.
  pub fn delete_current(&mut self) -> anyhow::Result<()> {
    let Screen::Editor { case, .. } = &self.screen else {
      anyhow::bail!("no case is open");
    };
    let Some(case) = case else {
      anyhow::bail!("a new case has nothing to delete");
    };
    let case_id = case.case_id.clone();

    self.log.delete(&case_id)?;
    if let Screen::Editor { back, .. } = &mut self.screen
      && let Screen::Results { cases, .. } = back.as_mut()
    {
      cases.retain(|c| c.case_id != case_id);
    }
    self.back();
    self.status_msg = format!("Deleted case {case_id}.");
    Ok(())
  }

  /// Leave the current screen.
  pub fn back(&mut self) {
    self.screen = match std::mem::replace(&mut self.screen, Screen::Main) {
      Screen::Editor { back, .. } => *back,
      Screen::Results { .. } | Screen::Main => Screen::Main,
    };
  }
}
