//! `caselog` — command-line front end for the case log.
//!
//! # Usage
//!
//! ```text
//! caselog --store cases.csv new --phone 555-0100 --email a@x.com
//! caselog search '*@example.com'
//! caselog --backend sqlite --store ~/caselog/cases.db list
//! caselog --config ~/.config/caselog/config.toml repair
//! ```

mod app;
mod view;

use std::{
  io::{self, Write as _},
  path::PathBuf,
};

use anyhow::{Context, Result};
use app::{App, Screen};
use caselog_core::{
  CaseFields, CaseId, CaseLog,
  case::{REACTIONS, RESPONSES},
  paths::expand_tilde,
  store::CaseStore,
};
use caselog_store_csv::CsvStore;
use caselog_store_sqlite::SqliteStore;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "caselog", about = "Log customer-contact cases")]
struct Args {
  /// Path to a TOML config file (store, backend).
  #[arg(short, long, value_name = "FILE", env = "CASELOG_CONFIG")]
  config: Option<PathBuf>,

  /// Case file or database (default: cases.csv / cases.db).
  #[arg(long, global = true, env = "CASELOG_STORE")]
  store: Option<PathBuf>,

  /// Storage backend (default: csv).
  #[arg(long, global = true, value_enum, env = "CASELOG_BACKEND")]
  backend: Option<Backend>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Backend {
  Csv,
  Sqlite,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every case.
  List,
  /// Find cases by id, phone or email. A `*` in the query makes it a glob.
  Search { query: String },
  /// Show one case.
  Show { id: String },
  /// Log a new case.
  New(FormArgs),
  /// Change fields of a case; omitted fields keep their value.
  Edit {
    id:   String,
    #[command(flatten)]
    form: FormArgs,
  },
  /// Delete a case and update the counters of the rest.
  Delete { id: String },
  /// Preview the counters a case with these contact details would get.
  Counts {
    #[arg(long, default_value = "")]
    phone:   String,
    #[arg(long, default_value = "")]
    email:   String,
    /// The case being edited, if any.
    #[arg(long)]
    case_id: Option<String>,
  },
  /// Recount every case and rewrite the store in the current layout.
  Repair,
}

#[derive(clap::Args, Debug, Default)]
struct FormArgs {
  #[arg(long)]
  phone:    Option<String>,
  #[arg(long)]
  email:    Option<String>,
  /// e.g. "I am not interested"; an empty value clears it.
  #[arg(long)]
  reaction: Option<String>,
  /// e.g. "I will call you back"; an empty value clears it.
  #[arg(long)]
  response: Option<String>,
  #[arg(long)]
  comments: Option<String>,
}

impl FormArgs {
  /// Overlay the given flags on `base`.
  fn apply(self, mut base: CaseFields) -> CaseFields {
    if let Some(phone) = self.phone {
      base.phone_number = phone;
    }
    if let Some(email) = self.email {
      base.email = email;
    }
    if let Some(reaction) = self.reaction {
      base.main_reaction = Some(reaction);
    }
    if let Some(response) = self.response {
      base.main_response = Some(response);
    }
    if let Some(comments) = self.comments {
      base.comments = comments;
    }
    base
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  store:   Option<PathBuf>,
  #[serde(default)]
  backend: Option<Backend>,
}

/// Where the cases live, after flags, file and defaults are merged.
#[derive(Debug, PartialEq, Eq)]
struct StoreConfig {
  backend: Backend,
  path:    PathBuf,
}

/// CLI flags override the config file, which overrides defaults.
fn resolve(store: Option<PathBuf>, backend: Option<Backend>, file: ConfigFile) -> StoreConfig {
  let backend = backend.or(file.backend).unwrap_or(Backend::Csv);
  let path = store.or(file.store).unwrap_or_else(|| match backend {
    Backend::Csv => PathBuf::from("cases.csv"),
    Backend::Sqlite => PathBuf::from("cases.db"),
  });
  StoreConfig {
    backend,
    path: expand_tilde(&path),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let cfg = resolve(args.store, args.backend, file_cfg);
  match cfg.backend {
    Backend::Csv => run(CaseLog::new(CsvStore::new(cfg.path)), args.command),
    Backend::Sqlite => {
      let store = SqliteStore::open(&cfg.path)
        .with_context(|| format!("opening database {}", cfg.path.display()))?;
      run(CaseLog::new(store), args.command)
    }
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn run<S: CaseStore>(log: CaseLog<S>, command: Command) -> Result<()> {
  let mut app = App::new(log);
  let mut out = io::stdout().lock();

  match command {
    Command::List => app.browse_all()?,
    Command::Search { query } => app.search(&query)?,
    Command::Show { id } => app.open(&CaseId::from(id))?,
    Command::New(form) => {
      let fields = form.apply(CaseFields::default());
      warn_unlisted(&fields);
      app.new_case();
      let saved = app.save(&fields)?;
      writeln!(out, "{}", app.status_msg)?;
      view::draw_form(&mut out, &saved)?;
      return Ok(());
    }
    Command::Edit { id, form } => {
      app.open(&CaseId::from(id))?;
      let Screen::Editor { case: Some(case), .. } = &app.screen else {
        anyhow::bail!("no case is open");
      };
      let fields = form.apply(case.fields());
      warn_unlisted(&fields);
      let saved = app.save(&fields)?;
      writeln!(out, "{}", app.status_msg)?;
      view::draw_form(&mut out, &saved)?;
      return Ok(());
    }
    Command::Delete { id } => {
      app.open(&CaseId::from(id))?;
      app.delete_current()?;
    }
    Command::Counts {
      phone,
      email,
      case_id,
    } => {
      let editing = case_id.map(CaseId::from);
      let counts = app.log.preview_counts(editing.as_ref(), &phone, &email)?;
      let show = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
      writeln!(out, "Cases with this email:        {}", show(counts.email_count))?;
      writeln!(out, "Cases with this phone number: {}", show(counts.phone_count))?;
      return Ok(());
    }
    Command::Repair => {
      let changed = app.log.repair()?;
      writeln!(out, "Repaired {changed} cases.")?;
      writeln!(out, "{}", app.summary()?)?;
      return Ok(());
    }
  }

  view::draw(&mut out, &app.screen, &app.status_msg)?;
  Ok(())
}

/// Selections outside the form's option lists are stored, but usually typos.
fn warn_unlisted(fields: &CaseFields) {
  let checks = [
    ("main_reaction", fields.main_reaction.as_deref(), REACTIONS),
    ("main_response", fields.main_response.as_deref(), RESPONSES),
  ];
  for (field, value, options) in checks {
    let Some(sel) = value.and_then(caselog_core::Selection::parse) else {
      continue;
    };
    if !sel.is_listed(options) {
      warn!(field, value = %sel, "value is not one of the listed options");
    }
  }
}
