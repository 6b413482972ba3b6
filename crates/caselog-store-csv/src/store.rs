//! [`CsvStore`] — the flat-file implementation of [`CaseStore`].

use std::{
  ffi::OsString,
  fs::{self, File},
  io::{self, BufReader},
  path::{Path, PathBuf},
};

use caselog_core::{Case, store::CaseStore};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::{
  Error, Result,
  row::{COLUMNS, RawRow, Schema, encode},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A case store backed by a single CSV file.
///
/// Holds only the path; every operation opens, uses and closes the file.
#[derive(Debug, Clone)]
pub struct CsvStore {
  path: PathBuf,
}

impl CsvStore {
  /// A store at `path`. The file is created on the first write.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Layout of the file on disk, or `None` if it does not exist yet.
  pub fn schema(&self) -> Result<Option<Schema>> {
    let Some(mut reader) = self.open_reader()? else {
      return Ok(None);
    };
    let headers = reader.headers()?;
    Ok(Some(Schema::detect(headers)))
  }

  /// Sibling file that receives each rewrite before it is renamed in place.
  fn temp_path(&self) -> PathBuf {
    let mut name = self
      .path
      .file_name()
      .map(OsString::from)
      .unwrap_or_else(|| OsString::from("cases.csv"));
    name.push(".tmp");
    self.path.with_file_name(name)
  }

  fn open_reader(&self) -> Result<Option<csv::Reader<BufReader<File>>>> {
    let file = match File::open(&self.path) {
      Ok(file) => file,
      Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(err) => return Err(io_error(&self.path, err)),
    };
    Ok(Some(
      ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file)),
    ))
  }

  fn read_rows(&self) -> Result<Vec<Case>> {
    let Some(mut reader) = self.open_reader()? else {
      return Ok(Vec::new());
    };

    let headers: StringRecord = reader.headers()?.clone();
    if headers.is_empty() {
      return Ok(Vec::new());
    }
    if !headers.iter().any(|h| h == COLUMNS[0]) {
      return Err(Error::MissingCaseId {
        path: self.path.clone(),
      });
    }
    if Schema::detect(&headers) == Schema::Legacy {
      debug!(
        path = %self.path.display(),
        "legacy call_count schema; counters will be rebuilt on next write"
      );
    }

    let mut cases = Vec::new();
    for (idx, raw) in reader.deserialize::<RawRow>().enumerate() {
      // +2: 1-based, after the header row.
      let row = idx as u64 + 2;
      cases.push(raw?.into_case(row)?);
    }
    Ok(cases)
  }

  fn write_rows(&self, target: &Path, cases: &[Case]) -> Result<()> {
    let file = File::create(target).map_err(|e| io_error(target, e))?;
    {
      let mut writer = csv::Writer::from_writer(&file);
      writer.write_record(COLUMNS)?;
      for case in cases {
        writer.write_record(encode(case))?;
      }
      writer.flush().map_err(|e| io_error(target, e))?;
    }
    file.sync_all().map_err(|e| io_error(target, e))
  }
}

fn io_error(path: &Path, source: io::Error) -> Error {
  Error::Io {
    path: path.to_path_buf(),
    source,
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for CsvStore {
  type Error = Error;

  fn load_all(&self) -> Result<Vec<Case>> { self.read_rows() }

  fn save_all(&self, cases: &[Case]) -> Result<()> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let tmp = self.temp_path();
    if let Err(err) = self.write_rows(&tmp, cases) {
      fs::remove_file(&tmp).ok();
      return Err(err);
    }
    fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;

    debug!(path = %self.path.display(), rows = cases.len(), "wrote case file");
    Ok(())
  }
}
