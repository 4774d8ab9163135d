//! [`CsvTable`]: the CSV file implementation of [`TableStore`].

use std::{
  fs::{self, File},
  io::{self, BufRead as _, BufReader, Write as _},
  path::{Path, PathBuf},
};

use arena_core::{
  store::{TableKind, TableStore},
  table::Table,
  tracker::Tables,
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A data directory holding one CSV file per [`TableKind`].
#[derive(Debug, Clone)]
pub struct CsvStore {
  dir: PathBuf,
}

impl CsvStore {
  /// Use `dir` as the data directory, creating it if it does not exist.
  pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    fs::create_dir_all(&dir).map_err(|source| Error::Io {
      path: dir.clone(),
      source,
    })?;
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// A handle on the file backing `kind`.
  pub fn table(&self, kind: TableKind) -> CsvTable {
    CsvTable::new(self.dir.join(kind.file_name()))
  }

  /// Handles on all four tables, ready for `Tracker::open`.
  pub fn tables(&self) -> Tables<CsvTable> {
    Tables {
      matches:     self.table(TableKind::Matches),
      teams:       self.table(TableKind::Teams),
      games:       self.table(TableKind::Games),
      credentials: self.table(TableKind::Credentials),
    }
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// One comma-separated file with a header row.
///
/// Nothing is cached: every call reads or rewrites the whole file.
#[derive(Debug, Clone)]
pub struct CsvTable {
  path: PathBuf,
}

impl CsvTable {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn io_error(&self, source: io::Error) -> Error {
    Error::Io {
      path: self.path.clone(),
      source,
    }
  }

  /// First line of the file with surrounding whitespace stripped.
  fn first_line(&self) -> Result<String> {
    let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
    let mut line = String::new();
    BufReader::new(file)
      .read_line(&mut line)
      .map_err(|e| self.io_error(e))?;
    Ok(line.trim().to_owned())
  }

  /// Write `table` to a sibling temporary file, then rename it over the
  /// target so readers never see a half-written table.
  fn write(&self, table: &Table) -> Result<()> {
    let dir = match self.path.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
    {
      let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
      writer.write_record(table.columns())?;
      for row in table.rows() {
        writer.write_record(row.values())?;
      }
      writer.flush().map_err(|e| self.io_error(e))?;
    }
    tmp.as_file_mut().flush().map_err(|e| self.io_error(e))?;
    tmp.persist(&self.path)?;
    Ok(())
  }
}

fn empty_over(columns: &[&str]) -> Table { Table::new(columns.iter().copied()) }

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for CsvTable {
  type Error = Error;

  fn ensure(&self, header: &[&str]) -> Result<()> {
    match fs::metadata(&self.path) {
      Ok(meta) if meta.len() > 0 => {}
      Ok(_) => return self.write(&empty_over(header)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "creating table");
        return self.write(&empty_over(header));
      }
      Err(e) => return Err(self.io_error(e)),
    }

    let found = self.first_line()?;
    if !found.split(',').eq(header.iter().copied()) {
      warn!(
        path = %self.path.display(),
        found = %found,
        expected = %header.join(","),
        "header mismatch; discarding every row of the table"
      );
      self.write(&empty_over(header))?;
    }
    Ok(())
  }

  fn load(&self, required: Option<&[&str]>) -> Result<Table> {
    let file = match File::open(&self.path) {
      Ok(f) => f,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Ok(empty_over(required.unwrap_or_default()));
      }
      Err(e) => return Err(self.io_error(e)),
    };

    let mut reader = csv::ReaderBuilder::new()
      .has_headers(true)
      .flexible(true)
      .from_reader(file);
    let header = reader.headers()?.clone();
    let mut table = Table::new(header.iter());

    for result in reader.records() {
      let record = result?;
      if record.len() > header.len() {
        return Err(Error::Malformed {
          path:     self.path.clone(),
          line:     record.position().map_or(0, |p| p.line()),
          expected: header.len(),
          found:    record.len(),
        });
      }
      table.push_row(record.iter().map(str::to_owned).collect());
    }

    if table.is_empty()
      && let Some(required) = required
    {
      table = empty_over(required);
    }
    for column in required.unwrap_or_default() {
      table.require_column(column);
    }
    Ok(table)
  }

  fn save(&self, table: &Table) -> Result<()> {
    self.write(table)?;
    debug!(path = %self.path.display(), rows = table.len(), "saved table");
    Ok(())
  }
}
