//! The `TableStore` trait, the fixed table catalogue, and an in-memory store.
//!
//! Every repository owns one `TableStore` handle and only ever reads or
//! replaces its table whole. The CSV files live in `arena-store-csv`.

use std::cell::{Cell, RefCell};

use strum::AsRefStr;
use thiserror::Error;

use crate::table::Table;

// ─── Catalogue ───────────────────────────────────────────────────────────────

/// The four tables the tracker persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TableKind {
  Matches,
  Teams,
  Games,
  Credentials,
}

impl TableKind {
  /// The declared header, in on-disk column order.
  pub fn header(self) -> &'static [&'static str] {
    match self {
      Self::Matches => &["Date", "Team A", "Team B", "Game Title", "Winning Team"],
      Self::Teams => &["Teams"],
      Self::Games => &["Games"],
      Self::Credentials => &["Username", "Password"],
    }
  }

  /// Fixed file name relative to the data directory.
  pub fn file_name(self) -> String { format!("{}.csv", self.as_ref()) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Load/save access to exactly one table.
///
/// Every operation is a whole-table operation: there is no partial read or
/// write. A handle is bound to its table when constructed.
pub trait TableStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Make sure the table exists and starts with `header`.
  ///
  /// A missing or zero-length table is created header-only. A table whose
  /// first line does not match `header` field-for-field is overwritten
  /// header-only, **losing every row**.
  fn ensure(&self, header: &[&str]) -> Result<(), Self::Error>;

  /// Read the whole table.
  ///
  /// A table with no rows comes back empty over `required` (or over its own
  /// header when `required` is `None`). Every name in `required` that the
  /// table lacks is appended as a column of empty cells.
  fn load(&self, required: Option<&[&str]>) -> Result<Table, Self::Error>;

  /// Replace the whole table with `table`.
  fn save(&self, table: &Table) -> Result<(), Self::Error>;
}

impl<T: TableStore + ?Sized> TableStore for &T {
  type Error = T::Error;

  fn ensure(&self, header: &[&str]) -> Result<(), Self::Error> {
    (**self).ensure(header)
  }

  fn load(&self, required: Option<&[&str]>) -> Result<Table, Self::Error> {
    (**self).load(required)
  }

  fn save(&self, table: &Table) -> Result<(), Self::Error> {
    (**self).save(table)
  }
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// Error returned by [`MemoryTable`] once saves have been switched off.
#[derive(Debug, Error)]
#[error("memory table is read-only")]
pub struct ReadOnly;

/// A [`TableStore`] that keeps its table in memory. Useful for testing.
///
/// `None` models a table that does not exist yet.
#[derive(Debug, Default)]
pub struct MemoryTable {
  table:     RefCell<Option<Table>>,
  read_only: Cell<bool>,
}

impl MemoryTable {
  pub fn new() -> Self { Self::default() }

  /// A store whose table already holds `table`, header included.
  pub fn with_table(table: Table) -> Self {
    Self {
      table:     RefCell::new(Some(table)),
      read_only: Cell::new(false),
    }
  }

  /// Make every subsequent `save` (and header repair) fail.
  pub fn set_read_only(&self, read_only: bool) { self.read_only.set(read_only); }

  /// A copy of the stored table, bypassing `load`'s column handling.
  pub fn snapshot(&self) -> Option<Table> { self.table.borrow().clone() }
}

impl TableStore for MemoryTable {
  type Error = ReadOnly;

  fn ensure(&self, header: &[&str]) -> Result<(), ReadOnly> {
    let matches = self
      .table
      .borrow()
      .as_ref()
      .is_some_and(|t| t.columns().iter().map(String::as_str).eq(header.iter().copied()));
    if matches {
      return Ok(());
    }
    if self.read_only.get() {
      return Err(ReadOnly);
    }
    *self.table.borrow_mut() = Some(Table::new(header.iter().copied()));
    Ok(())
  }

  fn load(&self, required: Option<&[&str]>) -> Result<Table, ReadOnly> {
    let stored = self.table.borrow().clone();
    let mut table = match (stored, required) {
      (Some(t), _) if !t.is_empty() => t,
      (Some(t), None) => t,
      (_, Some(required)) => Table::new(required.iter().copied()),
      (None, None) => Table::default(),
    };
    for column in required.unwrap_or_default() {
      table.require_column(column);
    }
    Ok(table)
  }

  fn save(&self, table: &Table) -> Result<(), ReadOnly> {
    if self.read_only.get() {
      return Err(ReadOnly);
    }
    *self.table.borrow_mut() = Some(table.clone());
    Ok(())
  }
}
