//! [`Roster`]: a uniqueness-checked, single-column list of names.
//!
//! Teams and games have the same shape: one column, exact-match uniqueness,
//! add and remove. Both are a `Roster` opened over a different table.

use tracing::debug;

use crate::{
  error::{EntityKind, Error, Result},
  store::{TableKind, TableStore},
  table::Table,
};

/// Repository of registered team names.
pub type TeamRepository<S> = Roster<S>;

/// Repository of registered game titles.
pub type GameRepository<S> = Roster<S>;

pub struct Roster<S> {
  store:  S,
  kind:   EntityKind,
  column: &'static str,
}

impl<S: TableStore> Roster<S> {
  /// Open the team roster, creating its table if needed.
  pub fn teams(store: S) -> Result<Self> {
    Self::open(store, EntityKind::Team, TableKind::Teams)
  }

  /// Open the game roster, creating its table if needed.
  pub fn games(store: S) -> Result<Self> {
    Self::open(store, EntityKind::Game, TableKind::Games)
  }

  fn open(store: S, kind: EntityKind, table: TableKind) -> Result<Self> {
    let header = table.header();
    store.ensure(header).map_err(Error::persistence)?;
    Ok(Self {
      store,
      kind,
      column: header[0],
    })
  }

  pub fn kind(&self) -> EntityKind { self.kind }

  /// The column name, which doubles as the table header.
  pub fn column(&self) -> &'static str { self.column }

  fn load(&self) -> Result<Table> {
    self
      .store
      .load(Some(&[self.column][..]))
      .map_err(Error::persistence)
  }

  fn save(&self, table: &Table) -> Result<()> {
    self.store.save(table).map_err(Error::persistence)
  }

  /// All names in insertion order.
  pub fn list(&self) -> Result<Vec<String>> {
    let table = self.load()?;
    Ok(table.column_values(self.column).map(str::to_owned).collect())
  }

  pub fn is_empty(&self) -> Result<bool> { Ok(self.load()?.is_empty()) }

  pub fn contains(&self, name: &str) -> Result<bool> {
    Ok(self.load()?.contains(self.column, name))
  }

  /// Register `name`. Fails with `AlreadyExists` on an exact duplicate.
  pub fn add(&self, name: &str) -> Result<()> {
    let mut table = self.load()?;
    if table.contains(self.column, name) {
      return Err(Error::AlreadyExists {
        kind:  self.kind,
        value: name.to_owned(),
      });
    }
    table.push_record([(self.column, name.to_owned())]);
    self.save(&table)?;
    debug!(kind = %self.kind, name, "added");
    Ok(())
  }

  /// Remove every entry equal to `name`. Fails with `NotFound` if none is.
  pub fn remove(&self, name: &str) -> Result<()> {
    let mut table = self.load()?;
    let column = self.column;
    let removed = table.retain(|r| r.get(column) != Some(name));
    if removed == 0 {
      return Err(Error::NotFound {
        kind:  self.kind,
        value: name.to_owned(),
      });
    }
    self.save(&table)?;
    debug!(kind = %self.kind, name, removed, "removed");
    Ok(())
  }
}
