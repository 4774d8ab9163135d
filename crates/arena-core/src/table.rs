//! [`Table`]: the in-memory form of one tabular file.
//!
//! A table is an ordered column list plus rows of string cells. Every row has
//! exactly one cell per column; rows keep insertion (file) order.

/// An ordered sequence of records over a fixed column list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  columns: Vec<String>,
  rows:    Vec<Vec<String>>,
}

/// A borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
  columns: &'a [String],
  values:  &'a [String],
}

impl<'a> Record<'a> {
  /// The cell under `column`, or `None` if the table has no such column.
  pub fn get(&self, column: &str) -> Option<&'a str> {
    self
      .columns
      .iter()
      .position(|c| c == column)
      .map(|i| self.values[i].as_str())
  }

  pub fn values(&self) -> &'a [String] { self.values }
}

impl Table {
  /// An empty table over `columns`.
  pub fn new<I, S>(columns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      columns: columns.into_iter().map(Into::into).collect(),
      rows:    Vec::new(),
    }
  }

  pub fn columns(&self) -> &[String] { &self.columns }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn rows(&self) -> impl ExactSizeIterator<Item = Record<'_>> + '_ {
    self.rows.iter().map(|values| Record {
      columns: &self.columns,
      values,
    })
  }

  /// Every cell of `column` in row order. Empty if the column is absent.
  pub fn column_values<'a>(
    &'a self,
    column: &str,
  ) -> impl Iterator<Item = &'a str> + 'a {
    let index = self.column_index(column);
    self
      .rows
      .iter()
      .filter_map(move |row| index.map(|i| row[i].as_str()))
  }

  /// Whether some row holds exactly `value` under `column`.
  pub fn contains(&self, column: &str, value: &str) -> bool {
    self.column_values(column).any(|v| v == value)
  }

  /// Append `column` (with an empty cell in every row) unless already present.
  pub fn require_column(&mut self, column: &str) {
    if self.column_index(column).is_some() {
      return;
    }
    self.columns.push(column.to_owned());
    for row in &mut self.rows {
      row.push(String::new());
    }
  }

  /// Append a row given as raw cells in column order.
  ///
  /// Missing trailing cells are filled with empty strings; extra cells are
  /// dropped.
  pub fn push_row(&mut self, mut cells: Vec<String>) {
    cells.resize(self.columns.len(), String::new());
    self.rows.push(cells);
  }

  /// Append a row given as `(column, value)` pairs. Columns not named are
  /// left empty; names the table does not have are ignored.
  pub fn push_record<'c, I>(&mut self, fields: I)
  where
    I: IntoIterator<Item = (&'c str, String)>,
  {
    let mut row = vec![String::new(); self.columns.len()];
    for (column, value) in fields {
      if let Some(i) = self.column_index(column) {
        row[i] = value;
      }
    }
    self.rows.push(row);
  }

  /// Keep only the rows for which `keep` returns true. Returns how many rows
  /// were removed.
  pub fn retain<F>(&mut self, mut keep: F) -> usize
  where
    F: FnMut(Record<'_>) -> bool,
  {
    let before = self.rows.len();
    let columns = &self.columns;
    self.rows.retain(|values| keep(Record { columns, values }));
    before - self.rows.len()
  }

  fn column_index(&self, column: &str) -> Option<usize> {
    self.columns.iter().position(|c| c == column)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn push_record_places_values_by_column() {
    let mut t = Table::new(["Username", "Password"]);
    t.push_record([("Password", "hunter2".to_owned()), ("Username", "root".to_owned())]);

    let row = t.rows().next().unwrap();
    assert_eq!(row.get("Username"), Some("root"));
    assert_eq!(row.get("Password"), Some("hunter2"));
    assert_eq!(row.get("Email"), None);
  }

  #[test]
  fn require_column_backfills_existing_rows() {
    let mut t = Table::new(["Teams"]);
    t.push_row(vec!["Fnatic".into()]);
    t.require_column("Region");
    t.require_column("Teams");

    assert_eq!(t.columns(), ["Teams", "Region"]);
    assert_eq!(t.rows().next().unwrap().values(), ["Fnatic", ""]);
  }

  #[test]
  fn retain_reports_removed_count() {
    let mut t = Table::new(["Games"]);
    for g in ["Dota 2", "Valorant", "Dota 2"] {
      t.push_row(vec![g.into()]);
    }
    let removed = t.retain(|r| r.get("Games") != Some("Dota 2"));
    assert_eq!(removed, 2);
    assert_eq!(t.column_values("Games").collect::<Vec<_>>(), ["Valorant"]);
  }
}
