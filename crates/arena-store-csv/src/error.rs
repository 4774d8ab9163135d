//! Error type for `arena-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error on {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("could not replace table file: {0}")]
  Persist(#[from] tempfile::PersistError),

  /// A data row has more fields than the header.
  #[error("{path:?} line {line}: expected {expected} fields, found {found}")]
  Malformed {
    path:     PathBuf,
    line:     u64,
    expected: usize,
    found:    usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
