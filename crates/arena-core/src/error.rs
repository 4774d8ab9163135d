//! Error types for `arena-core`.

use strum::Display;
use thiserror::Error;

/// The kind of entity a uniqueness or lookup failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntityKind {
  #[strum(serialize = "team")]
  Team,
  #[strum(serialize = "game")]
  Game,
  #[strum(serialize = "admin")]
  Admin,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} already exists: {value:?}")]
  AlreadyExists { kind: EntityKind, value: String },

  #[error("{kind} not found: {value:?}")]
  NotFound { kind: EntityKind, value: String },

  /// A match named a team or game that is not currently registered.
  #[error("{kind} is not registered: {value:?}")]
  InvalidReference { kind: EntityKind, value: String },

  #[error("winning team {0:?} did not play in the match")]
  InvalidWinner(String),

  /// Matches cannot be recorded until at least one team and one game exist.
  #[error("teams and games must be registered before recording a match")]
  PreconditionFailed,

  #[error("incorrect admin pin")]
  AccessDenied,

  #[error("table storage failed: {0}")]
  PersistenceFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn persistence<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::PersistenceFailed(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
