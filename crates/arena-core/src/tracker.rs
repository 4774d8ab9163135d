//! [`Tracker`]: the four repositories opened together.

use crate::{
  credential::{AdminGate, CredentialStore},
  error::Result,
  matches::{self, MatchRecord, MatchRepository},
  query::Scoreboard,
  roster::{GameRepository, Roster, TeamRepository},
  store::{MemoryTable, TableStore},
};

/// One store handle per table, handed to [`Tracker::open`].
#[derive(Debug)]
pub struct Tables<S> {
  pub matches:     S,
  pub teams:       S,
  pub games:       S,
  pub credentials: S,
}

impl Tables<MemoryTable> {
  /// Four empty in-memory tables.
  pub fn in_memory() -> Self {
    Self {
      matches:     MemoryTable::new(),
      teams:       MemoryTable::new(),
      games:       MemoryTable::new(),
      credentials: MemoryTable::new(),
    }
  }
}

/// Every repository of the tracker, each owning its own table handle.
pub struct Tracker<S> {
  pub teams:       TeamRepository<S>,
  pub games:       GameRepository<S>,
  pub matches:     MatchRepository<S>,
  pub credentials: CredentialStore<S>,
}

impl<S: TableStore> Tracker<S> {
  /// Open every repository, creating (or repairing) each table on the way.
  pub fn open(tables: Tables<S>) -> Result<Self> {
    Ok(Self {
      teams:       Roster::teams(tables.teams)?,
      games:       Roster::games(tables.games)?,
      matches:     MatchRepository::open(tables.matches)?,
      credentials: CredentialStore::open(tables.credentials)?,
    })
  }

  /// Record a match, validated against the current team and game rosters.
  pub fn record_match(&self, record: MatchRecord) -> Result<()> {
    self.matches.record_match(record, &self.teams, &self.games)
  }

  /// Check a match's teams and game before the rest of it is known.
  pub fn check_references(&self, team_a: &str, team_b: &str, game_title: &str) -> Result<()> {
    matches::check_references(team_a, team_b, game_title, &self.teams, &self.games)
  }

  pub fn scoreboard(&self) -> Scoreboard<'_, S> { Scoreboard::new(&self.matches) }

  pub fn gate(&self) -> AdminGate<'_, S> { AdminGate::new(&self.credentials) }
}
