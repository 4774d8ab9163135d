//! Match records: append-only, validated against the rosters at write time.
//!
//! A record is never updated or removed once stored. Its team and game fields
//! are checked when it is recorded and never again; removing a team later does
//! not touch existing matches.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  error::{EntityKind, Error, Result},
  roster::Roster,
  store::{TableKind, TableStore},
  table::{Record, Table},
};

const DATE: &str = "Date";
const TEAM_A: &str = "Team A";
const TEAM_B: &str = "Team B";
const GAME_TITLE: &str = "Game Title";
const WINNING_TEAM: &str = "Winning Team";

/// One match outcome. The date is free-form text and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
  pub date:         String,
  pub team_a:       String,
  pub team_b:       String,
  pub game_title:   String,
  pub winning_team: String,
}

impl MatchRecord {
  fn from_record(r: Record<'_>) -> Self {
    let cell = |column: &str| r.get(column).unwrap_or_default().to_owned();
    Self {
      date:         cell(DATE),
      team_a:       cell(TEAM_A),
      team_b:       cell(TEAM_B),
      game_title:   cell(GAME_TITLE),
      winning_team: cell(WINNING_TEAM),
    }
  }

  /// Cells in on-disk column order.
  pub fn cells(&self) -> [&str; 5] {
    [
      self.date.as_str(),
      self.team_a.as_str(),
      self.team_b.as_str(),
      self.game_title.as_str(),
      self.winning_team.as_str(),
    ]
  }
}

pub struct MatchRepository<S> {
  store: S,
}

impl<S: TableStore> MatchRepository<S> {
  /// Open the match table, creating it if needed.
  pub fn open(store: S) -> Result<Self> {
    store
      .ensure(TableKind::Matches.header())
      .map_err(Error::persistence)?;
    Ok(Self { store })
  }

  fn load(&self) -> Result<Table> {
    self
      .store
      .load(Some(TableKind::Matches.header()))
      .map_err(Error::persistence)
  }

  /// Every stored match in insertion order.
  pub fn list(&self) -> Result<Vec<MatchRecord>> {
    Ok(self.load()?.rows().map(MatchRecord::from_record).collect())
  }

  pub fn len(&self) -> Result<usize> { Ok(self.load()?.len()) }

  pub fn is_empty(&self) -> Result<bool> { Ok(self.len()? == 0) }

  /// Validate `record` against the current rosters and append it.
  ///
  /// Checks run in order: both rosters non-empty (`PreconditionFailed`), both
  /// teams and the game registered (`InvalidReference`), winner is one of the
  /// two teams (`InvalidWinner`). The two teams may be the same name.
  pub fn record_match<T, G>(
    &self,
    record: MatchRecord,
    teams: &Roster<T>,
    games: &Roster<G>,
  ) -> Result<()>
  where
    T: TableStore,
    G: TableStore,
  {
    if teams.is_empty()? || games.is_empty()? {
      return Err(Error::PreconditionFailed);
    }
    check_references(&record.team_a, &record.team_b, &record.game_title, teams, games)?;

    if record.winning_team != record.team_a && record.winning_team != record.team_b {
      return Err(Error::InvalidWinner(record.winning_team));
    }

    let mut table = self.load()?;
    table.push_record(
      TableKind::Matches
        .header()
        .iter()
        .copied()
        .zip(record.cells().map(str::to_owned)),
    );
    self.store.save(&table).map_err(Error::persistence)?;
    debug!(
      team_a = %record.team_a,
      team_b = %record.team_b,
      game = %record.game_title,
      winner = %record.winning_team,
      "recorded match"
    );
    Ok(())
  }
}

/// Fail with `InvalidReference` unless both teams and the game are registered.
///
/// Teams are checked before the game.
pub fn check_references<T, G>(
  team_a: &str,
  team_b: &str,
  game_title: &str,
  teams: &Roster<T>,
  games: &Roster<G>,
) -> Result<()>
where
  T: TableStore,
  G: TableStore,
{
  for team in [team_a, team_b] {
    if !teams.contains(team)? {
      return Err(Error::InvalidReference {
        kind:  EntityKind::Team,
        value: team.to_owned(),
      });
    }
  }
  if !games.contains(game_title)? {
    return Err(Error::InvalidReference {
      kind:  EntityKind::Game,
      value: game_title.to_owned(),
    });
  }
  Ok(())
}
