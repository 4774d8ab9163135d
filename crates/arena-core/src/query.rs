//! Read-only aggregations over the match history.

use serde::{Deserialize, Serialize};

use crate::{
  error::Result,
  matches::{MatchRecord, MatchRepository},
  store::TableStore,
};

/// A team and how many recorded matches it won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
  pub team: String,
  pub wins: usize,
}

/// Queries over a [`MatchRepository`]. Holds no state of its own.
pub struct Scoreboard<'a, S> {
  matches: &'a MatchRepository<S>,
}

impl<'a, S: TableStore> Scoreboard<'a, S> {
  pub fn new(matches: &'a MatchRepository<S>) -> Self { Self { matches } }

  /// The last `n` matches, oldest first.
  pub fn recent(&self, n: usize) -> Result<Vec<MatchRecord>> {
    let mut all = self.matches.list()?;
    let skip = all.len().saturating_sub(n);
    Ok(all.split_off(skip))
  }

  /// Win counts over every match, most wins first.
  pub fn team_scores(&self) -> Result<Vec<Score>> {
    Ok(tally(self.matches.list()?.iter()))
  }

  /// Win counts over matches of `game_title` only. Empty when no match of
  /// that game was recorded.
  pub fn game_scores(&self, game_title: &str) -> Result<Vec<Score>> {
    let all = self.matches.list()?;
    Ok(tally(all.iter().filter(|m| m.game_title == game_title)))
  }
}

/// Count wins per winning team, ordered by descending count.
///
/// Teams with equal counts keep the order in which they first appear as a
/// winner.
fn tally<'m>(matches: impl Iterator<Item = &'m MatchRecord>) -> Vec<Score> {
  let mut scores: Vec<Score> = Vec::new();
  for m in matches {
    match scores.iter_mut().find(|s| s.team == m.winning_team) {
      Some(score) => score.wins += 1,
      None => scores.push(Score {
        team: m.winning_team.clone(),
        wins: 1,
      }),
    }
  }
  scores.sort_by(|a, b| b.wins.cmp(&a.wins));
  scores
}
