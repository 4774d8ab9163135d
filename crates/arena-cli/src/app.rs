//! Interactive session: menus, prompts, and turning outcomes into
//! notifications.

use arena_core::{
  Access, EntityKind, Error, MatchRecord, Roster, Score, TableKind, TableStore,
  Tracker,
};

use crate::console::Console;

const RECENT_COUNT: usize = 5;

// ─── Rows ─────────────────────────────────────────────────────────────────────

pub fn match_rows(matches: &[MatchRecord]) -> Vec<Vec<String>> {
  matches
    .iter()
    .map(|m| m.cells().map(str::to_owned).to_vec())
    .collect()
}

pub fn score_rows(scores: &[Score]) -> Vec<Vec<String>> {
  scores
    .iter()
    .map(|s| vec![s.team.clone(), s.wins.to_string()])
    .collect()
}

pub const SCORE_COLUMNS: [&str; 2] = ["Team", "Wins"];

fn noun(kind: EntityKind) -> &'static str {
  match kind {
    EntityKind::Team => "Team",
    EntityKind::Game => "Game",
    EntityKind::Admin => "Admin",
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RosterAction {
  Add,
  Remove,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// The menu-driven session over a [`Tracker`].
pub struct App<'t, S, C> {
  tracker: &'t Tracker<S>,
  console: C,
}

impl<'t, S: TableStore, C: Console> App<'t, S, C> {
  pub fn new(tracker: &'t Tracker<S>, console: C) -> Self { Self { tracker, console } }

  /// Run the main menu until the user leaves it.
  pub fn run(&mut self) {
    while let Some(choice) = self
      .console
      .menu("E-Sports Results Tracker", &["User Mode", "Admin Mode"])
    {
      match choice {
        0 => self.user_menu(),
        _ => self.admin_login(),
      }
    }
  }

  fn user_menu(&mut self) {
    while let Some(choice) = self.console.menu("User Mode", &[
      "View Recent Matches",
      "Overall Team Scores",
      "Scores for Specific Game",
    ]) {
      match choice {
        0 => self.show_recent_matches(),
        1 => self.show_team_scores(),
        _ => self.show_game_scores(),
      }
    }
  }

  fn admin_menu(&mut self) {
    while let Some(choice) = self.console.menu("Admin Mode", &[
      "View All Teams",
      "Add a New Team",
      "Remove a Team",
      "View All Games",
      "Add a New Game",
      "Remove a Game",
      "Record Match Outcome",
      "View All Matches",
    ]) {
      let tracker = self.tracker;
      match choice {
        0 => self.view_roster(&tracker.teams),
        1 => self.add_team(),
        2 => self.remove_team(),
        3 => self.view_roster(&tracker.games),
        4 => self.add_game(),
        5 => self.remove_game(),
        6 => self.record_match(),
        _ => self.view_matches(),
      }
    }
  }

  // ── Error reporting ───────────────────────────────────────────────────────

  /// Show `err` to the user. Nothing is retried.
  fn report(&mut self, err: Error) {
    let message = match &err {
      Error::AlreadyExists { kind: EntityKind::Admin, .. } => {
        "Username already exists. Please choose a different one.".to_owned()
      }
      Error::AlreadyExists { kind, .. } => format!("{} already exists.", noun(*kind)),
      Error::NotFound { kind, .. } => format!("{} not found.", noun(*kind)),
      Error::PreconditionFailed => {
        "Please ensure teams and games are registered.".to_owned()
      }
      Error::InvalidReference { .. } => {
        "Please ensure teams and games are correctly registered.".to_owned()
      }
      Error::InvalidWinner(_) => {
        "The winning team must be one of the competing teams.".to_owned()
      }
      Error::AccessDenied => "Incorrect pin. Access denied.".to_owned(),
      Error::PersistenceFailed(source) => {
        tracing::error!(error = %source, "table access failed");
        "Could not read or write the data files. Nothing was changed.".to_owned()
      }
    };
    tracing::debug!(error = %err, "operation failed");
    self.console.show_error(&message);
  }

  // ── User mode ─────────────────────────────────────────────────────────────

  pub fn show_recent_matches(&mut self) {
    let tracker = self.tracker;
    match tracker.scoreboard().recent(RECENT_COUNT) {
      Ok(matches) => self.console.render_table(
        "Recent Matches",
        TableKind::Matches.header(),
        &match_rows(&matches),
      ),
      Err(e) => self.report(e),
    }
  }

  pub fn show_team_scores(&mut self) {
    let tracker = self.tracker;
    match tracker.scoreboard().team_scores() {
      Ok(scores) => {
        self
          .console
          .render_table("Team Scores", &SCORE_COLUMNS, &score_rows(&scores))
      }
      Err(e) => self.report(e),
    }
  }

  pub fn show_game_scores(&mut self) {
    let game = self.console.prompt_text("Enter game title:");
    let tracker = self.tracker;
    match tracker.scoreboard().game_scores(&game) {
      Ok(scores) if scores.is_empty() => {
        self
          .console
          .show_info("No records found for the specified game.")
      }
      Ok(scores) => self.console.render_table(
        &format!("Scores for {game}"),
        &SCORE_COLUMNS,
        &score_rows(&scores),
      ),
      Err(e) => self.report(e),
    }
  }

  // ── Admin access ──────────────────────────────────────────────────────────

  /// Ask for credentials; on success enter the admin menu, otherwise offer
  /// to register.
  pub fn admin_login(&mut self) {
    let username = self.console.prompt_text("Enter username:");
    let password = self.console.prompt_secret("Enter password:");

    let tracker = self.tracker;
    match tracker.gate().login(&username, &password) {
      Ok(Access::Granted) => {
        self.console.show_info("Welcome, Admin!");
        self.admin_menu();
      }
      Ok(Access::Denied) => {
        if self.console.confirm(
          "Invalid username or password. Would you like to register as a new \
           admin?",
        ) {
          self.register_admin();
        }
      }
      Err(e) => self.report(e),
    }
  }

  pub fn register_admin(&mut self) {
    let tracker = self.tracker;
    let gate = tracker.gate();
    let pin = self.console.prompt_secret("Enter the admin pin:");
    if !gate.pin_matches(&pin) {
      self.report(Error::AccessDenied);
      return;
    }

    let username = self.console.prompt_text("Enter a new username:");
    if username.is_empty() {
      self.console.show_error("Username cannot be empty.");
      return;
    }
    let password = self.console.prompt_secret("Enter a new password:");

    match gate.register_with_pin(&pin, &username, &password) {
      Ok(()) => {
        self
          .console
          .show_info("Admin registered successfully! You can now log in.")
      }
      Err(e) => self.report(e),
    }
  }

  // ── Teams and games ───────────────────────────────────────────────────────

  fn view_roster(&mut self, roster: &Roster<S>) {
    match roster.list() {
      Ok(names) => {
        let rows: Vec<Vec<String>> = names.into_iter().map(|n| vec![n]).collect();
        let title = format!("{}s", noun(roster.kind()));
        self.console.render_table(&title, &[roster.column()], &rows);
      }
      Err(e) => self.report(e),
    }
  }

  fn modify_roster(&mut self, roster: &Roster<S>, action: RosterAction) {
    let noun = noun(roster.kind());
    let verb = match action {
      RosterAction::Add => "add",
      RosterAction::Remove => "remove",
    };
    let name = self
      .console
      .prompt_text(&format!("Enter {} name to {verb}:", noun.to_lowercase()));
    if name.is_empty() {
      return;
    }

    let (outcome, done) = match action {
      RosterAction::Add => (roster.add(&name), "added"),
      RosterAction::Remove => (roster.remove(&name), "removed"),
    };
    match outcome {
      Ok(()) => self.console.show_info(&format!("{noun} {done} successfully.")),
      Err(e) => self.report(e),
    }
  }

  pub fn add_team(&mut self) {
    let tracker = self.tracker;
    self.modify_roster(&tracker.teams, RosterAction::Add)
  }

  pub fn remove_team(&mut self) {
    let tracker = self.tracker;
    self.modify_roster(&tracker.teams, RosterAction::Remove)
  }

  pub fn add_game(&mut self) {
    let tracker = self.tracker;
    self.modify_roster(&tracker.games, RosterAction::Add)
  }

  pub fn remove_game(&mut self) {
    let tracker = self.tracker;
    self.modify_roster(&tracker.games, RosterAction::Remove)
  }

  // ── Matches ───────────────────────────────────────────────────────────────

  /// Collect a match outcome field by field and record it.
  pub fn record_match(&mut self) {
    let date = self.console.prompt_text("Enter the date (DD-MM-YYYY):");

    let tracker = self.tracker;
    match (tracker.teams.is_empty(), tracker.games.is_empty()) {
      (Ok(false), Ok(false)) => {}
      (Err(e), _) | (_, Err(e)) => return self.report(e),
      _ => return self.report(Error::PreconditionFailed),
    }

    let team_a = self.console.prompt_text("Enter the first team:");
    let team_b = self.console.prompt_text("Enter the second team:");
    let game_title = self.console.prompt_text("Enter the game title:");
    if let Err(e) = tracker.check_references(&team_a, &team_b, &game_title) {
      return self.report(e);
    }
    let winning_team = self.console.prompt_text("Enter the winning team:");

    let record = MatchRecord {
      date,
      team_a,
      team_b,
      game_title,
      winning_team,
    };
    match tracker.record_match(record) {
      Ok(()) => self.console.show_info("Match recorded successfully."),
      Err(e) => self.report(e),
    }
  }

  pub fn view_matches(&mut self) {
    let tracker = self.tracker;
    match tracker.matches.list() {
      Ok(matches) => self.console.render_table(
        "All Matches",
        TableKind::Matches.header(),
        &match_rows(&matches),
      ),
      Err(e) => self.report(e),
    }
  }

  #[cfg(test)]
  pub(crate) fn console(&self) -> &C { &self.console }
}

#[cfg(test)]
mod tests;
