//! Session tests with a scripted console over in-memory tables.

use std::collections::VecDeque;

use arena_core::{MatchRecord, MemoryTable, Tables, Tracker};

use super::App;
use crate::console::Console;

/// A console that answers from queues and records everything it is shown.
#[derive(Default)]
struct Script {
  answers:  VecDeque<String>,
  confirms: VecDeque<bool>,
  choices:  VecDeque<Option<usize>>,
  infos:    Vec<String>,
  errors:   Vec<String>,
  tables:   Vec<(String, Vec<Vec<String>>)>,
}

impl Script {
  fn answering(answers: &[&str]) -> Self {
    Self {
      answers: answers.iter().map(|a| a.to_string()).collect(),
      ..Self::default()
    }
  }
}

impl Console for Script {
  fn show_info(&mut self, message: &str) { self.infos.push(message.into()); }

  fn show_error(&mut self, message: &str) { self.errors.push(message.into()); }

  fn confirm(&mut self, _question: &str) -> bool {
    self.confirms.pop_front().unwrap_or(false)
  }

  fn prompt_text(&mut self, _label: &str) -> String {
    self.answers.pop_front().unwrap_or_default()
  }

  fn prompt_secret(&mut self, label: &str) -> String { self.prompt_text(label) }

  fn render_table(&mut self, title: &str, _columns: &[&str], rows: &[Vec<String>]) {
    self.tables.push((title.into(), rows.to_vec()));
  }

  fn menu(&mut self, _title: &str, _items: &[&str]) -> Option<usize> {
    self.choices.pop_front().flatten()
  }
}

fn tracker() -> Tracker<MemoryTable> {
  Tracker::open(Tables::in_memory()).expect("in-memory tracker")
}

fn seeded() -> Tracker<MemoryTable> {
  let t = tracker();
  for team in ["Fnatic", "G2"] {
    t.teams.add(team).unwrap();
  }
  t.games.add("Valorant").unwrap();
  t
}

fn record(t: &Tracker<MemoryTable>, date: &str, winner: &str, game: &str) {
  t.record_match(MatchRecord {
    date:         date.into(),
    team_a:       "Fnatic".into(),
    team_b:       "G2".into(),
    game_title:   game.into(),
    winning_team: winner.into(),
  })
  .unwrap();
}

// ─── Teams and games ──────────────────────────────────────────────────────────

#[test]
fn add_team_reports_success_then_duplicate() {
  let t = tracker();
  let mut app = App::new(&t, Script::answering(&["Fnatic", "Fnatic"]));

  app.add_team();
  app.add_team();

  assert_eq!(app.console().infos, ["Team added successfully."]);
  assert_eq!(app.console().errors, ["Team already exists."]);
  assert_eq!(t.teams.list().unwrap(), ["Fnatic"]);
}

#[test]
fn remove_missing_game_reports_not_found() {
  let t = seeded();
  let mut app = App::new(&t, Script::answering(&["Chess"]));

  app.remove_game();

  assert_eq!(app.console().errors, ["Game not found."]);
  assert_eq!(t.games.list().unwrap(), ["Valorant"]);
}

#[test]
fn empty_name_is_ignored() {
  let t = tracker();
  let mut app = App::new(&t, Script::answering(&[""]));

  app.add_team();

  assert!(app.console().infos.is_empty());
  assert!(app.console().errors.is_empty());
  assert!(t.teams.list().unwrap().is_empty());
}

#[test]
fn failed_save_is_reported_not_celebrated() {
  let tables = Tables::in_memory();
  let t = Tracker::open(Tables {
    matches:     &tables.matches,
    teams:       &tables.teams,
    games:       &tables.games,
    credentials: &tables.credentials,
  })
  .unwrap();
  tables.teams.set_read_only(true);
  let mut app = App::new(&t, Script::answering(&["Fnatic"]));

  app.add_team();

  assert!(app.console().infos.is_empty());
  assert_eq!(app.console().errors.len(), 1);
  assert!(app.console().errors[0].starts_with("Could not read or write"));
}

// ─── Matches ──────────────────────────────────────────────────────────────────

#[test]
fn record_match_stops_before_team_prompts_when_rosters_are_empty() {
  let t = tracker();
  let mut app = App::new(&t, Script::answering(&["01-01-2024", "Fnatic"]));

  app.record_match();

  assert_eq!(app.console().errors, [
    "Please ensure teams and games are registered."
  ]);
  // Only the date prompt was consumed.
  assert_eq!(app.console().answers.len(), 1);
}

#[test]
fn record_match_happy_path() {
  let t = seeded();
  let mut app = App::new(
    &t,
    Script::answering(&["01-01-2024", "Fnatic", "G2", "Valorant", "G2"]),
  );

  app.record_match();

  assert_eq!(app.console().infos, ["Match recorded successfully."]);
  assert_eq!(t.matches.list().unwrap()[0].winning_team, "G2");
}

#[test]
fn record_match_rejections_map_to_messages() {
  let t = seeded();
  let mut app = App::new(
    &t,
    Script::answering(&[
      "d1", "Fnatic", "Cloud9", "Valorant", // unknown team, no winner asked
      "d2", "Fnatic", "G2", "Chess", // unknown game, no winner asked
      "d3", "Fnatic", "G2", "Valorant", "Cloud9", // outside winner
    ]),
  );

  app.record_match();
  app.record_match();
  app.record_match();

  assert_eq!(app.console().errors, [
    "Please ensure teams and games are correctly registered.",
    "Please ensure teams and games are correctly registered.",
    "The winning team must be one of the competing teams.",
  ]);
  assert!(app.console().answers.is_empty());
  assert!(t.matches.is_empty().unwrap());
}

#[test]
fn unknown_team_is_reported_before_the_winner_prompt() {
  let t = seeded();
  let mut app = App::new(
    &t,
    Script::answering(&["d1", "Fnatic", "Cloud9", "Valorant", "next"]),
  );

  app.record_match();

  assert_eq!(app.console().errors, [
    "Please ensure teams and games are correctly registered."
  ]);
  assert_eq!(app.console().answers, ["next"]);
}

// ─── User mode ────────────────────────────────────────────────────────────────

#[test]
fn recent_matches_shows_last_five() {
  let t = seeded();
  for i in 1..=7 {
    record(&t, &format!("d{i}"), "Fnatic", "Valorant");
  }
  let mut app = App::new(&t, Script::default());

  app.show_recent_matches();

  let (title, rows) = &app.console().tables[0];
  assert_eq!(title, "Recent Matches");
  let dates: Vec<_> = rows.iter().map(|r| r[0].as_str()).collect();
  assert_eq!(dates, ["d3", "d4", "d5", "d6", "d7"]);
}

#[test]
fn team_scores_table() {
  let t = seeded();
  record(&t, "d1", "Fnatic", "Valorant");
  record(&t, "d2", "G2", "Valorant");
  record(&t, "d3", "G2", "Valorant");
  let mut app = App::new(&t, Script::default());

  app.show_team_scores();

  let (_, rows) = &app.console().tables[0];
  assert_eq!(rows, &[vec!["G2".to_string(), "2".into()], vec![
    "Fnatic".into(),
    "1".into()
  ]]);
}

#[test]
fn game_scores_without_records_shows_message() {
  let t = seeded();
  record(&t, "d1", "Fnatic", "Valorant");
  let mut app = App::new(&t, Script::answering(&["Chess", "Valorant"]));

  app.show_game_scores();
  app.show_game_scores();

  assert_eq!(app.console().infos, ["No records found for the specified game."]);
  assert_eq!(app.console().tables[0].0, "Scores for Valorant");
}

// ─── Admin access ─────────────────────────────────────────────────────────────

#[test]
fn failed_login_can_register_with_pin() {
  let t = tracker();
  let mut script =
    Script::answering(&["root", "hunter2", "230306", "root", "hunter2"]);
  script.confirms.push_back(true);
  let mut app = App::new(&t, script);

  app.admin_login();

  assert_eq!(app.console().infos, [
    "Admin registered successfully! You can now log in."
  ]);
  assert!(t.credentials.verify("root", "hunter2").unwrap());
}

#[test]
fn wrong_pin_stops_registration() {
  let t = tracker();
  let mut app = App::new(&t, Script::answering(&["123456", "root", "pw"]));

  app.register_admin();

  assert_eq!(app.console().errors, ["Incorrect pin. Access denied."]);
  assert!(t.credentials.usernames().unwrap().is_empty());
  assert_eq!(app.console().answers.len(), 2);
}

#[test]
fn duplicate_username_is_reported() {
  let t = tracker();
  t.credentials.register("root", "a").unwrap();
  let mut app = App::new(&t, Script::answering(&["230306", "root", "b"]));

  app.register_admin();

  assert_eq!(app.console().errors, [
    "Username already exists. Please choose a different one."
  ]);
}

#[test]
fn empty_username_is_rejected() {
  let t = tracker();
  let mut app = App::new(&t, Script::answering(&["230306", ""]));

  app.register_admin();

  assert_eq!(app.console().errors, ["Username cannot be empty."]);
  assert!(t.credentials.usernames().unwrap().is_empty());
}

#[test]
fn login_then_admin_menu_adds_a_team() {
  let t = tracker();
  t.credentials.register("root", "hunter2").unwrap();

  let mut script = Script::answering(&["root", "hunter2", "Fnatic"]);
  // Main: Admin Mode -> Admin: Add a New Team -> back -> quit.
  script.choices = [Some(1), Some(1), None, None].into();
  let mut app = App::new(&t, script);

  app.run();

  assert_eq!(app.console().infos, ["Welcome, Admin!", "Team added successfully."]);
  assert_eq!(t.teams.list().unwrap(), ["Fnatic"]);
}

#[test]
fn declined_registration_does_nothing() {
  let t = tracker();
  let mut app = App::new(&t, Script::answering(&["root", "wrong"]));

  app.admin_login();

  assert!(app.console().infos.is_empty());
  assert!(app.console().errors.is_empty());
  assert!(app.console().tables.is_empty());
}
