//! `arena`: esports results tracker.
//!
//! # Usage
//!
//! ```
//! arena                         # interactive menu
//! arena recent -n 10            # last ten matches
//! arena scores --game Valorant  # wins per team for one game
//! arena --data-dir ~/arena teams --json
//! ```

mod app;
mod console;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app::{App, SCORE_COLUMNS, match_rows, score_rows};
use arena_core::{TableKind, Tracker};
use arena_store_csv::{CsvStore, CsvTable};
use clap::{Parser, Subcommand};
use console::{Console, Terminal};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "arena", version, about = "Esports results tracker")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "arena.toml")]
  config: PathBuf,

  /// Directory holding the table files (overrides config and ARENA_DATA_DIR).
  #[arg(long, value_name = "DIR")]
  data_dir: Option<PathBuf>,

  /// Log debug output to stderr.
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Interactive menu (the default).
  Menu,

  #[command(flatten)]
  Query(Query),
}

/// Read-only views; no login required.
#[derive(Subcommand, Debug)]
enum Query {
  /// The most recent matches, oldest first.
  Recent {
    #[arg(short = 'n', long, default_value_t = 5)]
    count: usize,
    #[arg(long)]
    json:  bool,
  },

  /// Wins per team, optionally for one game only.
  Scores {
    #[arg(long)]
    game: Option<String>,
    #[arg(long)]
    json: bool,
  },

  /// Every registered team.
  Teams {
    #[arg(long)]
    json: bool,
  },

  /// Every registered game.
  Games {
    #[arg(long)]
    json: bool,
  },

  /// Every recorded match.
  Matches {
    #[arg(long)]
    json: bool,
  },
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Settings read from the config file and `ARENA_*` environment variables.
#[derive(Deserialize, Debug)]
struct AppConfig {
  data_dir: PathBuf,
}

fn load_config(path: &Path) -> Result<AppConfig> {
  let settings = config::Config::builder()
    .set_default("data_dir", ".")
    .context("setting config defaults")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("ARENA"))
    .build()
    .with_context(|| format!("reading config file {}", path.display()))?;
  settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  let default_level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cfg = load_config(&args.config)?;
  let data_dir = args.data_dir.unwrap_or(cfg.data_dir);

  let store = CsvStore::open(&data_dir)
    .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;
  let tracker = Tracker::open(store.tables())
    .with_context(|| format!("failed to open tables in {}", data_dir.display()))?;
  tracing::debug!(dir = %data_dir.display(), "tables ready");

  match args.command {
    None | Some(Command::Menu) => App::new(&tracker, Terminal::stdio()).run(),
    Some(Command::Query(query)) => run_query(&tracker, query)?,
  }
  Ok(())
}

// ─── One-shot queries ─────────────────────────────────────────────────────────

/// Print `value` as JSON, or hand `rows` to the terminal table renderer.
fn emit<T: Serialize>(
  json: bool,
  value: &T,
  title: &str,
  columns: &[&str],
  rows: Vec<Vec<String>>,
) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value)?);
  } else {
    Terminal::stdio().render_table(title, columns, &rows);
  }
  Ok(())
}

fn run_query(tracker: &Tracker<CsvTable>, query: Query) -> Result<()> {
  let board = tracker.scoreboard();
  match query {
    Query::Recent { count, json } => {
      let matches = board.recent(count)?;
      emit(
        json,
        &matches,
        "Recent Matches",
        TableKind::Matches.header(),
        match_rows(&matches),
      )
    }
    Query::Scores { game: None, json } => {
      let scores = board.team_scores()?;
      emit(json, &scores, "Team Scores", &SCORE_COLUMNS, score_rows(&scores))
    }
    Query::Scores {
      game: Some(game),
      json,
    } => {
      let scores = board.game_scores(&game)?;
      if scores.is_empty() && !json {
        println!("No records found for the specified game.");
        return Ok(());
      }
      emit(
        json,
        &scores,
        &format!("Scores for {game}"),
        &SCORE_COLUMNS,
        score_rows(&scores),
      )
    }
    Query::Teams { json } => {
      let teams = tracker.teams.list()?;
      let rows = teams.iter().map(|t| vec![t.clone()]).collect();
      emit(json, &teams, "Teams", TableKind::Teams.header(), rows)
    }
    Query::Games { json } => {
      let games = tracker.games.list()?;
      let rows = games.iter().map(|g| vec![g.clone()]).collect();
      emit(json, &games, "Games", TableKind::Games.header(), rows)
    }
    Query::Matches { json } => {
      let matches = tracker.matches.list()?;
      emit(
        json,
        &matches,
        "All Matches",
        TableKind::Matches.header(),
        match_rows(&matches),
      )
    }
  }
}
