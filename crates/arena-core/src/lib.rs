//! Core types and repositories for the Arena esports results tracker.
//!
//! This crate is deliberately free of filesystem code. Every repository owns a
//! [`TableStore`](store::TableStore) handle; concrete backends (e.g.
//! `arena-store-csv`) implement that trait, and [`MemoryTable`] stands in for
//! them in tests.

pub mod credential;
pub mod error;
pub mod matches;
pub mod query;
pub mod roster;
pub mod store;
pub mod table;
pub mod tracker;

pub use credential::{ADMIN_PIN, Access, AdminGate, CredentialStore};
pub use error::{EntityKind, Error, Result};
pub use matches::{MatchRecord, MatchRepository};
pub use query::{Score, Scoreboard};
pub use roster::{GameRepository, Roster, TeamRepository};
pub use store::{MemoryTable, TableKind, TableStore};
pub use table::{Record, Table};
pub use tracker::{Tables, Tracker};
