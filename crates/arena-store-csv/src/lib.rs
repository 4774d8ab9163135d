//! CSV file backend for the Arena tracker.
//!
//! Each table lives in its own comma-separated file under a data directory,
//! with a header row naming its columns.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{CsvStore, CsvTable};
