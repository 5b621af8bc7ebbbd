//! Data sources for the nutrition dashboard.
//!
//! Entries come from one of two places:
//! - A CSV export of the Airtable food log ([`load_csv`])
//! - The Airtable API, mapped from raw records ([`entries_from_records`])
//!   with a snapshot cache between runs ([`SnapshotCache`])
//!
//! Both paths produce the same [`nd_core::Entry`] values, so everything
//! downstream is indifferent to where the data came from.

use std::path::PathBuf;

use thiserror::Error;

pub mod cache;
mod columns;
pub mod local;
pub mod remote;

pub use cache::{Snapshot, SnapshotCache};
pub use local::load_csv;
pub use remote::entries_from_records;

/// Data source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An I/O failure while reading or writing a local file.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The CSV reader rejected the file.
    #[error("csv error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The export is missing a column the dashboard cannot run without.
    #[error("missing required column: {name}")]
    MissingColumn { name: &'static str },
    /// A row carried an input date that could not be parsed.
    #[error("invalid input date {value:?} for {item:?}: {message}")]
    InvalidInputDate {
        item: String,
        value: String,
        message: String,
    },
    /// A cached snapshot could not be encoded or decoded.
    #[error("invalid snapshot {}: {source}", .path.display())]
    InvalidSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
