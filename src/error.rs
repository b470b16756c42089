//! Error types that callers are expected to match on.
//!
//! Plumbing failures (image decoding, Tesseract process errors, I/O) travel as
//! `anyhow::Error`. The variants here are the ones the runner treats
//! differently: a segmentation failure skips one image, bot detection ends the
//! whole run, and a malformed word list stops startup.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single solve attempt.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Too few aligned lines survived region partitioning.
    #[error("could not segment question: only {survivors} aligned line(s) found")]
    Segmentation { survivors: usize },

    /// The search provider flagged our traffic as automated. Never retried.
    #[error("search provider reported automated traffic (query: {term:?})")]
    BotDetected { term: String },
}

/// Problems with the word-list settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: entry {entry:?} appears before any section header")]
    EntryBeforeHeader { line: usize, entry: String },

    #[error("line {line}: unknown section header {header:?}")]
    UnknownSection { line: usize, header: String },

    #[error("invalid negation marker {marker:?}: {source}")]
    BadMarker {
        marker: String,
        #[source]
        source: regex::Error,
    },

    #[error("no word list found (looked in: {searched})")]
    NotFound { searched: String },
}
