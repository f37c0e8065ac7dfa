use std::path::PathBuf;

use thiserror::Error;

/// A required input file could not be turned into a dataset.
///
/// Raised only at startup; the dashboard has no degraded mode, so callers
/// treat every variant as fatal.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{} line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}
