use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the pipeline, split by phase so callers (and
/// shell scripts, via the exit code) can tell a bad config from a dead
/// database from a malformed file.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("reading sales file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: cannot parse date {value:?} as YYYY-MM-DD: {source}")]
    Date {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("connecting to database server: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("database statement failed: {0}")]
    Sql(#[source] sqlx::Error),
}

impl EtlError {
    /// Process exit code for this failure class. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            EtlError::Config(_) => 2,
            EtlError::Csv { .. } => 3,
            EtlError::Date { .. } => 4,
            EtlError::Connect(_) => 5,
            EtlError::Sql(_) => 6,
        }
    }
}
