//! Error types for ferrite-log.

use std::path::PathBuf;

use thiserror::Error;

use crate::stats::phase::Phase;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogError>;

/// Everything that can go wrong while logging a set of stats.
#[derive(Debug, Error)]
pub enum LogError {
    /// A phase bundle named a statistic with no registered summary function.
    #[error("no summary function registered for statistic `{stat}` ({phase} phase)")]
    UnknownStatistic { stat: String, phase: Phase },

    /// A logger configuration file could not be parsed.
    #[error("invalid logger configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The series backend could not be created at `dir`.
    #[error("could not initialize series backend at {dir}: {source}")]
    BackendInit {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The series backend rejected a point.
    #[error("series backend error on `{series}`: {message}")]
    Backend { series: String, message: String },

    /// A summary function was handed an empty sample list.
    #[error("cannot summarize an empty sample list")]
    EmptySamples,

    /// An error-rate summary was handed a plain number.
    #[error("expected an edit record, found the value {0}")]
    ExpectedEditRecord(f64),

    /// A value with no numeric interpretation reached a numeric consumer.
    #[error("`{0}` has no scalar value")]
    NonScalar(String),

    /// An error-rate summary was requested over records with no reference tokens.
    #[error("error rate is undefined: no scored reference tokens")]
    NoScoredTokens,
}

/// Coarse classification of a `LogError`.
///
/// - `Configuration`  — the sink was set up without something the call needed
/// - `Resource`       — file or backend could not be opened or written
/// - `CallerContract` — the caller passed malformed stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resource,
    CallerContract,
}

impl LogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LogError::UnknownStatistic { .. } | LogError::Config(_) => ErrorKind::Configuration,
            LogError::Io(_) | LogError::BackendInit { .. } | LogError::Backend { .. } => {
                ErrorKind::Resource
            }
            LogError::EmptySamples
            | LogError::ExpectedEditRecord(_)
            | LogError::NonScalar(_)
            | LogError::NoScoredTokens => ErrorKind::CallerContract,
        }
    }
}
