use std::path::PathBuf;

use thiserror::Error;

/// A persistence failure while loading one batch. The batch has been rolled
/// back when this is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load {kind} batch (rolled back): {source}")]
    Persistence {
        kind: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl LoadError {
    pub(crate) fn persistence(kind: &'static str) -> impl Fn(rusqlite::Error) -> Self {
        move |source| LoadError::Persistence { kind, source }
    }
}

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("no expense data available to forecast from")]
    NoData,
    #[error("model '{model}' needs at least {required} monthly points, only {available} available")]
    InsufficientData {
        model: &'static str,
        required: usize,
        available: usize,
    },
    #[error("unknown forecast model '{0}'")]
    UnknownModel(String),
    #[error("no registered model can run on {available} monthly points")]
    NoEligibleModel { available: usize },
    #[error("failed to read expenses: {0}")]
    Store(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid period '{0}' (expected today, 7d, 30d or all)")]
    InvalidPeriod(String),
    #[error("failed to query summary: {0}")]
    Store(#[from] rusqlite::Error),
}
