use std::io;

use thiserror::Error;

/// Reasons a raw input line is rejected before it reaches the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed record: {field} {reason}")]
    MalformedRecord {
        field: &'static str,
        reason: &'static str,
    },
    #[error("cannot parse {field} from '{value}'")]
    Parse { field: &'static str, value: String },
}

impl RecordError {
    pub fn malformed(field: &'static str, reason: &'static str) -> Self {
        RecordError::MalformedRecord { field, reason }
    }

    pub fn parse(field: &'static str, value: &str) -> Self {
        RecordError::Parse {
            field,
            value: value.to_string(),
        }
    }

    /// Short label used as a counter key in the run report.
    pub fn label(&self) -> String {
        match self {
            RecordError::MalformedRecord { field, reason } => format!("{} {}", field, reason),
            RecordError::Parse { field, .. } => format!("{} not numeric", field),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("percentile file is empty")]
    EmptyPercentile,
    #[error("percentile '{0}' is not an integer")]
    InvalidPercentile(String),
    #[error("percentile {0} is outside [0, 100]")]
    PercentileOutOfRange(i64),
    #[error(transparent)]
    Io(#[from] io::Error),
}
