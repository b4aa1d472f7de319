mod primitives;

pub use primitives::{clamp_score, ratio_to_percent, weighted_sum, MAX_SCORE};

/// Raised only for malformed caller input; empty results are never errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("ministry category '{0}' is not configured")]
    UnknownCategory(String),
    #[error("malformed record: {field} {reason}")]
    MalformedRecord { field: String, reason: String },
    #[error("reporting period must end after it starts ({start} .. {end})")]
    InvalidPeriod { start: String, end: String },
}

impl ScoringError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
