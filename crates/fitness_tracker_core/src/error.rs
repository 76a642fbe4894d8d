//! crates/fitness_tracker_core/src/error.rs
//!
//! Errors raised by the pure progress computations. Both variants abort the
//! whole call; nothing is partially returned.

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The caller asked for a field outside the recognized metric set.
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("Malformed date '{date}': {source}")]
    MalformedDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The date parses, but its week would start before the earliest
    /// representable day.
    #[error("Date '{0}' is outside the supported range")]
    DateOutOfRange(String),
}

pub type ProgressResult<T> = Result<T, ProgressError>;
