// Error taxonomy for the monitor core. None of these are fatal to the host process.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    /// A metric source query failed; the last good snapshot stays current.
    #[error("metric source unavailable ({source_name}): {reason}")]
    SourceUnavailable {
        source_name: &'static str,
        reason: String,
    },

    /// A threshold was negative or not a finite number; the prior value is kept.
    #[error("invalid threshold {field}: {reason}")]
    ConfigInvalid { field: &'static str, reason: String },

    #[error("monitor is already running")]
    AlreadyRunning,

    #[error("monitor is not running")]
    NotRunning,
}

impl MonitorError {
    pub fn unavailable(source_name: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::SourceUnavailable {
            source_name,
            reason: reason.to_string(),
        }
    }

    pub fn invalid(field: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::ConfigInvalid {
            field,
            reason: reason.to_string(),
        }
    }
}
