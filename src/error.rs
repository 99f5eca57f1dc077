use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Expression can't be split into 5, 6 or 7 fields.
    #[error("invalid cron schedule: {0}")]
    InvalidCronSchedule(String),
    /// Invalid range value specified.
    #[error("invalid range value: {0}")]
    InvalidRangeValue(String),
    /// Invalid repeating pattern specified.
    #[error("invalid repeating pattern: {0}")]
    InvalidRepeatingPattern(String),
    /// Field fragment isn't a plain unsigned number.
    #[error("invalid digital value: {0}")]
    InvalidDigitalValue(String),
}
