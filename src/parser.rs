use crate::{
    config::{Options, ScheduleHorizon},
    fields::Fields,
    CronError, Result,
};
use chrono::{Local, NaiveDateTime};
use std::str::FromStr;

/// Parsed cron expression together with the configuration it was parsed with.
///
/// For the expression format, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CronParser {
    config: ScheduleHorizon,
    fields: Fields,
}

impl CronParser {
    /// Parses `expression` with default options.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable.
    pub fn new(expression: impl AsRef<str>) -> Result<Self> {
        Self::with_options(expression, &Options::default())
    }

    /// Resolves `options` and parses `expression` with them.
    pub fn with_options(expression: impl AsRef<str>, options: &Options) -> Result<Self> {
        Self::with_options_at(expression, options, &Local::now().naive_local())
    }

    /// Same as [`with_options`](Self::with_options), but as if current local time is `now`.
    pub fn with_options_at(expression: impl AsRef<str>, options: &Options, now: &NaiveDateTime) -> Result<Self> {
        let config = ScheduleHorizon::new_at(options, now);
        let fields = Fields::parse_at(expression.as_ref(), &config, now)?;

        Ok(Self { config, fields })
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ScheduleHorizon {
        &self.config
    }

    /// Parsed fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl TryFrom<&str> for CronParser {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for CronParser {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for CronParser {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
