//! Cron expression fields parser.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to parse cron schedule expression into
//! the concrete set of values each of its fields matches.
//!
//! _This is neither a scheduler nor a time series generator._ Calculating the upcoming event time
//! from the parsed fields is left for the caller.
//!
//! ## Cron schedule format
//!
//! Expression consists of 5, 6 or 7 fields separated by whitespaces:
//! - 5 fields: minutes, hours, days of month, months and days of week;
//! - 6 fields: seconds are added in front;
//! - 7 fields: years are added at the end.
//!
//! Omitted fields are treated as `*`.
//!
//! | Field        | Range            | Allowed special characters |
//! |--------------|------------------|----------------------------|
//! | Seconds      | 1-60             | * , - / ?                  |
//! | Minutes      | 0-59             | * , - / ?                  |
//! | Hours        | 0-23             | * , - / ?                  |
//! | Day of Month | 1-31             | * , - / ? L W              |
//! | Month        | 1-12 or JAN-DEC  | * , - / ?                  |
//! | Day of Week  | 0-6 or SUN-SAT   | * , - / ? L #              |
//! | Year         | current-end year | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes; such fields are reported as [wildcards](Fields::wildcards);
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - every n-th value of the base, i.e. `*/12`, `10/5`, `30-59/2`;
//! - `?` - the value of the field at the moment of parsing;
//! - `L`, `W`, `#` - day of month (`L`, `W`) or day of week (`L`, `#`) field isn't expanded,
//!   its first fragment is returned as is, see [`FieldSet::Raw`].
//!
//! Day of week `7` is the same as `0` (Sunday).
//! The upper limit of years is the year of the configured [end date](ScheduleHorizon::end_date).
//! Values aren't checked against field ranges.
//!
//! ## How to use
//!
//! ```rust
//! use cron_fields::{CronParser, FieldSet, Options, Result};
//!
//! fn parse() -> Result<()> {
//!     let options = Options::default().with_end_date("31 Dec 2099 23:59:59");
//!     let parser = CronParser::with_options("*/15 9-17 L * ?", &options)?;
//!
//!     assert_eq!(parser.fields().minute(), [0, 15, 30, 45]);
//!     assert_eq!(parser.fields().hour(), [9, 10, 11, 12, 13, 14, 15, 16, 17]);
//!     assert_eq!(parser.fields().dom(), &FieldSet::Raw("L".to_owned()));
//!
//!     Ok(())
//! }
//! # parse().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) for [`Options`]
//!   and [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) for parsing results.

/// Parser configuration.
pub mod config;
/// Crate specific Error implementation.
pub mod error;
/// Cron expression fields parser.
pub mod fields;
/// Parser entry point.
pub mod parser;
/// Ranges of field values.
pub mod ranges;
mod series;
mod utils;

// Re-export of public entities.
pub use config::{EndDate, Options, ScheduleHorizon};
pub use error::CronError;
pub use fields::{FieldSet, Fields};
pub use parser::CronParser;
pub use ranges::{FieldKind, FieldValue, RangeBound};

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
