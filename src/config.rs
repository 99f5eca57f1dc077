use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// First day of the week used when nothing valid is configured (Monday).
pub const DEFAULT_FIRST_DAY_OF_WEEK: u8 = 1;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%b %d %Y"];

/// Default end of the schedule: `2099-12-31 23:59:59`.
pub fn default_end_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2099, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Raw value of the schedule end date as provided by caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum EndDate {
    /// Milliseconds since Unix epoch.
    Timestamp(i64),
    /// Local date and time.
    DateTime(NaiveDateTime),
    /// Textual representation of the date, i.e. `31 Dec 2099 23:59:59` or `2099-12-31`.
    Text(String),
}

impl EndDate {
    /// Converts raw value into local date and time, `None` if it can't be understood.
    pub fn to_naive_local(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(millis) => DateTime::from_timestamp_millis(*millis).map(|dt| to_naive_local(&dt)),
            Self::DateTime(value) => Some(*value),
            Self::Text(text) => parse_text(text.trim()),
        }
    }
}

impl From<&str> for EndDate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for EndDate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for EndDate {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

impl From<NaiveDateTime> for EndDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for EndDate {
    fn from(value: NaiveDate) -> Self {
        Self::DateTime(value.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for EndDate {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(to_naive_local(&value))
    }
}

/// Options of the parser as provided by caller, each of them is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Options {
    /// End of the schedule, limits the year field.
    pub end_date: Option<EndDate>,
    /// First day of the week, `0` is Sunday.
    pub first_day_of_week: Option<i64>,
}

impl Options {
    /// Sets end of the schedule.
    pub fn with_end_date(mut self, end_date: impl Into<EndDate>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Sets first day of the week.
    pub fn with_first_day_of_week(mut self, first_day_of_week: i64) -> Self {
        self.first_day_of_week = Some(first_day_of_week);
        self
    }
}

/// Resolved parser configuration.
///
/// End date is always after the construction time, and first day of week is always within `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleHorizon {
    end_date: NaiveDateTime,
    first_day_of_week: u8,
}

impl ScheduleHorizon {
    /// Resolves `options` against the current local time.
    pub fn new(options: &Options) -> Self {
        Self::new_at(options, &Local::now().naive_local())
    }

    /// Resolves `options` against the provided `now`.
    pub fn new_at(options: &Options, now: &NaiveDateTime) -> Self {
        Self {
            end_date: resolve_end_date_at(options.end_date.as_ref(), now),
            first_day_of_week: resolve_first_day_of_week(options.first_day_of_week),
        }
    }

    /// End of the schedule.
    pub fn end_date(&self) -> NaiveDateTime {
        self.end_date
    }

    /// First day of the week, `0` is Sunday.
    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }
}

impl Default for ScheduleHorizon {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

/// Returns parsed `value` if it's after the current local time, or [default](default_end_date) otherwise.
pub fn resolve_end_date(value: Option<&EndDate>) -> NaiveDateTime {
    resolve_end_date_at(value, &Local::now().naive_local())
}

/// Returns parsed `value` if it's after `now`, or [default](default_end_date) otherwise.
pub fn resolve_end_date_at(value: Option<&EndDate>, now: &NaiveDateTime) -> NaiveDateTime {
    let Some(value) = value else {
        return default_end_date();
    };

    match value.to_naive_local() {
        Some(end_date) if end_date > *now => end_date,
        Some(end_date) => {
            tracing::debug!(%end_date, %now, "end date isn't in the future, using default");
            default_end_date()
        }
        None => {
            tracing::debug!(?value, "unparsable end date, using default");
            default_end_date()
        }
    }
}

/// Returns `value` if it's a valid day of week (`0..=6`), or [`DEFAULT_FIRST_DAY_OF_WEEK`] otherwise.
pub fn resolve_first_day_of_week(value: Option<i64>) -> u8 {
    match value {
        Some(value @ 0..=6) => value as u8,
        Some(value) => {
            tracing::debug!(value, "first day of week is out of range, using default");
            DEFAULT_FIRST_DAY_OF_WEEK
        }
        None => DEFAULT_FIRST_DAY_OF_WEEK,
    }
}

fn to_naive_local<Tz: TimeZone>(value: &DateTime<Tz>) -> NaiveDateTime {
    value.with_timezone(&Local).naive_local()
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(to_naive_local(&value));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeDelta, Utc};
    use rstest::rstest;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(10, 20, 30).unwrap()
    }

    #[test]
    fn test_default_end_date() {
        let expected = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap().and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(default_end_date(), expected);
        assert_eq!(ScheduleHorizon::default().end_date(), expected);
        assert_eq!(resolve_end_date(None), expected);
    }

    #[rstest]
    #[case("2030-06-01T12:00:00", (2030, 6, 1, 12, 0, 0))]
    #[case("2030-06-01 12:00:00", (2030, 6, 1, 12, 0, 0))]
    #[case("2030-06-01", (2030, 6, 1, 0, 0, 0))]
    #[case("31 Dec 2050 23:59:59", (2050, 12, 31, 23, 59, 59))]
    #[case("31 dec 2050 23:59", (2050, 12, 31, 23, 59, 0))]
    #[case("1 Jan 2030", (2030, 1, 1, 0, 0, 0))]
    #[case("Jan 1 2030", (2030, 1, 1, 0, 0, 0))]
    #[case("  2030-06-01  ", (2030, 6, 1, 0, 0, 0))]
    fn test_end_date_as_text(#[case] input: &str, #[case] expected: (i32, u32, u32, u32, u32, u32)) {
        let (y, m, d, hh, mm, ss) = expected;
        let expected = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hh, mm, ss).unwrap();
        let options = Options::default().with_end_date(input);

        assert_eq!(ScheduleHorizon::new_at(&options, &now()).end_date(), expected, "input = {input}");
    }

    #[test]
    fn test_end_date_as_rfc3339_text() {
        let input = "2030-06-01T12:00:00Z";
        let expected = DateTime::parse_from_rfc3339(input).unwrap().with_timezone(&Local).naive_local();
        let options = Options::default().with_end_date(input);

        assert_eq!(ScheduleHorizon::new_at(&options, &now()).end_date(), expected);
    }

    #[test]
    fn test_end_date_as_next_year_text() {
        let year = Local::now().year() + 1;
        let input = format!("31 Dec {year} 23:59:59");
        let expected = NaiveDate::from_ymd_opt(year, 12, 31).unwrap().and_hms_opt(23, 59, 59).unwrap();

        assert_eq!(resolve_end_date(Some(&EndDate::from(input))), expected);
    }

    #[test]
    fn test_end_date_as_timestamp() {
        let millis = Utc::now().timestamp_millis() + 10_000;
        let expected = DateTime::from_timestamp_millis(millis).unwrap().with_timezone(&Local).naive_local();

        assert_eq!(resolve_end_date(Some(&EndDate::from(millis))), expected);
    }

    #[test]
    fn test_end_date_as_date_time() {
        let value = Local::now().naive_local() + TimeDelta::seconds(10);
        assert_eq!(resolve_end_date(Some(&EndDate::from(value))), value);

        let value = Local::now() + TimeDelta::seconds(10);
        assert_eq!(resolve_end_date(Some(&EndDate::from(value))), value.naive_local());

        let value = Utc::now() + TimeDelta::seconds(10);
        assert_eq!(
            resolve_end_date(Some(&EndDate::from(value))),
            value.with_timezone(&Local).naive_local()
        );

        let value = NaiveDate::from_ymd_opt(2040, 2, 29).unwrap();
        assert_eq!(
            resolve_end_date_at(Some(&EndDate::from(value)), &now()),
            value.and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[rstest]
    #[case(EndDate::from("31 Dec 1900"))]
    #[case(EndDate::from("2024-03-15 10:20:30"))]
    #[case(EndDate::from("2024-03-15 10:20:29"))]
    #[case(EndDate::from("not a date"))]
    #[case(EndDate::from(""))]
    #[case(EndDate::from(0))]
    #[case(EndDate::from(i64::MAX))]
    #[case(EndDate::from(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()))]
    fn test_end_date_falls_back_to_default(#[case] value: EndDate) {
        assert_eq!(
            resolve_end_date_at(Some(&value), &now()),
            default_end_date(),
            "value = {value:?}"
        );
    }

    #[test]
    fn test_end_date_equal_to_now_falls_back_to_default() {
        let now = Local::now().naive_local();
        assert_eq!(resolve_end_date_at(Some(&EndDate::from(now)), &now), default_end_date());
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some(-1), 1)]
    #[case(Some(i64::MIN), 1)]
    #[case(Some(0), 0)]
    #[case(Some(1), 1)]
    #[case(Some(2), 2)]
    #[case(Some(3), 3)]
    #[case(Some(4), 4)]
    #[case(Some(5), 5)]
    #[case(Some(6), 6)]
    #[case(Some(7), 1)]
    #[case(Some(i64::MAX), 1)]
    fn test_first_day_of_week(#[case] value: Option<i64>, #[case] expected: u8) {
        assert_eq!(resolve_first_day_of_week(value), expected);

        let options = Options {
            first_day_of_week: value,
            ..Default::default()
        };
        assert_eq!(ScheduleHorizon::new(&options).first_day_of_week(), expected);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_deserialize() {
        let options: Options = serde_json::from_str(r#"{"endDate": "31 Dec 2050", "firstDayOfWeek": 0}"#).unwrap();
        assert_eq!(options, Options::default().with_end_date("31 Dec 2050").with_first_day_of_week(0));

        let options: Options = serde_json::from_str(r#"{"endDate": 1700000000000}"#).unwrap();
        assert_eq!(options.end_date, Some(EndDate::Timestamp(1_700_000_000_000)));
        assert_eq!(options.first_day_of_week, None);

        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());
    }
}
