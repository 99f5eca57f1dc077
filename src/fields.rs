use crate::{
    config::ScheduleHorizon,
    ranges::{self, FieldKind, FieldValue, RangeBound},
    series::SeriesWithStep,
    utils, CronError, Result,
};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use std::{collections::BTreeSet, fmt::Display, num::NonZeroU16};

/// Fields present in the expression, depending on the number of its tokens.
const LAYOUT_5: &[FieldKind] = &[
    FieldKind::Minute,
    FieldKind::Hour,
    FieldKind::Dom,
    FieldKind::Month,
    FieldKind::Dow,
];
const LAYOUT_6: &[FieldKind] = &[
    FieldKind::Second,
    FieldKind::Minute,
    FieldKind::Hour,
    FieldKind::Dom,
    FieldKind::Month,
    FieldKind::Dow,
];
const LAYOUT_7: &[FieldKind] = &FieldKind::ALL;

fn layout(tokens: usize) -> Option<&'static [FieldKind]> {
    match tokens {
        5 => Some(LAYOUT_5),
        6 => Some(LAYOUT_6),
        7 => Some(LAYOUT_7),
        _ => None,
    }
}

/// Parsed value of a day of month or day of week field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldSet {
    /// Ascending list of unique values.
    Values(Vec<FieldValue>),
    /// Fragment with `L`, `W` or `#` special characters, left as is for the scheduler.
    Raw(String),
}

impl FieldSet {
    /// Returns values if the field was expanded.
    pub fn values(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Values(values) => Some(values),
            Self::Raw(_) => None,
        }
    }

    /// Returns special fragment if the field wasn't expanded.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Values(_) => None,
            Self::Raw(raw) => Some(raw),
        }
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::Values(Vec::new())
    }
}

impl Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Values(values) => {
                let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
                write!(f, "{values}")
            }
            Self::Raw(raw) => write!(f, "{raw}"),
        }
    }
}

/// Cron expression with each field expanded into the set of values it matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fields {
    second: Vec<FieldValue>,
    minute: Vec<FieldValue>,
    hour: Vec<FieldValue>,
    dom: FieldSet,
    month: Vec<FieldValue>,
    dow: FieldSet,
    year: Vec<FieldValue>,
    wildcards: BTreeSet<FieldKind>,
}

impl Fields {
    /// Parses `expression` using current local time.
    ///
    /// Returns [`CronError`] if the expression doesn't consist of 5, 6 or 7 fields,
    /// or if some fragment can't be converted into numbers.
    pub fn parse(expression: &str, horizon: &ScheduleHorizon) -> Result<Self> {
        Self::parse_at(expression, horizon, &Local::now().naive_local())
    }

    /// Parses `expression` as if current local time is `now`.
    pub fn parse_at(expression: &str, horizon: &ScheduleHorizon, now: &NaiveDateTime) -> Result<Self> {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let layout = layout(tokens.len()).ok_or_else(|| CronError::InvalidCronSchedule(expression.to_owned()))?;
        tracing::debug!(expression, tokens = tokens.len(), "parsing cron expression");

        // Fields missing in the layout have no fragments at all.
        let mut groups: [Vec<&str>; 7] = Default::default();
        for (kind, token) in layout.iter().zip(tokens) {
            groups[kind.index()] = utils::split_list(token);
        }

        let mut parser = FieldParser {
            now,
            end_year: ranges::year_value(horizon.end_date().year()),
            wildcards: BTreeSet::new(),
        };

        Ok(Self {
            second: parser.parse_numeric(FieldKind::Second, &groups[FieldKind::Second.index()])?,
            minute: parser.parse_numeric(FieldKind::Minute, &groups[FieldKind::Minute.index()])?,
            hour: parser.parse_numeric(FieldKind::Hour, &groups[FieldKind::Hour.index()])?,
            dom: parser.parse_enhanced(FieldKind::Dom, &groups[FieldKind::Dom.index()])?,
            month: parser.parse_numeric(FieldKind::Month, &groups[FieldKind::Month.index()])?,
            dow: parser.parse_enhanced(FieldKind::Dow, &groups[FieldKind::Dow.index()])?,
            year: parser.parse_numeric(FieldKind::Year, &groups[FieldKind::Year.index()])?,
            wildcards: parser.wildcards,
        })
    }

    /// Seconds.
    pub fn second(&self) -> &[FieldValue] {
        &self.second
    }

    /// Minutes.
    pub fn minute(&self) -> &[FieldValue] {
        &self.minute
    }

    /// Hours.
    pub fn hour(&self) -> &[FieldValue] {
        &self.hour
    }

    /// Days of month, or raw `L`/`W` fragment.
    pub fn dom(&self) -> &FieldSet {
        &self.dom
    }

    /// Months.
    pub fn month(&self) -> &[FieldValue] {
        &self.month
    }

    /// Days of week (`0` is Sunday), or raw `L`/`#` fragment.
    pub fn dow(&self) -> &FieldSet {
        &self.dow
    }

    /// Years.
    pub fn year(&self) -> &[FieldValue] {
        &self.year
    }

    /// Fields which were specified as `*` or omitted.
    pub fn wildcards(&self) -> &BTreeSet<FieldKind> {
        &self.wildcards
    }

    /// Returns `true` if the field was specified as `*` or omitted.
    pub fn is_wildcard(&self, kind: FieldKind) -> bool {
        self.wildcards.contains(&kind)
    }
}

/// State of a single expression parsing.
struct FieldParser<'a> {
    now: &'a NaiveDateTime,
    end_year: FieldValue,
    wildcards: BTreeSet<FieldKind>,
}

impl FieldParser<'_> {
    fn bounds(&self, kind: FieldKind) -> RangeBound {
        let bounds = kind.bounds_at(self.now);
        if kind == FieldKind::Year {
            RangeBound {
                max: self.end_year,
                ..bounds
            }
        } else {
            bounds
        }
    }

    /// Day of month and day of week may bypass numeric expansion.
    fn parse_enhanced(&mut self, kind: FieldKind, fragments: &[&str]) -> Result<FieldSet> {
        let fragments = substitute_mnemonics(kind, fragments);

        if let Some(first) = fragments.first().filter(|_| kind.is_enhanced()) {
            let special = if kind == FieldKind::Dom {
                first.contains(['W', 'L'])
            } else {
                first.contains(['L', '#'])
            };
            if special {
                tracing::trace!(field = %kind, fragment = %first, "special fragment passed through");
                return Ok(FieldSet::Raw(first.clone()));
            }
        }

        self.expand(kind, &fragments).map(FieldSet::Values)
    }

    fn parse_numeric(&mut self, kind: FieldKind, fragments: &[&str]) -> Result<Vec<FieldValue>> {
        let fragments = substitute_mnemonics(kind, fragments);
        self.expand(kind, &fragments)
    }

    fn expand(&mut self, kind: FieldKind, fragments: &[String]) -> Result<Vec<FieldValue>> {
        let first = fragments.first().map(String::as_str);

        if kind != FieldKind::Year && first == Some("?") {
            let value = self.current(kind);
            tracing::trace!(field = %kind, value, "? resolved to the current value");
            return Ok(vec![value]);
        }

        let RangeBound { min, max } = self.bounds(kind);

        if first.is_none() || first == Some("*") {
            tracing::trace!(field = %kind, min, max, "wildcard");
            self.wildcards.insert(kind);
            return Ok(SeriesWithStep::interval(min, max).collect());
        }

        let mut values = BTreeSet::new();
        for fragment in fragments {
            if fragment.contains('/') {
                values.extend(parse_repeating(fragment, min, max)?);
            } else if fragment.contains('-') {
                let (start, end) = parse_range(fragment).ok_or_else(|| CronError::InvalidRangeValue(fragment.clone()))?;
                values.extend(SeriesWithStep::interval(start, end));
            } else {
                let value =
                    utils::parse_digital_value(fragment).ok_or_else(|| CronError::InvalidDigitalValue(fragment.clone()))?;
                values.insert(value);
            }
        }

        // 7 and 0 are both Sunday
        if kind == FieldKind::Dow && values.remove(&7) {
            values.insert(0);
        }

        Ok(values.into_iter().collect())
    }

    /// Value of the field at the current moment.
    fn current(&self, kind: FieldKind) -> FieldValue {
        let now = self.now;
        let value = match kind {
            FieldKind::Second => now.second(),
            FieldKind::Minute => now.minute(),
            FieldKind::Hour => now.hour(),
            FieldKind::Dom => now.day(),
            FieldKind::Month => now.month(),
            FieldKind::Dow => now.weekday().num_days_from_sunday(),
            FieldKind::Year => now.year() as u32,
        };
        value as FieldValue
    }
}

fn substitute_mnemonics(kind: FieldKind, fragments: &[&str]) -> Vec<String> {
    match kind.mnemonics() {
        Some((values, shift)) => fragments
            .iter()
            .map(|fragment| utils::replace_mnemonics(fragment, values, shift))
            .collect(),
        None => fragments.iter().map(|fragment| fragment.to_string()).collect(),
    }
}

/// `start-end`, both inclusive.
fn parse_range(input: &str) -> Option<(FieldValue, FieldValue)> {
    let (start, end) = input.split_once('-')?;
    Some((utils::parse_digital_value(start)?, utils::parse_digital_value(end)?))
}

/// `base/step`, where base is `*`, `start` or `start-end`.
///
/// Every `step`-th element of the base population is taken, counting from its first element.
fn parse_repeating(input: &str, min: FieldValue, max: FieldValue) -> Result<SeriesWithStep> {
    let error = || CronError::InvalidRepeatingPattern(input.to_owned());

    let (base, step) = input.split_once('/').ok_or_else(error)?;
    let step = utils::parse_digital_value(step)
        .and_then(NonZeroU16::new)
        .ok_or_else(error)?;

    let (start, end) = if base == "*" {
        (min, max)
    } else if base.contains('-') {
        parse_range(base).ok_or_else(error)?
    } else {
        (utils::parse_digital_value(base).ok_or_else(error)?, max)
    };

    Ok(SeriesWithStep::new(start, end, step))
}
