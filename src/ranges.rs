use chrono::{Datelike, Local, NaiveDateTime};
use std::fmt::Display;

/// Maximum year of the year field range.
pub const MAX_YEAR: FieldValue = 2099;

/// Type of the single field value.
pub type FieldValue = u16;

/// Inclusive range of valid values of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RangeBound {
    /// Smallest valid value.
    pub min: FieldValue,
    /// Largest valid value.
    pub max: FieldValue,
}

/// Converts calendar year into field value, clamping it to the `FieldValue` range.
pub(crate) fn year_value(year: i32) -> FieldValue {
    FieldValue::try_from(year.max(0)).unwrap_or(FieldValue::MAX)
}

impl RangeBound {
    pub(crate) const fn new(min: FieldValue, max: FieldValue) -> Self {
        Self { min, max }
    }
}

/// Field of the cron expression.
///
/// Discriminants are positions of the fields in the full 7-fields expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    /// Seconds.
    Second = 0,
    /// Minutes.
    Minute = 1,
    /// Hours.
    Hour = 2,
    /// Day of month.
    Dom = 3,
    /// Month.
    Month = 4,
    /// Day of week.
    Dow = 5,
    /// Year.
    Year = 6,
}

impl FieldKind {
    /// All fields in the order of the full expression.
    pub const ALL: [FieldKind; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Dom,
        Self::Month,
        Self::Dow,
        Self::Year,
    ];

    pub(crate) const DAYS_OF_WEEK: &'static [&'static str] = &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    pub(crate) const MONTHS: &'static [&'static str] = &[
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// Returns range of valid values of the field.
    ///
    /// The year range starts from the current year, so it's recalculated on each call.
    pub fn bounds(&self) -> RangeBound {
        self.bounds_at(&Local::now().naive_local())
    }

    /// Same as [`bounds`](Self::bounds) but with explicitly provided current time.
    pub fn bounds_at(&self, now: &NaiveDateTime) -> RangeBound {
        match self {
            Self::Second => RangeBound::new(1, 60),
            Self::Minute => RangeBound::new(0, 59),
            Self::Hour => RangeBound::new(0, 23),
            Self::Dom => RangeBound::new(1, 31),
            Self::Month => RangeBound::new(1, 12),
            Self::Dow => RangeBound::new(0, 6),
            Self::Year => RangeBound::new(year_value(now.year()), MAX_YEAR),
        }
    }

    /// Returns `true` for fields which may hold special `L`, `W` or `#` expressions.
    pub fn is_enhanced(&self) -> bool {
        matches!(self, Self::Dom | Self::Dow)
    }

    /// Mnemonic names of the field values and value of the first name.
    pub(crate) fn mnemonics(&self) -> Option<(&'static [&'static str], FieldValue)> {
        match self {
            Self::Month => Some((Self::MONTHS, 1)),
            Self::Dow => Some((Self::DAYS_OF_WEEK, 0)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Dom => "dom",
            Self::Month => "month",
            Self::Dow => "dow",
            Self::Year => "year",
        };
        write!(f, "{name}")
    }
}
