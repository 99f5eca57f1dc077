/// Generator of numbers series.
use crate::ranges::FieldValue;
use std::num::NonZeroU16;

/// Generator (iterator) state.
///
/// Yields `min`, `min + step`, `min + 2 * step`, ... while the value doesn't exceed `max`,
/// which is the same as taking every `step`-th element (by index) of the `min..=max` population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SeriesWithStep {
    max: FieldValue,
    step: NonZeroU16,
    next: Option<FieldValue>,
}

impl SeriesWithStep {
    /// Empty series if `min > max`.
    #[inline]
    pub(crate) fn new(min: FieldValue, max: FieldValue, step: NonZeroU16) -> Self {
        let next = if min > max { None } else { Some(min) };
        Self { max, step, next }
    }

    /// Plain interval `min..=max`.
    #[inline]
    pub(crate) fn interval(min: FieldValue, max: FieldValue) -> Self {
        Self::new(min, max, NonZeroU16::MIN)
    }
}

impl Iterator for SeriesWithStep {
    type Item = FieldValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current > self.max {
            return None;
        }

        // stops on overflow as well
        self.next = current.checked_add(self.step.get());
        Some(current)
    }
}
