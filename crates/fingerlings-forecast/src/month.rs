//! Calendar-month keys and inclusive month ranges.
//!
//! A month key is the first day of its month. Keys are derived from calendar
//! dates only, so there is no timezone drift.

use chrono::{Datelike, Months, NaiveDate};

/// Truncate a date to the first day of its month.
pub fn month_key(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of calendar months touched by `[from, to]`, or 0 when `from > to`.
pub fn months_spanned(from: NaiveDate, to: NaiveDate) -> usize {
    if from > to {
        return 0;
    }
    let span = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    span as usize + 1
}

/// Ordered, gap-free month keys spanning `[from, to]` inclusive.
///
/// Jan 15 → Mar 3 yields Jan 1, Feb 1, Mar 1. An inverted range yields nothing.
pub fn month_range(from: NaiveDate, to: NaiveDate) -> MonthRange {
    MonthRange {
        next: (from <= to).then(|| month_key(from)),
        last: month_key(to),
    }
}

/// Iterator returned by [`month_range`].
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for MonthRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.last {
            current.checked_add_months(Months::new(1))
        } else {
            None
        };
        Some(current)
    }
}
