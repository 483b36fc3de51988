// ABOUTME: Calendar-day arithmetic for grouping entries by the user's local day
// ABOUTME: Wraps a fixed UTC offset and produces half-open day ranges in UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use std::ops::Range;

/// Decides which calendar day an instant falls on
///
/// Instants are stored in UTC; days are evaluated at a fixed offset so that a
/// meal logged at 23:30 local time is not counted on the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCalendar {
    offset: FixedOffset,
}

impl Default for DayCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl DayCalendar {
    const SECONDS_PER_MINUTE: i32 = 60;

    /// Calendar evaluated in UTC
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Calendar evaluated at the given offset
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar at an offset east of UTC in minutes; `None` beyond ±24h
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(Self::SECONDS_PER_MINUTE)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    /// The offset days are evaluated at
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of an instant
    #[must_use]
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// First instant of a calendar day
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let local_midnight = date.and_time(NaiveTime::MIN).and_utc();
        local_midnight - Duration::seconds(i64::from(self.offset.local_minus_utc()))
    }

    /// Half-open interval `[start_of_day, start_of_day + 1 day)` containing the day
    #[must_use]
    pub fn day_range(&self, date: NaiveDate) -> Range<DateTime<Utc>> {
        let start = self.start_of_day(date);
        start..start + Duration::days(1)
    }

    /// Whether two instants fall on the same calendar day
    #[must_use]
    pub fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }
}
