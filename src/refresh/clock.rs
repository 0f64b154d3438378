// ABOUTME: Clock abstraction giving the refresh controller "now" and the viewer's calendar
// ABOUTME: SystemClock reads the local zone; FixedClock pins time in any zone for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};

/// Source of the current time and of the viewer's calendar days
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day `instant` falls on for the viewer, using the UTC offset
    /// in effect at that instant rather than the offset in effect now
    fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate;
}

/// Wall clock in the process's local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }
}

/// Clock frozen at one instant in a chosen timezone
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone = FixedOffset> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    /// Freeze time at `now`; calendar days are taken in `now`'s timezone
    #[must_use]
    pub const fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }
}

impl<Tz> Clock for FixedClock<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }

    fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.now.timezone()).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, local_time};

    #[test]
    fn fixed_clock_reports_days_in_its_zone() {
        let clock = FixedClock::new(local_time(date(2025, 3, 9), 22, 0, -5));
        let instant = clock.now();
        assert_eq!(clock.local_date(&instant), date(2025, 3, 9));
        assert_eq!(instant.date_naive(), date(2025, 3, 10));
    }
}
