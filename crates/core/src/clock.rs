// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock time in the business timezone.
//!
//! Appointment slots and ticket timestamps are local wall-clock values, so
//! every rule that compares against "now" goes through a [`Clock`].

use crate::error::CoreError;
use chrono::{Offset, TimeZone, Utc};
use chrono_tz::Tz;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// A source of the current local date and time.
pub trait Clock: Send + Sync {
    /// The current local date and time, truncated to whole seconds.
    fn now(&self) -> PrimitiveDateTime;

    /// The current local date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// The system clock, read in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a clock from an IANA timezone name such as `America/Sao_Paulo`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimezone` if the name is unknown.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| CoreError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        let utc_now = Utc::now();
        let offset_seconds: i32 = self
            .tz
            .offset_from_utc_datetime(&utc_now.naive_utc())
            .fix()
            .local_minus_utc();
        let offset: UtcOffset =
            UtcOffset::from_whole_seconds(offset_seconds).unwrap_or(UtcOffset::UTC);

        let local: OffsetDateTime = OffsetDateTime::now_utc().to_offset(offset);
        let time = local.time();
        PrimitiveDateTime::new(local.date(), time.replace_nanosecond(0).unwrap_or(time))
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: PrimitiveDateTime,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: PrimitiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> PrimitiveDateTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_fixed_clock_reports_its_instant() {
        let clock = FixedClock::new(datetime!(2025-06-10 12:30));
        assert_eq!(clock.now(), datetime!(2025-06-10 12:30));
        assert_eq!(clock.today(), datetime!(2025-06-10 0:00).date());
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        assert_eq!(
            SystemClock::from_name("Mars/Olympus").map(|c| c.timezone()),
            Err(CoreError::InvalidTimezone(String::from("Mars/Olympus")))
        );
        assert!(SystemClock::from_name(DEFAULT_TIMEZONE).is_ok());
    }

    #[test]
    fn test_system_clock_has_no_subsecond_part() {
        let clock = SystemClock::from_name("UTC")
            .unwrap_or_else(|e| panic!("UTC must be known: {e}"));
        assert_eq!(clock.now().nanosecond(), 0);
    }
}
