// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling rules and calendar value handling.
//!
//! All dates and times are wall-clock values in the business timezone.
//! Storage and the API both use fixed textual forms:
//!
//! - dates: `YYYY-MM-DD`
//! - times: `HH:MM:SS` (input also accepts `HH:MM`)
//! - timestamps: `YYYY-MM-DDTHH:MM:SS`
//!
//! The textual forms sort lexicographically in calendar order, which the
//! persistence layer relies on for range filters.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// First bookable hour (inclusive).
pub const OPENING_HOUR: u8 = 6;

/// Closing hour (exclusive): no appointment may start at or after it.
pub const CLOSING_HOUR: u8 = 18;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
const SHORT_TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// A bookable slot: the triple that must be unique among active appointments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub date: Date,
    pub time: Time,
    pub location: String,
}

impl Slot {
    #[must_use]
    pub fn new(date: Date, time: Time, location: impl Into<String>) -> Self {
        Self {
            date,
            time,
            location: location.into(),
        }
    }

    /// The wall-clock instant the slot starts.
    #[must_use]
    pub const fn starts_at(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date, self.time)
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses a time of day given as `HH:MM:SS` or `HH:MM`.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if neither form matches.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    Time::parse(trimmed, TIME_FORMAT)
        .or_else(|_| Time::parse(trimmed, SHORT_TIME_FORMAT))
        .map_err(|e| DomainError::TimeParseError {
            time_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Parses a `YYYY-MM-DDTHH:MM:SS` timestamp.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid timestamp.
pub fn parse_datetime(value: &str) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::parse(value.trim(), DATETIME_FORMAT).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[must_use]
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

#[must_use]
pub fn format_datetime(value: PrimitiveDateTime) -> String {
    format!("{}T{}", format_date(value.date()), format_time(value.time()))
}

/// Checks that a time falls inside the bookable window.
///
/// # Errors
///
/// Returns `DomainError::OutsideBusinessHours` when the hour is before
/// opening or at/after closing.
pub const fn validate_business_hours(time: Time) -> Result<(), DomainError> {
    let hour: u8 = time.hour();
    if hour < OPENING_HOUR || hour >= CLOSING_HOUR {
        return Err(DomainError::OutsideBusinessHours { time });
    }
    Ok(())
}

/// Validates a requested appointment schedule against the current instant.
///
/// # Errors
///
/// Returns an error if the slot is in the past or outside business hours.
pub fn validate_schedule(
    date: Date,
    time: Time,
    now: PrimitiveDateTime,
) -> Result<(), DomainError> {
    if PrimitiveDateTime::new(date, time) < now {
        return Err(DomainError::ScheduledInPast { date, time });
    }
    validate_business_hours(time)
}

/// Returns the instant a slot ends after `minutes`.
///
/// # Errors
///
/// Returns `DomainError::ScheduleOverflow` if the end falls beyond the
/// last representable date.
pub fn scheduled_end(
    date: Date,
    time: Time,
    minutes: u32,
) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::new(date, time)
        .checked_add(Duration::minutes(i64::from(minutes)))
        .ok_or(DomainError::ScheduleOverflow {
            date,
            time,
            minutes,
        })
}

/// Validates an inclusive date range.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `from` is after `to`.
pub fn validate_date_range(from: Date, to: Date) -> Result<(), DomainError> {
    if from > to {
        return Err(DomainError::InvalidDateRange { from, to });
    }
    Ok(())
}

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn first_day_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}
