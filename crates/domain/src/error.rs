// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schedule::{format_date, format_time};
use crate::validation::MAX_DURATION_MINUTES;
use time::{Date, Time};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty.
    MissingRequiredField(&'static str),
    /// A name field is empty or too long.
    InvalidName(String),
    /// A vehicle plate is empty or malformed.
    InvalidPlate(String),
    /// A contact phone number is malformed.
    InvalidPhone(String),
    /// A contact email address is malformed.
    InvalidEmail(String),
    /// A monetary amount could not be parsed or is out of range.
    InvalidAmount {
        /// The field holding the amount.
        field: &'static str,
        /// Why the amount was rejected.
        reason: String,
    },
    /// A worker tax id is malformed.
    InvalidTaxId(String),
    /// A vehicle model year is implausible.
    InvalidYear(u16),
    /// Estimated duration is zero or longer than a day.
    InvalidDuration(u32),
    /// Failed to parse a date string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time-of-day string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The requested schedule lies in the past.
    ScheduledInPast {
        /// The requested date.
        date: Date,
        /// The requested time.
        time: Time,
    },
    /// The slot would end beyond the last representable date.
    ScheduleOverflow {
        /// The requested date.
        date: Date,
        /// The requested time.
        time: Time,
        /// The estimated duration in minutes.
        minutes: u32,
    },
    /// The requested time is outside business hours.
    OutsideBusinessHours {
        /// The requested time.
        time: Time,
    },
    /// An end instant precedes its start.
    InvalidTimeRange {
        /// Description of the offending range.
        reason: String,
    },
    /// A date range is inverted.
    InvalidDateRange {
        /// Range start.
        from: Date,
        /// Range end.
        to: Date,
    },
    /// Unknown appointment or ticket status string.
    InvalidStatus {
        /// The invalid status.
        status: String,
    },
    /// Unknown priority string.
    InvalidPriority(String),
    /// Unknown vehicle kind string.
    InvalidVehicleKind(String),
    /// A referenced record is inactive and cannot be used.
    InactiveReference {
        /// The kind of record (customer, worker, vehicle).
        entity: &'static str,
        /// The record identifier.
        id: i64,
    },
    /// The slot is already taken by another active appointment.
    SlotUnavailable {
        /// The requested date.
        date: Date,
        /// The requested time.
        time: Time,
        /// The requested location.
        location: String,
    },
    /// A status change is not permitted from the current state.
    IllegalTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the change was rejected.
        reason: String,
    },
    /// An appointment cannot be turned into a wash ticket.
    ConversionNotAllowed {
        /// The appointment code.
        code: String,
        /// Why the conversion was rejected.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField(field) => write!(f, "Field '{field}' is required"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPlate(msg) => write!(f, "Invalid plate: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidAmount { field, reason } => {
                write!(f, "Invalid amount for '{field}': {reason}")
            }
            Self::InvalidTaxId(value) => write!(f, "Invalid tax id: '{value}'"),
            Self::InvalidYear(year) => write!(f, "Invalid model year: {year}"),
            Self::InvalidDuration(minutes) => {
                write!(
                    f,
                    "Invalid estimated duration: {minutes}. \
                     Must be between 1 and {MAX_DURATION_MINUTES}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::ScheduledInPast { date, time } => {
                write!(
                    f,
                    "Cannot schedule for {} {}: it is in the past",
                    format_date(*date),
                    format_time(*time)
                )
            }
            Self::ScheduleOverflow {
                date,
                time,
                minutes,
            } => {
                write!(
                    f,
                    "A {minutes} minute slot starting {} {} ends past the last supported date",
                    format_date(*date),
                    format_time(*time)
                )
            }
            Self::OutsideBusinessHours { time } => {
                write!(
                    f,
                    "Appointments can only be booked between 06:00 and 18:00, got {}",
                    format_time(*time)
                )
            }
            Self::InvalidTimeRange { reason } => write!(f, "Invalid time range: {reason}"),
            Self::InvalidDateRange { from, to } => {
                write!(
                    f,
                    "Invalid date range: {} is after {}",
                    format_date(*from),
                    format_date(*to)
                )
            }
            Self::InvalidStatus { status } => write!(f, "Invalid status: '{status}'"),
            Self::InvalidPriority(value) => write!(f, "Invalid priority: '{value}'"),
            Self::InvalidVehicleKind(value) => write!(f, "Invalid vehicle kind: '{value}'"),
            Self::InactiveReference { entity, id } => {
                write!(f, "The {entity} {id} is inactive")
            }
            Self::SlotUnavailable {
                date,
                time,
                location,
            } => {
                write!(
                    f,
                    "There is already an appointment at '{location}' on {} {}",
                    format_date(*date),
                    format_time(*time)
                )
            }
            Self::IllegalTransition { from, to, reason } => {
                write!(f, "Cannot change status from '{from}' to '{to}': {reason}")
            }
            Self::ConversionNotAllowed { code, reason } => {
                write!(
                    f,
                    "Appointment {code} cannot be converted into a wash ticket: {reason}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
