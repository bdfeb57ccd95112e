// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointments and their status lifecycle.
//!
//! An appointment reserves a slot (date, time, location) for a vehicle.
//! It starts `Scheduled` and either ends in a terminal state directly
//! (canceled, no-show) or is converted into a wash ticket, after which its
//! status only mirrors the ticket.

use crate::error::DomainError;
use crate::schedule::Slot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Estimated duration used when a request does not supply one.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Estimated price used when a request does not supply one.
pub const DEFAULT_ESTIMATED_PRICE: Decimal = Decimal::from_parts(2500, 0, 0, false, 2);

/// Appointment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked, awaiting confirmation
    Scheduled,
    /// Confirmed by staff or the customer
    Confirmed,
    /// Converted into a running wash ticket
    InProgress,
    /// The linked ticket was concluded
    Concluded,
    /// Canceled before or during the wash
    Canceled,
    /// The customer did not show up
    NoShow,
}

impl AppointmentStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Scheduled,
        Self::Confirmed,
        Self::InProgress,
        Self::Concluded,
        Self::Canceled,
        Self::NoShow,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Concluded => "concluded",
            Self::Canceled => "canceled",
            Self::NoShow => "no_show",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "concluded" => Ok(Self::Concluded),
            "canceled" => Ok(Self::Canceled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if the appointment still holds its slot.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Concluded | Self::Canceled | Self::NoShow)
    }

    /// Calendar display color for the status.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Scheduled => "#007bff",
            Self::Confirmed => "#28a745",
            Self::InProgress => "#ffc107",
            Self::Concluded => "#6f42c1",
            Self::Canceled => "#dc3545",
            Self::NoShow => "#6c757d",
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// `InProgress` may only move to `Concluded` or `Canceled`, and only as
    /// a mirror of its ticket. Callers enforce that distinction.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalTransition` if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::IllegalTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Scheduled => matches!(
                new_status,
                Self::Confirmed | Self::Canceled | Self::NoShow | Self::InProgress
            ),
            Self::Confirmed => matches!(
                new_status,
                Self::Canceled | Self::NoShow | Self::InProgress
            ),
            Self::InProgress => matches!(new_status, Self::Concluded | Self::Canceled),
            Self::Concluded | Self::Canceled | Self::NoShow => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::IllegalTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by appointment lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(DomainError::InvalidPriority(s.to_string())),
        }
    }
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub appointment_id: i64,
    pub code: String,
    pub customer_id: i64,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: String,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub scheduled_date: Date,
    pub scheduled_time: Time,
    pub estimated_duration_minutes: u32,
    pub priority: Priority,
    pub status: AppointmentStatus,
    pub estimated_price: Decimal,
    pub discount: Decimal,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub confirmed_at: Option<PrimitiveDateTime>,
    pub confirmed_by: Option<String>,
    pub cancelled_at: Option<PrimitiveDateTime>,
    pub cancellation_reason: Option<String>,
    pub ticket_id: Option<i64>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl Appointment {
    /// The scheduled start instant.
    #[must_use]
    pub const fn scheduled_at(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.scheduled_date, self.scheduled_time)
    }

    /// The scheduled start plus the estimated duration, capped at the last
    /// representable instant.
    #[must_use]
    pub fn estimated_end(&self) -> PrimitiveDateTime {
        self.scheduled_at()
            .saturating_add(Duration::minutes(i64::from(self.estimated_duration_minutes)))
    }

    /// Returns true once the scheduled start has been reached.
    #[must_use]
    pub fn is_past_due(&self, now: PrimitiveDateTime) -> bool {
        self.scheduled_at() <= now
    }

    #[must_use]
    pub const fn can_be_cancelled(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true if the appointment may be converted into a ticket.
    #[must_use]
    pub fn can_start_wash(&self, now: PrimitiveDateTime) -> bool {
        self.status.is_active() && !self.is_past_due(now)
    }

    /// Returns true if the appointment is still booked but its day has passed.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status.is_active() && self.scheduled_date < today
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        Slot::new(self.scheduled_date, self.scheduled_time, self.location.clone())
    }
}

/// A validated appointment ready to be stored.
///
/// Code, status and timestamps are assigned when it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub customer_id: i64,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: String,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub scheduled_date: Date,
    pub scheduled_time: Time,
    pub estimated_duration_minutes: u32,
    pub priority: Priority,
    pub estimated_price: Decimal,
    pub discount: Decimal,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
}

impl NewAppointment {
    #[must_use]
    pub fn slot(&self) -> Slot {
        Slot::new(self.scheduled_date, self.scheduled_time, self.location.clone())
    }
}

/// Editable appointment fields. `None` leaves the current value in place.
///
/// For nullable fields the outer `Option` selects the field and the inner
/// one is the new value.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentChanges {
    pub scheduled_date: Option<Date>,
    pub scheduled_time: Option<Time>,
    pub estimated_duration_minutes: Option<u32>,
    pub priority: Option<Priority>,
    pub location: Option<String>,
    pub worker_id: Option<Option<i64>>,
    pub contact_phone: Option<Option<String>>,
    pub contact_email: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub internal_notes: Option<Option<String>>,
}

impl AppointmentChanges {
    /// Returns true if the change set moves the appointment to another slot.
    #[must_use]
    pub fn touches_slot(&self) -> bool {
        self.scheduled_date.is_some() || self.scheduled_time.is_some() || self.location.is_some()
    }
}

/// One entry of an appointment's status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub appointment_id: i64,
    pub from_status: Option<AppointmentStatus>,
    pub to_status: AppointmentStatus,
    pub changed_by: String,
    pub changed_at: PrimitiveDateTime,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    fn sample(status: AppointmentStatus) -> Appointment {
        Appointment {
            appointment_id: 1,
            code: String::from("APT000001"),
            customer_id: 1,
            vehicle_id: None,
            plate: String::from("ABC1234"),
            base_id: None,
            location: String::from("Bay 1"),
            wash_type_id: None,
            equipment_type_id: None,
            worker_id: None,
            scheduled_date: date!(2025 - 06 - 10),
            scheduled_time: time!(14:00),
            estimated_duration_minutes: 45,
            priority: Priority::Normal,
            status,
            estimated_price: DEFAULT_ESTIMATED_PRICE,
            discount: Decimal::ZERO,
            contact_phone: None,
            contact_email: None,
            notes: None,
            internal_notes: None,
            confirmed_at: None,
            confirmed_by: None,
            cancelled_at: None,
            cancellation_reason: None,
            ticket_id: None,
            created_at: datetime!(2025-06-01 09:00),
            updated_at: datetime!(2025-06-01 09:00),
        }
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in AppointmentStatus::ALL {
            match status.as_str().parse::<AppointmentStatus>() {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {status}: {e}"),
            }
        }
        assert!("AGENDADO".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_default_price_is_25() {
        assert_eq!(DEFAULT_ESTIMATED_PRICE.to_string(), "25.00");
    }

    #[test]
    fn test_confirm_only_from_scheduled() {
        assert!(
            AppointmentStatus::Scheduled
                .validate_transition(AppointmentStatus::Confirmed)
                .is_ok()
        );
        assert!(
            AppointmentStatus::Confirmed
                .validate_transition(AppointmentStatus::Confirmed)
                .is_err()
        );
        assert!(
            AppointmentStatus::Canceled
                .validate_transition(AppointmentStatus::Confirmed)
                .is_err()
        );
    }

    #[test]
    fn test_in_progress_only_moves_to_ticket_outcomes() {
        let from = AppointmentStatus::InProgress;
        assert!(from.validate_transition(AppointmentStatus::Concluded).is_ok());
        assert!(from.validate_transition(AppointmentStatus::Canceled).is_ok());
        assert!(from.validate_transition(AppointmentStatus::NoShow).is_err());
        assert!(from.validate_transition(AppointmentStatus::Scheduled).is_err());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for from in [
            AppointmentStatus::Concluded,
            AppointmentStatus::Canceled,
            AppointmentStatus::NoShow,
        ] {
            for to in AppointmentStatus::ALL {
                assert!(from.validate_transition(to).is_err());
            }
        }
    }

    #[test]
    fn test_derived_instants() {
        let appointment = sample(AppointmentStatus::Scheduled);
        assert_eq!(appointment.scheduled_at(), datetime!(2025-06-10 14:00));
        assert_eq!(appointment.estimated_end(), datetime!(2025-06-10 14:45));
    }

    #[test]
    fn test_estimated_end_caps_at_last_instant() {
        let mut appointment = sample(AppointmentStatus::Scheduled);
        appointment.scheduled_date = date!(9999 - 12 - 31);
        appointment.scheduled_time = time!(17:00);
        appointment.estimated_duration_minutes = 600;
        assert_eq!(appointment.estimated_end(), PrimitiveDateTime::MAX);
    }

    #[test]
    fn test_past_due_and_start_wash() {
        let appointment = sample(AppointmentStatus::Confirmed);
        assert!(!appointment.is_past_due(datetime!(2025-06-10 13:59)));
        assert!(appointment.is_past_due(datetime!(2025-06-10 14:00)));
        assert!(appointment.can_start_wash(datetime!(2025-06-10 13:00)));
        assert!(!appointment.can_start_wash(datetime!(2025-06-11 08:00)));

        let canceled = sample(AppointmentStatus::Canceled);
        assert!(!canceled.can_start_wash(datetime!(2025-06-10 13:00)));
        assert!(!canceled.can_be_cancelled());
    }

    #[test]
    fn test_overdue_requires_active_status() {
        assert!(sample(AppointmentStatus::Scheduled).is_overdue(date!(2025 - 06 - 11)));
        assert!(!sample(AppointmentStatus::Scheduled).is_overdue(date!(2025 - 06 - 10)));
        assert!(!sample(AppointmentStatus::NoShow).is_overdue(date!(2025 - 06 - 11)));
    }

    #[test]
    fn test_priority_parsing_is_case_insensitive() {
        assert_eq!("URGENT".parse::<Priority>(), Ok(Priority::Urgent));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert!("critical".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Normal);
    }
}
