// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wash tickets: the service record of a wash.

use crate::appointment::AppointmentStatus;
use crate::error::DomainError;
use crate::schedule::format_datetime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, PrimitiveDateTime};

/// Wash ticket lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// The wash is running
    InProgress,
    /// The wash finished
    Concluded,
    /// The wash was abandoned
    Canceled,
}

impl TicketStatus {
    pub const ALL: [Self; 3] = [Self::InProgress, Self::Concluded, Self::Canceled];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Concluded => "concluded",
            Self::Canceled => "canceled",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "concluded" => Ok(Self::Concluded),
            "canceled" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Concluded | Self::Canceled)
    }

    /// The appointment status a linked appointment must carry while the
    /// ticket is in this status.
    #[must_use]
    pub const fn mirrored_appointment_status(&self) -> AppointmentStatus {
        match self {
            Self::InProgress => AppointmentStatus::InProgress,
            Self::Concluded => AppointmentStatus::Concluded,
            Self::Canceled => AppointmentStatus::Canceled,
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalTransition` unless moving from
    /// `InProgress` to a terminal state.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if matches!(self, Self::InProgress) && new_status.is_terminal() {
            return Ok(());
        }
        let reason: &str = if self.is_terminal() {
            "cannot transition from terminal state"
        } else {
            "transition not permitted by ticket lifecycle rules"
        };
        Err(DomainError::IllegalTransition {
            from: self.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the amount charged for a wash.
///
/// Absent when no service price is set. A discount larger than the price
/// yields a negative amount.
#[must_use]
pub fn final_price(service_price: Option<Decimal>, discount: Decimal) -> Option<Decimal> {
    service_price.map(|price| price - discount)
}

/// Appends a cancellation line to existing ticket notes.
#[must_use]
pub fn append_cancellation_note(notes: Option<&str>, reason: &str) -> Option<String> {
    append_note_line(notes, &format!("Canceled: {}", reason.trim()))
}

/// Appends a line to free-text notes, trimming the result.
#[must_use]
pub fn append_note_line(notes: Option<&str>, line: &str) -> Option<String> {
    let combined: String = format!("{}\n{}", notes.unwrap_or_default(), line);
    let trimmed: &str = combined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A stored wash ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub ticket_id: i64,
    pub code: String,
    pub customer_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: Option<String>,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub started_at: PrimitiveDateTime,
    pub ended_at: Option<PrimitiveDateTime>,
    pub service_date: Date,
    pub status: TicketStatus,
    pub service_price: Option<Decimal>,
    pub discount: Decimal,
    pub final_price: Option<Decimal>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl Ticket {
    /// Whole minutes between start and end, clamped at zero.
    ///
    /// `None` until the ticket has an end time.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<i64> {
        self.ended_at
            .map(|ended| (ended - self.started_at).whole_minutes().max(0))
    }

    /// Whole minutes the wash has been running. Only meaningful while in progress.
    #[must_use]
    pub fn elapsed_minutes(&self, now: PrimitiveDateTime) -> Option<i64> {
        match self.status {
            TicketStatus::InProgress => Some((now - self.started_at).whole_minutes()),
            TicketStatus::Concluded | TicketStatus::Canceled => None,
        }
    }

    /// Recomputes the final price from the current price and discount.
    pub fn recompute_final_price(&mut self) {
        self.final_price = final_price(self.service_price, self.discount);
    }
}

/// A wash ticket ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub customer_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: Option<String>,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub started_at: PrimitiveDateTime,
    pub ended_at: Option<PrimitiveDateTime>,
    pub service_date: Date,
    pub service_price: Option<Decimal>,
    pub discount: Decimal,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
}

impl NewTicket {
    #[must_use]
    pub fn final_price(&self) -> Option<Decimal> {
        final_price(self.service_price, self.discount)
    }

    /// Checks that the end time, if any, is after the start time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeRange` if the end precedes or equals the start.
    pub fn validate_times(&self) -> Result<(), DomainError> {
        match self.ended_at {
            Some(ended) if ended <= self.started_at => Err(DomainError::InvalidTimeRange {
                reason: format!(
                    "end time {} must be after start time {}",
                    format_datetime(ended),
                    format_datetime(self.started_at)
                ),
            }),
            _ => Ok(()),
        }
    }
}

/// Editable ticket fields. `None` leaves the current value in place.
///
/// For nullable fields the outer `Option` selects the field and the inner
/// one is the new value.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketChanges {
    pub service_price: Option<Option<Decimal>>,
    pub discount: Option<Decimal>,
    pub worker_id: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
    pub payment_note: Option<Option<String>>,
    pub contract: Option<Option<String>>,
}

impl TicketChanges {
    /// Applies the changes and recomputes the final price.
    pub fn apply_to(self, ticket: &mut Ticket) {
        if let Some(price) = self.service_price {
            ticket.service_price = price;
        }
        if let Some(discount) = self.discount {
            ticket.discount = discount;
        }
        if let Some(worker_id) = self.worker_id {
            ticket.worker_id = worker_id;
        }
        if let Some(notes) = self.notes {
            ticket.notes = notes;
        }
        if let Some(payment_note) = self.payment_note {
            ticket.payment_note = payment_note;
        }
        if let Some(contract) = self.contract {
            ticket.contract = contract;
        }
        ticket.recompute_final_price();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn d(value: &str) -> Decimal {
        value
            .parse()
            .unwrap_or_else(|e| panic!("invalid decimal {value}: {e}"))
    }

    fn sample() -> Ticket {
        Ticket {
            ticket_id: 1,
            code: String::from("WSH000001"),
            customer_id: None,
            vehicle_id: None,
            plate: String::from("ABC1234"),
            base_id: None,
            location: Some(String::from("Bay 1")),
            wash_type_id: None,
            equipment_type_id: None,
            worker_id: None,
            started_at: datetime!(2025-06-10 14:00),
            ended_at: None,
            service_date: date!(2025 - 06 - 10),
            status: TicketStatus::InProgress,
            service_price: Some(d("100.00")),
            discount: d("15.00"),
            final_price: Some(d("85.00")),
            notes: None,
            payment_note: None,
            contract: None,
            created_at: datetime!(2025-06-10 14:00),
            updated_at: datetime!(2025-06-10 14:00),
        }
    }

    #[test]
    fn test_final_price_is_price_minus_discount() {
        assert_eq!(final_price(Some(d("100.00")), d("15.00")), Some(d("85.00")));
        assert_eq!(final_price(None, d("15.00")), None);
        assert_eq!(final_price(Some(d("10.00")), d("15.00")), Some(d("-5.00")));
    }

    #[test]
    fn test_changes_recompute_final_price() {
        let mut ticket = sample();
        TicketChanges {
            discount: Some(d("20.00")),
            ..TicketChanges::default()
        }
        .apply_to(&mut ticket);
        assert_eq!(ticket.final_price, Some(d("80.00")));

        TicketChanges {
            service_price: Some(None),
            ..TicketChanges::default()
        }
        .apply_to(&mut ticket);
        assert_eq!(ticket.final_price, None);
    }

    #[test]
    fn test_duration_clamps_to_zero() {
        let mut ticket = sample();
        assert_eq!(ticket.duration_minutes(), None);
        ticket.ended_at = Some(datetime!(2025-06-10 14:40));
        assert_eq!(ticket.duration_minutes(), Some(40));
        ticket.ended_at = Some(datetime!(2025-06-10 13:00));
        assert_eq!(ticket.duration_minutes(), Some(0));
    }

    #[test]
    fn test_elapsed_only_while_in_progress() {
        let mut ticket = sample();
        assert_eq!(ticket.elapsed_minutes(datetime!(2025-06-10 14:25)), Some(25));
        ticket.status = TicketStatus::Concluded;
        assert_eq!(ticket.elapsed_minutes(datetime!(2025-06-10 14:25)), None);
    }

    #[test]
    fn test_cancellation_note_appends_line() {
        assert_eq!(
            append_cancellation_note(Some("Bring keys"), "customer left"),
            Some(String::from("Bring keys\nCanceled: customer left"))
        );
        assert_eq!(
            append_cancellation_note(None, "rain"),
            Some(String::from("Canceled: rain"))
        );
    }

    #[test]
    fn test_transitions_only_leave_in_progress() {
        assert!(
            TicketStatus::InProgress
                .validate_transition(TicketStatus::Concluded)
                .is_ok()
        );
        assert!(
            TicketStatus::InProgress
                .validate_transition(TicketStatus::Canceled)
                .is_ok()
        );
        assert!(
            TicketStatus::Concluded
                .validate_transition(TicketStatus::Canceled)
                .is_err()
        );
        assert!(
            TicketStatus::InProgress
                .validate_transition(TicketStatus::InProgress)
                .is_err()
        );
    }

    #[test]
    fn test_mirrored_statuses() {
        assert_eq!(
            TicketStatus::Concluded.mirrored_appointment_status(),
            AppointmentStatus::Concluded
        );
        assert_eq!(
            TicketStatus::Canceled.mirrored_appointment_status(),
            AppointmentStatus::Canceled
        );
        assert_eq!(
            TicketStatus::InProgress.mirrored_appointment_status(),
            AppointmentStatus::InProgress
        );
    }

    #[test]
    fn test_end_must_follow_start() {
        let new_ticket = NewTicket {
            customer_id: None,
            vehicle_id: None,
            plate: String::from("ABC1234"),
            base_id: None,
            location: None,
            wash_type_id: None,
            equipment_type_id: None,
            worker_id: None,
            started_at: datetime!(2025-06-10 14:00),
            ended_at: Some(datetime!(2025-06-10 14:00)),
            service_date: date!(2025 - 06 - 10),
            service_price: None,
            discount: Decimal::ZERO,
            notes: None,
            payment_note: None,
            contract: None,
        };
        assert!(new_ticket.validate_times().is_err());
    }
}
