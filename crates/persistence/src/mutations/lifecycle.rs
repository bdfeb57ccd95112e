// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional orchestration of appointment and ticket writes.
//!
//! Each public function runs in one `BEGIN IMMEDIATE` transaction, so the
//! slot check, the row writes and the status history commit together or
//! not at all.

use diesel::SqliteConnection;
use time::PrimitiveDateTime;
use tracing::{debug, info};
use washbay::{AppointmentTransition, TicketTransition};
use washbay_domain::{
    Appointment, AppointmentStatus, NewAppointment, NewTicket, Slot, StatusChange, Ticket,
};

use crate::data_models::{
    AppointmentChangeset, NewAppointmentRow, NewTicketRow, TicketChangeset,
};
use crate::error::PersistenceError;
use crate::mutations::{appointments, tickets};
use crate::queries;

/// The stored state after an appointment transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentOutcome {
    pub appointment: Appointment,
    /// The ticket created by a conversion.
    pub ticket: Option<Ticket>,
}

fn ensure_slot_free(
    conn: &mut SqliteConnection,
    slot: &Slot,
    excluding: Option<i64>,
) -> Result<(), PersistenceError> {
    if queries::appointments::is_slot_available(conn, slot, excluding)? {
        Ok(())
    } else {
        Err(PersistenceError::SlotUnavailable(slot.clone()))
    }
}

/// Books a new appointment in `Scheduled` and records its first history entry.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `appointment` - The validated appointment
/// * `code` - The generated appointment code
/// * `actor` - Who booked it
/// * `now` - The current local instant
///
/// # Errors
///
/// Returns `PersistenceError::SlotUnavailable` if an active appointment
/// already holds the slot.
pub fn create_appointment(
    conn: &mut SqliteConnection,
    appointment: &NewAppointment,
    code: &str,
    actor: &str,
    now: PrimitiveDateTime,
) -> Result<Appointment, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let slot: Slot = appointment.slot();
        ensure_slot_free(conn, &slot, None)?;

        let row: NewAppointmentRow = NewAppointmentRow::from_domain(appointment, code, now)?;
        let appointment_id: i64 = appointments::insert_appointment(conn, &row, &slot)?;
        appointments::insert_status_change(
            conn,
            &StatusChange {
                appointment_id,
                from_status: None,
                to_status: AppointmentStatus::Scheduled,
                changed_by: actor.to_string(),
                changed_at: now,
                note: None,
            },
        )?;

        info!(appointment_id, code, location = %slot.location, "Appointment booked");
        queries::appointments::get_appointment(conn, appointment_id)
    })
}

/// Writes an edited appointment, re-checking its slot while it is active.
///
/// # Errors
///
/// Returns `PersistenceError::SlotUnavailable` if another active
/// appointment holds the (possibly new) slot, or `NotFound`.
pub fn save_appointment(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<Appointment, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let slot: Slot = appointment.slot();
        if appointment.status.is_active() {
            ensure_slot_free(conn, &slot, Some(appointment.appointment_id))?;
        }
        appointments::update_appointment(
            conn,
            appointment.appointment_id,
            &AppointmentChangeset::from_domain(appointment)?,
            &slot,
        )?;
        debug!(appointment_id = appointment.appointment_id, "Appointment updated");
        queries::appointments::get_appointment(conn, appointment.appointment_id)
    })
}

/// Persists a status command applied to an appointment.
///
/// For a conversion the ticket is inserted first and linked to the
/// appointment, all in the same transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The outcome of the command
/// * `ticket_code` - The code for the ticket a conversion creates
///
/// # Errors
///
/// Returns an error if a conversion has no ticket code, or if any write fails.
pub fn persist_appointment_transition(
    conn: &mut SqliteConnection,
    transition: &AppointmentTransition,
    ticket_code: Option<&str>,
) -> Result<AppointmentOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let mut appointment: Appointment = transition.appointment.clone();
        let changed_at: PrimitiveDateTime = transition.status_change.changed_at;

        let ticket_id: Option<i64> = match (&transition.new_ticket, ticket_code) {
            (Some(new_ticket), Some(code)) => {
                let ticket_id: i64 = insert_new_ticket(conn, new_ticket, code, changed_at)?;
                appointment.ticket_id = Some(ticket_id);
                Some(ticket_id)
            }
            (Some(_), None) => {
                return Err(PersistenceError::Other(String::from(
                    "A ticket code is required to convert an appointment",
                )));
            }
            (None, _) => None,
        };

        appointments::update_appointment(
            conn,
            appointment.appointment_id,
            &AppointmentChangeset::from_domain(&appointment)?,
            &appointment.slot(),
        )?;
        appointments::insert_status_change(conn, &transition.status_change)?;

        info!(
            appointment_id = appointment.appointment_id,
            from = ?transition.status_change.from_status,
            to = %transition.status_change.to_status,
            ticket_id,
            "Appointment status changed"
        );

        Ok(AppointmentOutcome {
            appointment: queries::appointments::get_appointment(conn, appointment.appointment_id)?,
            ticket: ticket_id
                .map(|id| queries::tickets::get_ticket(conn, id))
                .transpose()?,
        })
    })
}

fn insert_new_ticket(
    conn: &mut SqliteConnection,
    ticket: &NewTicket,
    code: &str,
    now: PrimitiveDateTime,
) -> Result<i64, PersistenceError> {
    tickets::insert_ticket(conn, &NewTicketRow::from_domain(ticket, code, now))
}

/// Creates a walk-in ticket in `InProgress`.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the code is taken, or
/// `ReferenceViolation` if a referenced record does not exist.
pub fn create_ticket(
    conn: &mut SqliteConnection,
    ticket: &NewTicket,
    code: &str,
    now: PrimitiveDateTime,
) -> Result<Ticket, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let ticket_id: i64 = insert_new_ticket(conn, ticket, code, now)?;
        info!(ticket_id, code, plate = %ticket.plate, "Ticket opened");
        queries::tickets::get_ticket(conn, ticket_id)
    })
}

/// Writes an edited ticket.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the ticket does not exist.
pub fn save_ticket(conn: &mut SqliteConnection, ticket: &Ticket) -> Result<Ticket, PersistenceError> {
    conn.immediate_transaction(|conn| {
        tickets::update_ticket(conn, ticket.ticket_id, &TicketChangeset::from(ticket))?;
        debug!(ticket_id = ticket.ticket_id, "Ticket updated");
        queries::tickets::get_ticket(conn, ticket.ticket_id)
    })
}

/// Persists a ticket status command and its mirror onto the appointment.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is written in that case.
pub fn persist_ticket_transition(
    conn: &mut SqliteConnection,
    transition: &TicketTransition,
) -> Result<Ticket, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let ticket: &Ticket = &transition.ticket;
        tickets::update_ticket(conn, ticket.ticket_id, &TicketChangeset::from(ticket))?;

        if let Some(mirror) = &transition.mirror {
            appointments::update_appointment(
                conn,
                mirror.appointment.appointment_id,
                &AppointmentChangeset::from_domain(&mirror.appointment)?,
                &mirror.appointment.slot(),
            )?;
            appointments::insert_status_change(conn, &mirror.status_change)?;
            info!(
                appointment_id = mirror.appointment.appointment_id,
                to = %mirror.status_change.to_status,
                "Appointment mirrored ticket status"
            );
        }

        info!(ticket_id = ticket.ticket_id, status = %ticket.status, "Ticket status changed");
        queries::tickets::get_ticket(conn, ticket.ticket_id)
    })
}
