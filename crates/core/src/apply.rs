// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{AppointmentCommand, TicketCommand};
use crate::error::CoreError;
use crate::state::{AppointmentMirror, AppointmentTransition, TicketTransition};
use time::PrimitiveDateTime;
use washbay_domain::{
    Appointment, AppointmentStatus, DomainError, NewTicket, StatusChange, Ticket, TicketStatus,
    append_cancellation_note, append_note_line, clean_text,
};

/// Applies a status command to an appointment.
///
/// # Arguments
///
/// * `appointment` - The current appointment (immutable)
/// * `command` - The command to apply
/// * `actor` - Identifier of the user issuing the command
/// * `now` - The current local instant
///
/// # Returns
///
/// * `Ok(AppointmentTransition)` with the updated appointment, its history
///   entry and, for conversions, the ticket to create
/// * `Err(CoreError)` if the command is not legal in the current status
///
/// # Errors
///
/// Returns an error if:
/// - Confirming from anything but `Scheduled`
/// - Canceling or marking no-show once the appointment left
///   `Scheduled`/`Confirmed`
/// - Converting an appointment that cannot start a wash
pub fn apply_appointment_command(
    appointment: &Appointment,
    command: AppointmentCommand,
    actor: &str,
    now: PrimitiveDateTime,
) -> Result<AppointmentTransition, CoreError> {
    let mut updated: Appointment = appointment.clone();
    let mut new_ticket: Option<NewTicket> = None;
    let mut note: Option<String> = None;

    let to: AppointmentStatus = match command {
        AppointmentCommand::Confirm { confirmed_by } => {
            appointment
                .status
                .validate_transition(AppointmentStatus::Confirmed)?;
            updated.confirmed_at = Some(now);
            updated.confirmed_by =
                Some(clean_text(confirmed_by.as_deref()).unwrap_or_else(|| actor.to_string()));
            AppointmentStatus::Confirmed
        }
        AppointmentCommand::Cancel { reason } => {
            require_active(appointment, AppointmentStatus::Canceled, "canceled")?;
            let reason: Option<String> = clean_text(reason.as_deref());
            updated.cancelled_at = Some(now);
            updated.cancellation_reason.clone_from(&reason);
            note = reason;
            AppointmentStatus::Canceled
        }
        AppointmentCommand::MarkNoShow => {
            require_active(appointment, AppointmentStatus::NoShow, "marked as no-show")?;
            AppointmentStatus::NoShow
        }
        AppointmentCommand::ConvertToTicket { extra_notes } => {
            let ticket: NewTicket = ticket_from_appointment(appointment, extra_notes, now)?;
            note = Some(format!("Wash started for plate {}", ticket.plate));
            new_ticket = Some(ticket);
            AppointmentStatus::InProgress
        }
    };

    updated.status = to;
    updated.updated_at = now;

    Ok(AppointmentTransition {
        status_change: StatusChange {
            appointment_id: appointment.appointment_id,
            from_status: Some(appointment.status),
            to_status: to,
            changed_by: actor.to_string(),
            changed_at: now,
            note,
        },
        appointment: updated,
        new_ticket,
    })
}

/// Explicit cancel and no-show actions only apply while the slot is held.
fn require_active(
    appointment: &Appointment,
    to: AppointmentStatus,
    verb: &str,
) -> Result<(), CoreError> {
    if appointment.can_be_cancelled() {
        return Ok(());
    }
    Err(CoreError::DomainViolation(DomainError::IllegalTransition {
        from: appointment.status.as_str().to_string(),
        to: to.as_str().to_string(),
        reason: format!("only scheduled or confirmed appointments can be {verb}"),
    }))
}

/// Builds the ticket that starts the wash for an appointment.
///
/// # Errors
///
/// Returns `DomainError::ConversionNotAllowed` if the appointment is not
/// scheduled or confirmed, or its scheduled time has been reached.
pub fn ticket_from_appointment(
    appointment: &Appointment,
    extra_notes: Option<String>,
    now: PrimitiveDateTime,
) -> Result<NewTicket, CoreError> {
    if !appointment.status.is_active() {
        return Err(CoreError::DomainViolation(
            DomainError::ConversionNotAllowed {
                code: appointment.code.clone(),
                reason: format!("status is '{}'", appointment.status),
            },
        ));
    }
    if appointment.is_past_due(now) {
        return Err(CoreError::DomainViolation(
            DomainError::ConversionNotAllowed {
                code: appointment.code.clone(),
                reason: String::from("the scheduled time has passed"),
            },
        ));
    }

    let header: String = format!(
        "Created from appointment {}. {}",
        appointment.code,
        appointment.notes.as_deref().unwrap_or_default()
    );
    let mut notes: Option<String> = clean_text(Some(&header));
    if let Some(extra) = clean_text(extra_notes.as_deref()) {
        notes = append_note_line(notes.as_deref(), &extra);
    }

    Ok(NewTicket {
        customer_id: Some(appointment.customer_id),
        vehicle_id: appointment.vehicle_id,
        plate: appointment.plate.clone(),
        base_id: appointment.base_id,
        location: Some(appointment.location.clone()),
        wash_type_id: appointment.wash_type_id,
        equipment_type_id: appointment.equipment_type_id,
        worker_id: appointment.worker_id,
        started_at: now,
        ended_at: None,
        service_date: now.date(),
        service_price: Some(appointment.estimated_price),
        discount: appointment.discount,
        notes,
        payment_note: None,
        contract: None,
    })
}

/// Applies a status command to a ticket and mirrors the outcome onto the
/// appointment that produced it.
///
/// # Arguments
///
/// * `ticket` - The current ticket (immutable)
/// * `appointment` - The appointment linked to the ticket, if any
/// * `command` - The command to apply
/// * `actor` - Identifier of the user issuing the command
/// * `now` - The current local instant
///
/// # Errors
///
/// Returns an error if the ticket is no longer in progress.
pub fn apply_ticket_command(
    ticket: &Ticket,
    appointment: Option<&Appointment>,
    command: TicketCommand,
    actor: &str,
    now: PrimitiveDateTime,
) -> Result<TicketTransition, CoreError> {
    let mut updated: Ticket = ticket.clone();

    match command {
        TicketCommand::Complete => {
            ticket.status.validate_transition(TicketStatus::Concluded)?;
            updated.status = TicketStatus::Concluded;
            updated.ended_at.get_or_insert(now);
        }
        TicketCommand::Cancel { reason } => {
            ticket.status.validate_transition(TicketStatus::Canceled)?;
            updated.status = TicketStatus::Canceled;
            if let Some(reason) = clean_text(reason.as_deref()) {
                updated.notes = append_cancellation_note(updated.notes.as_deref(), &reason);
            }
        }
    }
    updated.updated_at = now;

    let mirror: Option<AppointmentMirror> =
        appointment.and_then(|a| propagate_ticket_status(&updated, a, actor, now));

    Ok(TicketTransition {
        ticket: updated,
        mirror,
    })
}

/// Mirrors a ticket's status onto its originating appointment.
///
/// Returns `None` when the appointment already carries the mirrored status,
/// so callers write nothing.
#[must_use]
pub fn propagate_ticket_status(
    ticket: &Ticket,
    appointment: &Appointment,
    actor: &str,
    now: PrimitiveDateTime,
) -> Option<AppointmentMirror> {
    let mirrored: AppointmentStatus = ticket.status.mirrored_appointment_status();
    if appointment.status == mirrored {
        return None;
    }

    let mut updated: Appointment = appointment.clone();
    updated.status = mirrored;
    updated.updated_at = now;
    if mirrored == AppointmentStatus::Canceled && updated.cancelled_at.is_none() {
        updated.cancelled_at = Some(now);
    }

    Some(AppointmentMirror {
        status_change: StatusChange {
            appointment_id: appointment.appointment_id,
            from_status: Some(appointment.status),
            to_status: mirrored,
            changed_by: actor.to_string(),
            changed_at: now,
            note: Some(format!("Mirrored from ticket {}", ticket.code)),
        },
        appointment: updated,
    })
}
