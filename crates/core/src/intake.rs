// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of new and edited appointments and tickets.
//!
//! Drafts carry typed but unchecked values. Preparing a draft applies the
//! defaults, normalizes text and enforces the scheduling rules that depend
//! on the current instant. Slot availability is not checked here; it needs
//! the store.

use crate::error::CoreError;
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime, Time};
use washbay_domain::{
    Appointment, AppointmentChanges, DEFAULT_DURATION_MINUTES, DEFAULT_ESTIMATED_PRICE,
    DomainError, NewAppointment, NewTicket, Priority, Ticket, TicketChanges, clean_text,
    normalize_plate, require_text, scheduled_end, validate_duration, validate_email,
    validate_money, validate_phone, validate_schedule,
};

/// Unchecked input for a new appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
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
    pub estimated_duration_minutes: Option<u32>,
    pub priority: Option<Priority>,
    pub estimated_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
}

/// Unchecked input for a walk-in ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub customer_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: Option<String>,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub started_at: Option<PrimitiveDateTime>,
    pub ended_at: Option<PrimitiveDateTime>,
    pub service_date: Option<Date>,
    pub service_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
}

/// Validates a new appointment and fills in defaults.
///
/// # Arguments
///
/// * `draft` - The requested appointment
/// * `now` - The current local instant
///
/// # Errors
///
/// Returns an error if:
/// - The plate or location is missing or malformed
/// - The duration is zero or longer than a day
/// - The slot is in the past or outside business hours
/// - The slot would end past the last supported date
/// - A money amount or contact field is invalid
pub fn prepare_appointment(
    draft: AppointmentDraft,
    now: PrimitiveDateTime,
) -> Result<NewAppointment, CoreError> {
    let plate: String = normalize_plate(&draft.plate)?;
    let location: String = require_text("location", &draft.location)?;
    let estimated_duration_minutes: u32 = validate_duration(
        draft
            .estimated_duration_minutes
            .unwrap_or(DEFAULT_DURATION_MINUTES),
    )?;
    validate_schedule(draft.scheduled_date, draft.scheduled_time, now)?;
    scheduled_end(
        draft.scheduled_date,
        draft.scheduled_time,
        estimated_duration_minutes,
    )?;

    let estimated_price: Decimal = validate_money(
        "estimated_price",
        draft.estimated_price.unwrap_or(DEFAULT_ESTIMATED_PRICE),
    )?;
    let discount: Decimal = validate_money("discount", draft.discount.unwrap_or(Decimal::ZERO))?;

    Ok(NewAppointment {
        customer_id: draft.customer_id,
        vehicle_id: draft.vehicle_id,
        plate,
        base_id: draft.base_id,
        location,
        wash_type_id: draft.wash_type_id,
        equipment_type_id: draft.equipment_type_id,
        worker_id: draft.worker_id,
        scheduled_date: draft.scheduled_date,
        scheduled_time: draft.scheduled_time,
        estimated_duration_minutes,
        priority: draft.priority.unwrap_or_default(),
        estimated_price,
        discount,
        contact_phone: validate_phone(draft.contact_phone.as_deref())?,
        contact_email: validate_email(draft.contact_email.as_deref())?,
        notes: clean_text(draft.notes.as_deref()),
        internal_notes: clean_text(draft.internal_notes.as_deref()),
    })
}

/// Applies edits to an appointment that still holds its slot.
///
/// Schedule rules are checked again only when the date or time changes.
///
/// # Errors
///
/// Returns an error if:
/// - The appointment is no longer scheduled or confirmed
/// - Any edited field is invalid
/// - A new date or time is in the past or outside business hours
/// - The edited slot would end past the last supported date
pub fn prepare_appointment_update(
    current: &Appointment,
    changes: AppointmentChanges,
    now: PrimitiveDateTime,
) -> Result<Appointment, CoreError> {
    if !current.status.is_active() {
        return Err(CoreError::DomainViolation(DomainError::IllegalTransition {
            from: current.status.as_str().to_string(),
            to: current.status.as_str().to_string(),
            reason: String::from("only scheduled or confirmed appointments can be edited"),
        }));
    }

    let reschedules: bool = changes.scheduled_date.is_some() || changes.scheduled_time.is_some();
    let mut updated: Appointment = current.clone();

    if let Some(date) = changes.scheduled_date {
        updated.scheduled_date = date;
    }
    if let Some(time) = changes.scheduled_time {
        updated.scheduled_time = time;
    }
    if let Some(minutes) = changes.estimated_duration_minutes {
        updated.estimated_duration_minutes = validate_duration(minutes)?;
    }
    if let Some(priority) = changes.priority {
        updated.priority = priority;
    }
    if let Some(location) = changes.location {
        updated.location = require_text("location", &location)?;
    }
    if let Some(worker_id) = changes.worker_id {
        updated.worker_id = worker_id;
    }
    if let Some(phone) = changes.contact_phone {
        updated.contact_phone = validate_phone(phone.as_deref())?;
    }
    if let Some(email) = changes.contact_email {
        updated.contact_email = validate_email(email.as_deref())?;
    }
    if let Some(notes) = changes.notes {
        updated.notes = clean_text(notes.as_deref());
    }
    if let Some(internal_notes) = changes.internal_notes {
        updated.internal_notes = clean_text(internal_notes.as_deref());
    }

    if reschedules {
        validate_schedule(updated.scheduled_date, updated.scheduled_time, now)?;
    }
    scheduled_end(
        updated.scheduled_date,
        updated.scheduled_time,
        updated.estimated_duration_minutes,
    )?;
    updated.updated_at = now;

    Ok(updated)
}

/// Validates a walk-in ticket, defaulting start to `now` and service date to today.
///
/// # Errors
///
/// Returns an error if the plate is malformed, an amount is invalid, or
/// the end time does not follow the start time.
pub fn prepare_ticket(draft: TicketDraft, now: PrimitiveDateTime) -> Result<NewTicket, CoreError> {
    let started_at: PrimitiveDateTime = draft.started_at.unwrap_or(now);
    let ticket: NewTicket = NewTicket {
        customer_id: draft.customer_id,
        vehicle_id: draft.vehicle_id,
        plate: normalize_plate(&draft.plate)?,
        base_id: draft.base_id,
        location: clean_text(draft.location.as_deref()),
        wash_type_id: draft.wash_type_id,
        equipment_type_id: draft.equipment_type_id,
        worker_id: draft.worker_id,
        started_at,
        ended_at: draft.ended_at,
        service_date: draft.service_date.unwrap_or_else(|| now.date()),
        service_price: draft
            .service_price
            .map(|p| validate_money("service_price", p))
            .transpose()?,
        discount: validate_money("discount", draft.discount.unwrap_or(Decimal::ZERO))?,
        notes: clean_text(draft.notes.as_deref()),
        payment_note: clean_text(draft.payment_note.as_deref()),
        contract: clean_text(draft.contract.as_deref()),
    };
    ticket.validate_times()?;
    Ok(ticket)
}

/// Applies pricing and note edits to a ticket and recomputes its final price.
///
/// # Errors
///
/// Returns an error if an amount is invalid.
pub fn prepare_ticket_update(
    current: &Ticket,
    changes: TicketChanges,
    now: PrimitiveDateTime,
) -> Result<Ticket, CoreError> {
    let changes: TicketChanges = TicketChanges {
        service_price: changes
            .service_price
            .map(|price| price.map(|p| validate_money("service_price", p)).transpose())
            .transpose()?,
        discount: changes
            .discount
            .map(|d| validate_money("discount", d))
            .transpose()?,
        worker_id: changes.worker_id,
        notes: changes.notes.map(|n| clean_text(n.as_deref())),
        payment_note: changes.payment_note.map(|n| clean_text(n.as_deref())),
        contract: changes.contract.map(|n| clean_text(n.as_deref())),
    };

    let mut updated: Ticket = current.clone();
    changes.apply_to(&mut updated);
    updated.updated_at = now;
    Ok(updated)
}
