// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::debug;
use washbay_domain::{Appointment, AppointmentStatus, Slot, StatusChange, format_date, format_time};

use crate::data_models::{AppointmentFilter, AppointmentRow, StatusHistoryRow};
use crate::diesel_schema::{appointment_status_history, appointments, customers};
use crate::error::PersistenceError;
use crate::queries::{LIKE_ESCAPE, contains_pattern};

/// Status values that hold a slot.
const ACTIVE_STATUSES: [&str; 2] = [
    AppointmentStatus::Scheduled.as_str(),
    AppointmentStatus::Confirmed.as_str(),
];

/// Returns true if no active appointment other than `excluding` holds the slot.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot` - The (date, time, location) triple to check
/// * `excluding` - An appointment to ignore, used when rescheduling it
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_slot_available(
    conn: &mut SqliteConnection,
    slot: &Slot,
    excluding: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = appointments::table
        .filter(appointments::scheduled_date.eq(format_date(slot.date)))
        .filter(appointments::scheduled_time.eq(format_time(slot.time)))
        .filter(appointments::location.eq(&slot.location))
        .filter(appointments::status.eq_any(ACTIVE_STATUSES))
        .select(appointments::appointment_id)
        .into_boxed();

    if let Some(appointment_id) = excluding {
        query = query.filter(appointments::appointment_id.ne(appointment_id));
    }

    let holders: Vec<i64> = query
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("is_slot_available: {e}")))?;

    debug!(
        location = %slot.location,
        holders = holders.len(),
        "Checked slot availability"
    );
    Ok(holders.is_empty())
}

/// Retrieves an appointment by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such appointment exists.
pub fn get_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Appointment, PersistenceError> {
    appointments::table
        .filter(appointments::appointment_id.eq(appointment_id))
        .select(AppointmentRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Appointment {appointment_id}")))?
        .into_domain()
}

/// Retrieves the appointment that produced a ticket, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_appointment_by_ticket(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Option<Appointment>, PersistenceError> {
    appointments::table
        .filter(appointments::ticket_id.eq(ticket_id))
        .select(AppointmentRow::as_select())
        .first(conn)
        .optional()?
        .map(AppointmentRow::into_domain)
        .transpose()
}

/// Lists appointments matching the filter, ordered by date then time.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_appointments(
    conn: &mut SqliteConnection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, PersistenceError> {
    let mut query = appointments::table
        .select(AppointmentRow::as_select())
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(appointments::status.eq(status.as_str()));
    }
    if let Some(from) = filter.date_from {
        query = query.filter(appointments::scheduled_date.ge(format_date(from)));
    }
    if let Some(to) = filter.date_to {
        query = query.filter(appointments::scheduled_date.le(format_date(to)));
    }
    if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
        let pattern: String = contains_pattern(term);
        let matching_customers = customers::table
            .filter(customers::name.like(pattern.clone()).escape(LIKE_ESCAPE))
            .select(customers::customer_id);
        query = query.filter(
            appointments::code
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(appointments::plate.like(pattern).escape(LIKE_ESCAPE))
                .or(appointments::customer_id.eq_any(matching_customers)),
        );
    }

    query
        .order((
            appointments::scheduled_date.asc(),
            appointments::scheduled_time.asc(),
            appointments::appointment_id.asc(),
        ))
        .load::<AppointmentRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_appointments: {e}")))?
        .into_iter()
        .map(AppointmentRow::into_domain)
        .collect()
}

/// Lists appointments scheduled in `[from, to]` with their customer name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_calendar_entries(
    conn: &mut SqliteConnection,
    from: Date,
    to: Date,
) -> Result<Vec<(Appointment, Option<String>)>, PersistenceError> {
    let rows: Vec<(AppointmentRow, Option<String>)> = appointments::table
        .left_join(customers::table)
        .filter(appointments::scheduled_date.ge(format_date(from)))
        .filter(appointments::scheduled_date.le(format_date(to)))
        .order((
            appointments::scheduled_date.asc(),
            appointments::scheduled_time.asc(),
        ))
        .select((AppointmentRow::as_select(), customers::name.nullable()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_calendar_entries: {e}")))?;

    rows.into_iter()
        .map(|(row, name)| Ok((row.into_domain()?, name)))
        .collect()
}

/// Returns the status history of an appointment, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn get_status_history(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Vec<StatusChange>, PersistenceError> {
    appointment_status_history::table
        .filter(appointment_status_history::appointment_id.eq(appointment_id))
        .order((
            appointment_status_history::changed_at.asc(),
            appointment_status_history::history_id.asc(),
        ))
        .select(StatusHistoryRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_status_history: {e}")))?
        .into_iter()
        .map(StatusHistoryRow::into_domain)
        .collect()
}
