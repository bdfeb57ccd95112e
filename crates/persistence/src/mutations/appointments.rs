// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment and status history mutations.
//!
//! These functions do not open transactions. Callers in `lifecycle` wrap
//! them so a slot check, the row write and the history entry commit
//! together.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use washbay_domain::{Slot, StatusChange};

use crate::backend::sqlite::last_insert_id;
use crate::data_models::{AppointmentChangeset, NewAppointmentRow, NewStatusHistoryRow};
use crate::diesel_schema::{appointment_status_history, appointments};
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Maps a violation of the active-slot index to `SlotUnavailable`.
///
/// Other unique violations (the appointment code) keep their generic mapping.
fn map_slot_violation(err: diesel::result::Error, slot: &Slot) -> PersistenceError {
    if let diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err
        && info.message().contains("scheduled_date")
    {
        return PersistenceError::SlotUnavailable(slot.clone());
    }
    PersistenceError::from(err)
}

/// Inserts an appointment row and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::SlotUnavailable` if the active-slot index
/// rejects the row, or `Duplicate` if the code is taken.
pub fn insert_appointment(
    conn: &mut SqliteConnection,
    row: &NewAppointmentRow,
    slot: &Slot,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(appointments::table)
        .values(row)
        .execute(conn)
        .map_err(|e| map_slot_violation(e, slot))?;
    last_insert_id(conn)
}

/// Overwrites the mutable columns of an appointment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the appointment does not exist,
/// or `SlotUnavailable` if the new slot is held by another appointment.
pub fn update_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    changes: &AppointmentChangeset,
    slot: &Slot,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(appointments::table.filter(appointments::appointment_id.eq(appointment_id)))
            .set(changes)
            .execute(conn)
            .map_err(|e| map_slot_violation(e, slot))?;
    require_affected(affected, "Appointment", appointment_id)
}

/// Appends a status history entry.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_status_change(
    conn: &mut SqliteConnection,
    change: &StatusChange,
) -> Result<(), PersistenceError> {
    diesel::insert_into(appointment_status_history::table)
        .values(NewStatusHistoryRow::from(change))
        .execute(conn)?;
    Ok(())
}
