// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::backend::sqlite::last_insert_id;
use crate::data_models::{NewTicketRow, TicketChangeset};
use crate::diesel_schema::tickets;
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Inserts a ticket row and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the code is taken.
pub fn insert_ticket(conn: &mut SqliteConnection, row: &NewTicketRow) -> Result<i64, PersistenceError> {
    diesel::insert_into(tickets::table).values(row).execute(conn)?;
    last_insert_id(conn)
}

/// Overwrites the mutable columns of a ticket.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the ticket does not exist.
pub fn update_ticket(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    changes: &TicketChangeset,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(tickets::table.filter(tickets::ticket_id.eq(ticket_id)))
        .set(changes)
        .execute(conn)?;
    require_affected(affected, "Ticket", ticket_id)
}
