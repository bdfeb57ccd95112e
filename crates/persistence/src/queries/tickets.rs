// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use washbay_domain::{Ticket, format_date};

use crate::data_models::{TicketFilter, TicketRow};
use crate::diesel_schema::{customers, tickets};
use crate::error::PersistenceError;
use crate::queries::{LIKE_ESCAPE, contains_pattern};

/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such ticket exists.
pub fn get_ticket(conn: &mut SqliteConnection, ticket_id: i64) -> Result<Ticket, PersistenceError> {
    tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Ticket {ticket_id}")))?
        .into_domain()
}

/// Lists tickets matching the filter, most recent start first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_tickets(
    conn: &mut SqliteConnection,
    filter: &TicketFilter,
) -> Result<Vec<Ticket>, PersistenceError> {
    let mut query = tickets::table.select(TicketRow::as_select()).into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(tickets::status.eq(status.as_str()));
    }
    if let Some(from) = filter.date_from {
        query = query.filter(tickets::service_date.ge(format_date(from)));
    }
    if let Some(to) = filter.date_to {
        query = query.filter(tickets::service_date.le(format_date(to)));
    }
    if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
        let pattern: String = contains_pattern(term);
        let matching_customers = customers::table
            .filter(customers::name.like(pattern.clone()).escape(LIKE_ESCAPE))
            .select(customers::customer_id.nullable());
        query = query.filter(
            tickets::code
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(tickets::plate.like(pattern).escape(LIKE_ESCAPE))
                .or(tickets::customer_id.eq_any(matching_customers)),
        );
    }

    query
        .order((tickets::started_at.desc(), tickets::ticket_id.desc()))
        .load::<TicketRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_tickets: {e}")))?
        .into_iter()
        .map(TicketRow::into_domain)
        .collect()
}
