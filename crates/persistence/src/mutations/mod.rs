// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `appointments`: Appointment rows and status history rows
//! - `tickets`: Ticket rows
//! - `reference`: Customers, vehicles, workers and the service catalog
//! - `lifecycle`: Transactional orchestration (`create_appointment`,
//!   `persist_appointment_transition`, `persist_ticket_transition`)
//!
//! Row ids come from `last_insert_id()` in the `backend` module.
//! Everything else is Diesel DSL.

pub mod appointments;
pub mod lifecycle;
pub mod reference;
pub mod tickets;

pub use lifecycle::AppointmentOutcome;

use crate::error::PersistenceError;

/// Fails with `NotFound` when an update or delete touched no row.
pub(crate) fn require_affected(
    affected: usize,
    entity: &str,
    id: i64,
) -> Result<(), PersistenceError> {
    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("{entity} {id}")));
    }
    Ok(())
}
