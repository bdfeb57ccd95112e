// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use washbay_domain::{Appointment, NewTicket, StatusChange, Ticket};

/// The result of a successful appointment command.
///
/// Transitions are atomic: callers must persist every part of the result
/// together or none of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentTransition {
    /// The appointment after the command.
    pub appointment: Appointment,
    /// The history entry recording the status change.
    pub status_change: StatusChange,
    /// The ticket to create, for conversions only.
    ///
    /// The appointment's `ticket_id` is left unset; the store links it once
    /// the ticket has an id.
    pub new_ticket: Option<NewTicket>,
}

/// A status write mirrored onto the appointment that produced a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentMirror {
    /// The appointment with its mirrored status.
    pub appointment: Appointment,
    /// The history entry recording the mirrored change.
    pub status_change: StatusChange,
}

/// The result of a successful ticket command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketTransition {
    /// The ticket after the command.
    pub ticket: Ticket,
    /// The mirrored appointment write, if the appointment status changed.
    pub mirror: Option<AppointmentMirror>,
}
