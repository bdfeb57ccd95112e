// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A status-changing request against an appointment.
///
/// Commands are data only; `apply_appointment_command` decides whether
/// they are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentCommand {
    /// Confirm a scheduled appointment.
    Confirm {
        /// Who confirmed. Defaults to the acting user.
        confirmed_by: Option<String>,
    },
    /// Cancel a scheduled or confirmed appointment.
    Cancel {
        /// Why the appointment was canceled.
        reason: Option<String>,
    },
    /// Record that the customer did not show up.
    MarkNoShow,
    /// Start the wash: create a ticket from the appointment.
    ConvertToTicket {
        /// Extra notes appended to the ticket notes.
        extra_notes: Option<String>,
    },
}

/// A status-changing request against a wash ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketCommand {
    /// Finish the wash.
    Complete,
    /// Abandon the wash.
    Cancel {
        /// Why the wash was canceled, recorded in the notes.
        reason: Option<String>,
    },
}
