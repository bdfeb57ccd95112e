// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod clock;
mod codes;
mod command;
mod error;
mod intake;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{
    apply_appointment_command, apply_ticket_command, propagate_ticket_status,
    ticket_from_appointment,
};
pub use clock::{Clock, DEFAULT_TIMEZONE, FixedClock, SystemClock};
pub use codes::{
    APPOINTMENT_CODE_PREFIX, CodeGenerator, RandomCodeGenerator, SequentialCodeGenerator,
    TICKET_CODE_PREFIX, is_well_formed,
};
pub use command::{AppointmentCommand, TicketCommand};
pub use error::CoreError;
pub use intake::{
    AppointmentDraft, TicketDraft, prepare_appointment, prepare_appointment_update,
    prepare_ticket, prepare_ticket_update,
};
pub use state::{AppointmentMirror, AppointmentTransition, TicketTransition};
