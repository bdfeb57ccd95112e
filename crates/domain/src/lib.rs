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

mod appointment;
mod error;
mod reference;
mod reports;
mod schedule;
mod ticket;
mod validation;

#[cfg(test)]
mod tests;

pub use appointment::{
    Appointment, AppointmentChanges, AppointmentStatus, DEFAULT_DURATION_MINUTES,
    DEFAULT_ESTIMATED_PRICE, NewAppointment, Priority, StatusChange,
};
pub use error::DomainError;
pub use reference::{
    Base, Customer, CustomerFields, DirectoryEntry, EquipmentType, Material, Vehicle,
    VehicleFields, VehicleKind, WashType, Worker, WorkerFields,
};
pub use reports::{
    AppointmentStats, CalendarEvent, DailyRevenue, PeriodSummary, TicketStats,
    appointment_stats, calendar_event, period_summary, ticket_stats,
};
pub use schedule::{
    CLOSING_HOUR, OPENING_HOUR, Slot, first_day_of_month, format_date, format_datetime,
    format_time, parse_date, parse_datetime, parse_time, scheduled_end,
    validate_business_hours, validate_date_range, validate_schedule,
};
pub use ticket::{
    NewTicket, Ticket, TicketChanges, TicketStatus, append_cancellation_note, append_note_line,
    final_price,
};
pub use validation::{
    MAX_DURATION_MINUTES, clean_text, format_money, normalize_plate, parse_money,
    parse_optional_money, require_text, validate_duration, validate_email, validate_money,
    validate_name, validate_phone,
};
