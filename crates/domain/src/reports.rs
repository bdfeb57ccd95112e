// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregations over appointments and tickets.
//!
//! These functions are pure. Callers load the relevant rows and pass them
//! in together with the business-local current date.

use crate::appointment::{Appointment, AppointmentStatus};
use crate::schedule::first_day_of_month;
use crate::ticket::{Ticket, TicketStatus};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use time::{Date, PrimitiveDateTime};

/// Appointment counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: u64,
    pub today: u64,
    /// One entry per status, in lifecycle order.
    pub by_status: Vec<(AppointmentStatus, u64)>,
    /// Still scheduled or confirmed with a date before today.
    pub overdue: u64,
}

/// Ticket counters and revenue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStats {
    pub total: u64,
    pub by_status: Vec<(TicketStatus, u64)>,
    pub revenue_today: Decimal,
    pub revenue_month: Decimal,
    /// Average whole minutes of concluded tickets with an end time.
    pub average_duration_minutes: Option<i64>,
}

/// Revenue for a single service date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRevenue {
    pub date: Date,
    pub ticket_count: u64,
    pub revenue: Decimal,
}

/// Summary of tickets over an inclusive range of service dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    pub from: Date,
    pub to: Date,
    pub ticket_count: u64,
    pub concluded_count: u64,
    pub revenue: Decimal,
    pub average_ticket: Decimal,
    pub daily: Vec<DailyRevenue>,
}

/// A calendar entry for one appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub appointment_id: i64,
    pub code: String,
    pub title: String,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub status: AppointmentStatus,
    pub color: &'static str,
}

/// Revenue counted for a ticket: its final price once concluded.
fn ticket_revenue(ticket: &Ticket) -> Decimal {
    match ticket.status {
        TicketStatus::Concluded => ticket.final_price.unwrap_or(Decimal::ZERO),
        TicketStatus::InProgress | TicketStatus::Canceled => Decimal::ZERO,
    }
}

#[must_use]
pub fn appointment_stats(appointments: &[Appointment], today: Date) -> AppointmentStats {
    let by_status: Vec<(AppointmentStatus, u64)> = AppointmentStatus::ALL
        .iter()
        .map(|status| {
            let count = appointments.iter().filter(|a| a.status == *status).count();
            (*status, count as u64)
        })
        .collect();

    AppointmentStats {
        total: appointments.len() as u64,
        today: appointments
            .iter()
            .filter(|a| a.scheduled_date == today)
            .count() as u64,
        by_status,
        overdue: appointments.iter().filter(|a| a.is_overdue(today)).count() as u64,
    }
}

#[must_use]
pub fn ticket_stats(tickets: &[Ticket], today: Date) -> TicketStats {
    let month_start: Date = first_day_of_month(today);

    let by_status: Vec<(TicketStatus, u64)> = TicketStatus::ALL
        .iter()
        .map(|status| {
            let count = tickets.iter().filter(|t| t.status == *status).count();
            (*status, count as u64)
        })
        .collect();

    let revenue_today: Decimal = tickets
        .iter()
        .filter(|t| t.service_date == today)
        .map(ticket_revenue)
        .sum();
    let revenue_month: Decimal = tickets
        .iter()
        .filter(|t| t.service_date >= month_start && t.service_date <= today)
        .map(ticket_revenue)
        .sum();

    let durations: Vec<i64> = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Concluded)
        .filter_map(Ticket::duration_minutes)
        .collect();
    let average_duration_minutes: Option<i64> = durations
        .len()
        .to_i64()
        .filter(|count| *count > 0)
        .map(|count| durations.iter().sum::<i64>() / count);

    TicketStats {
        total: tickets.len() as u64,
        by_status,
        revenue_today,
        revenue_month,
        average_duration_minutes,
    }
}

/// Summarizes tickets whose service date falls in `[from, to]`.
///
/// Tickets outside the range are ignored. The daily series only lists
/// dates that have at least one ticket.
#[must_use]
pub fn period_summary(tickets: &[Ticket], from: Date, to: Date) -> PeriodSummary {
    let in_range: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.service_date >= from && t.service_date <= to)
        .collect();

    let concluded_count: u64 = in_range
        .iter()
        .filter(|t| t.status == TicketStatus::Concluded)
        .count() as u64;
    let revenue: Decimal = in_range.iter().map(|t| ticket_revenue(t)).sum();
    let average_ticket: Decimal = if concluded_count == 0 {
        Decimal::ZERO
    } else {
        (revenue / Decimal::from(concluded_count)).round_dp(2)
    };

    let mut days: BTreeMap<Date, (u64, Decimal)> = BTreeMap::new();
    for ticket in &in_range {
        let entry = days.entry(ticket.service_date).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += ticket_revenue(ticket);
    }

    PeriodSummary {
        from,
        to,
        ticket_count: in_range.len() as u64,
        concluded_count,
        revenue,
        average_ticket,
        daily: days
            .into_iter()
            .map(|(date, (ticket_count, revenue))| DailyRevenue {
                date,
                ticket_count,
                revenue,
            })
            .collect(),
    }
}

/// Builds the calendar entry for an appointment.
#[must_use]
pub fn calendar_event(appointment: &Appointment, customer_name: Option<&str>) -> CalendarEvent {
    CalendarEvent {
        appointment_id: appointment.appointment_id,
        code: appointment.code.clone(),
        title: format!(
            "{} - {}",
            appointment.plate,
            customer_name.unwrap_or("Unknown customer")
        ),
        start: appointment.scheduled_at(),
        end: appointment.estimated_end(),
        status: appointment.status,
        color: appointment.status.color(),
    }
}
