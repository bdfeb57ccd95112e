// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Month};
use washbay::Clock;
use washbay_domain::{
    Appointment, PeriodSummary, Ticket, appointment_stats as summarize_appointments,
    calendar_event, parse_date, period_summary, ticket_stats as summarize_tickets,
    validate_date_range,
};
use washbay_persistence::{AppointmentFilter, Persistence, TicketFilter};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AppointmentStatsResponse, CalendarEventInfo, CalendarQuery, CalendarResponse, PeriodQuery,
    PeriodReportResponse, TicketStatsResponse,
};

/// Counts appointments by status, for today, and overdue.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn appointment_stats(
    persistence: &mut Persistence,
    clock: &dyn Clock,
) -> Result<AppointmentStatsResponse, ApiError> {
    let appointments: Vec<Appointment> = persistence
        .list_appointments(&AppointmentFilter::default())
        .map_err(|e| translate_persistence_error(e, "Appointment"))?;
    Ok(AppointmentStatsResponse::from(&summarize_appointments(
        &appointments,
        clock.today(),
    )))
}

/// Returns the first and last day of a month.
fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), ApiError> {
    let invalid = |message: String| ApiError::InvalidInput {
        field: String::from("month"),
        message,
    };
    let month: Month = Month::try_from(month).map_err(|e| invalid(e.to_string()))?;
    let first: Date = Date::from_calendar_date(year, month, 1).map_err(|e| invalid(e.to_string()))?;
    let next: Date = if month == Month::December {
        Date::from_calendar_date(year + 1, Month::January, 1)
    } else {
        Date::from_calendar_date(year, month.next(), 1)
    }
    .map_err(|e| invalid(e.to_string()))?;
    let last: Date = next
        .previous_day()
        .ok_or_else(|| invalid(format!("{year}-{month} has no last day")))?;
    Ok((first, last))
}

/// Lists the appointments of one month as calendar events.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the month is out of range.
pub fn calendar(
    persistence: &mut Persistence,
    query: &CalendarQuery,
) -> Result<CalendarResponse, ApiError> {
    let (first, last) = month_bounds(query.year, query.month)?;
    let entries: Vec<(Appointment, Option<String>)> = persistence
        .list_calendar_entries(first, last)
        .map_err(|e| translate_persistence_error(e, "Appointment"))?;

    Ok(CalendarResponse {
        year: query.year,
        month: query.month,
        events: entries
            .iter()
            .map(|(appointment, name)| {
                CalendarEventInfo::from(&calendar_event(appointment, name.as_deref()))
            })
            .collect(),
    })
}

/// Summarizes tickets by status, revenue and average duration.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn ticket_stats(
    persistence: &mut Persistence,
    clock: &dyn Clock,
) -> Result<TicketStatsResponse, ApiError> {
    let tickets: Vec<Ticket> = persistence
        .list_tickets(&TicketFilter::default())
        .map_err(|e| translate_persistence_error(e, "Ticket"))?;
    Ok(TicketStatsResponse::from(&summarize_tickets(
        &tickets,
        clock.today(),
    )))
}

/// Reports tickets and revenue for an inclusive range of service dates.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a date is malformed or the range is
/// inverted.
pub fn period_report(
    persistence: &mut Persistence,
    query: &PeriodQuery,
) -> Result<PeriodReportResponse, ApiError> {
    let from: Date = parse_date(&query.from).map_err(translate_domain_error)?;
    let to: Date = parse_date(&query.to).map_err(translate_domain_error)?;
    validate_date_range(from, to).map_err(translate_domain_error)?;

    let tickets: Vec<Ticket> = persistence
        .list_tickets(&TicketFilter {
            date_from: Some(from),
            date_to: Some(to),
            ..TicketFilter::default()
        })
        .map_err(|e| translate_persistence_error(e, "Ticket"))?;
    let summary: PeriodSummary = period_summary(&tickets, from, to);

    Ok(PeriodReportResponse::new(&summary, &tickets))
}
