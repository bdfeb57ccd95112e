// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for statistics, the calendar feed and period reports.

use time::macros::datetime;
use washbay::FixedClock;

use crate::{
    ApiError, AppointmentInfo, AppointmentStatsResponse, CalendarQuery, CalendarResponse,
    CreateTicketRequest, PeriodQuery, PeriodReportResponse, StatusCount, TicketInfo,
    TicketStatsResponse, appointment_stats, calendar, complete_ticket, create_ticket,
    period_report, ticket_stats,
};

use super::helpers::{Fixture, book, clock, create_test_attendant, setup};

fn count(by_status: &[StatusCount], status: &str) -> u64 {
    by_status
        .iter()
        .find(|s| s.status == status)
        .map_or(0, |s| s.count)
}

/// Opens a priced ticket on `service_date` and completes it an hour later.
fn concluded_ticket(fixture: &mut Fixture, service_date: &str, price: &str) -> TicketInfo {
    let ticket: TicketInfo = create_ticket(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        &CreateTicketRequest {
            plate: Some(String::from("ABC1D23")),
            started_at: Some(String::from("2025-06-09T08:00:00")),
            service_date: Some(String::from(service_date)),
            service_price: Some(String::from(price)),
            ..CreateTicketRequest::default()
        },
        &create_test_attendant(),
    )
    .unwrap();
    complete_ticket(
        &mut fixture.persistence,
        &FixedClock::new(datetime!(2025-06-09 09:00)),
        ticket.ticket_id,
        &create_test_attendant(),
    )
    .unwrap()
}

#[test]
fn test_appointment_stats_counts_today_and_overdue() {
    let mut fixture: Fixture = setup();
    book(&mut fixture, "09:00");
    book(&mut fixture, "10:00");

    let before: AppointmentStatsResponse =
        appointment_stats(&mut fixture.persistence, &clock()).unwrap();
    assert_eq!(before.total, 2);
    assert_eq!(before.today, 0);
    assert_eq!(before.overdue, 0);
    assert_eq!(count(&before.by_status, "scheduled"), 2);
    assert_eq!(before.by_status.len(), 6);

    let day_after: FixedClock = FixedClock::new(datetime!(2025-06-11 07:00));
    let after: AppointmentStatsResponse =
        appointment_stats(&mut fixture.persistence, &day_after).unwrap();
    assert_eq!(after.overdue, 2);
}

#[test]
fn test_calendar_lists_the_month() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");

    let june: CalendarResponse = calendar(
        &mut fixture.persistence,
        &CalendarQuery {
            year: 2025,
            month: 6,
        },
    )
    .unwrap();
    assert_eq!(june.events.len(), 1);
    let event = &june.events[0];
    assert_eq!(event.appointment_id, appointment.appointment_id);
    assert_eq!(event.title, "ABC1D23 - Maria Souza");
    assert_eq!(event.start, "2025-06-10T09:00:00");
    assert_eq!(event.end, "2025-06-10T09:30:00");
    assert_eq!(event.color, "#007bff");

    let july: CalendarResponse = calendar(
        &mut fixture.persistence,
        &CalendarQuery {
            year: 2025,
            month: 7,
        },
    )
    .unwrap();
    assert!(july.events.is_empty());
}

#[test]
fn test_calendar_rejects_invalid_month() {
    let mut fixture: Fixture = setup();
    let result = calendar(
        &mut fixture.persistence,
        &CalendarQuery {
            year: 2025,
            month: 13,
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "month"
    ));
}

#[test]
fn test_calendar_handles_december() {
    let mut fixture: Fixture = setup();
    let december: CalendarResponse = calendar(
        &mut fixture.persistence,
        &CalendarQuery {
            year: 2025,
            month: 12,
        },
    )
    .unwrap();
    assert!(december.events.is_empty());
}

#[test]
fn test_ticket_stats_counts_concluded_revenue() {
    let mut fixture: Fixture = setup();
    concluded_ticket(&mut fixture, "2025-06-09", "40.00");
    concluded_ticket(&mut fixture, "2025-06-02", "60.00");
    concluded_ticket(&mut fixture, "2025-05-30", "99.00");

    let stats: TicketStatsResponse = ticket_stats(&mut fixture.persistence, &clock()).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(count(&stats.by_status, "concluded"), 3);
    assert_eq!(stats.revenue_today, "40.00");
    assert_eq!(stats.revenue_month, "100.00");
    assert_eq!(stats.average_duration_minutes, Some(60));
}

#[test]
fn test_period_report_summarizes_range() {
    let mut fixture: Fixture = setup();
    concluded_ticket(&mut fixture, "2025-06-02", "30.00");
    concluded_ticket(&mut fixture, "2025-06-02", "20.00");
    concluded_ticket(&mut fixture, "2025-06-05", "40.00");
    concluded_ticket(&mut fixture, "2025-06-20", "99.00");

    let report: PeriodReportResponse = period_report(
        &mut fixture.persistence,
        &PeriodQuery {
            from: String::from("2025-06-01"),
            to: String::from("2025-06-07"),
        },
    )
    .unwrap();

    assert_eq!(report.ticket_count, 3);
    assert_eq!(report.concluded_count, 3);
    assert_eq!(report.revenue, "90.00");
    assert_eq!(report.average_ticket, "30.00");
    assert_eq!(report.tickets.len(), 3);
    let days: Vec<(&str, u64, &str)> = report
        .daily
        .iter()
        .map(|d| (d.date.as_str(), d.ticket_count, d.revenue.as_str()))
        .collect();
    assert_eq!(
        days,
        vec![("2025-06-02", 2, "50.00"), ("2025-06-05", 1, "40.00")]
    );
}

#[test]
fn test_period_report_rejects_inverted_range() {
    let mut fixture: Fixture = setup();
    let result = period_report(
        &mut fixture.persistence,
        &PeriodQuery {
            from: String::from("2025-06-07"),
            to: String::from("2025-06-01"),
        },
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
