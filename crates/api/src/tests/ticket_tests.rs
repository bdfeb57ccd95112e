// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for walk-in tickets and the ticket to appointment mirror.

use time::macros::datetime;
use washbay::FixedClock;

use crate::{
    ApiError, AppointmentDetailResponse, AppointmentInfo, CancelRequest,
    ConvertToTicketRequest, CreateTicketRequest, ListQuery, TicketDetailResponse, TicketInfo,
    UpdateTicketRequest, cancel_ticket, complete_ticket, convert_to_ticket, create_ticket,
    get_appointment, get_ticket, list_tickets, update_ticket,
};

use super::helpers::{Fixture, book, clock, create_test_attendant, setup};

const fn wash_done_clock() -> FixedClock {
    FixedClock::new(datetime!(2025-06-10 09:45))
}

fn walk_in(fixture: &mut Fixture, request: &CreateTicketRequest) -> Result<TicketInfo, ApiError> {
    create_ticket(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        request,
        &create_test_attendant(),
    )
}

/// Books 2025-06-10 09:00 and starts the wash at 08:59.
fn converted(fixture: &mut Fixture) -> (AppointmentInfo, TicketInfo) {
    let appointment: AppointmentInfo = book(fixture, "09:00");
    let response = convert_to_ticket(
        &mut fixture.persistence,
        &FixedClock::new(datetime!(2025-06-10 08:59)),
        &fixture.codes,
        appointment.appointment_id,
        &ConvertToTicketRequest::default(),
        &create_test_attendant(),
    )
    .unwrap();
    (response.appointment, response.ticket)
}

#[test]
fn test_walk_in_ticket_computes_final_price() {
    let mut fixture: Fixture = setup();
    let request: CreateTicketRequest = CreateTicketRequest {
        vehicle_id: Some(fixture.vehicle_id),
        service_price: Some(String::from("100.00")),
        discount: Some(String::from("15.00")),
        ..CreateTicketRequest::default()
    };

    let ticket: TicketInfo = walk_in(&mut fixture, &request).unwrap();

    assert_eq!(ticket.code, "WSH000001");
    assert_eq!(ticket.status, "in_progress");
    assert_eq!(ticket.plate, "ABC1D23");
    assert_eq!(ticket.customer_id, Some(fixture.customer_id));
    assert_eq!(ticket.final_price.as_deref(), Some("85.00"));
    assert_eq!(ticket.started_at, "2025-06-09T10:00:00");
    assert_eq!(ticket.service_date, "2025-06-09");
    assert_eq!(ticket.duration_minutes, None);
}

#[test]
fn test_walk_in_without_price_has_no_final_price() {
    let mut fixture: Fixture = setup();
    let request: CreateTicketRequest = CreateTicketRequest {
        plate: Some(String::from("xyz9876")),
        ..CreateTicketRequest::default()
    };

    let ticket: TicketInfo = walk_in(&mut fixture, &request).unwrap();
    assert_eq!(ticket.plate, "XYZ9876");
    assert_eq!(ticket.customer_id, None);
    assert_eq!(ticket.final_price, None);
}

#[test]
fn test_walk_in_requires_a_plate() {
    let mut fixture: Fixture = setup();
    let result = walk_in(&mut fixture, &CreateTicketRequest::default());
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "plate"
    ));
}

#[test]
fn test_walk_in_end_must_follow_start() {
    let mut fixture: Fixture = setup();
    let request: CreateTicketRequest = CreateTicketRequest {
        plate: Some(String::from("ABC1D23")),
        started_at: Some(String::from("2025-06-09T10:00:00")),
        ended_at: Some(String::from("2025-06-09T09:30:00")),
        ..CreateTicketRequest::default()
    };

    let result = walk_in(&mut fixture, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "ended_at"
    ));
}

#[test]
fn test_complete_ticket_concludes_the_appointment() {
    let mut fixture: Fixture = setup();
    let (appointment, ticket) = converted(&mut fixture);

    let done: TicketInfo = complete_ticket(
        &mut fixture.persistence,
        &wash_done_clock(),
        ticket.ticket_id,
        &create_test_attendant(),
    )
    .unwrap();

    assert_eq!(done.status, "concluded");
    assert_eq!(done.ended_at.as_deref(), Some("2025-06-10T09:45:00"));
    assert_eq!(done.duration_minutes, Some(46));

    let detail: AppointmentDetailResponse = get_appointment(
        &mut fixture.persistence,
        &wash_done_clock(),
        appointment.appointment_id,
    )
    .unwrap();
    assert_eq!(detail.appointment.status, "concluded");
    let last = detail.history.last().unwrap();
    assert_eq!(last.from_status.as_deref(), Some("in_progress"));
    assert_eq!(last.to_status, "concluded");
    assert_eq!(last.note.as_deref(), Some("Mirrored from ticket WSH000002"));

    let again = complete_ticket(
        &mut fixture.persistence,
        &wash_done_clock(),
        ticket.ticket_id,
        &create_test_attendant(),
    );
    assert!(matches!(again, Err(ApiError::IllegalTransition { .. })));
}

#[test]
fn test_cancel_ticket_cancels_the_appointment() {
    let mut fixture: Fixture = setup();
    let (appointment, ticket) = converted(&mut fixture);

    let canceled: TicketInfo = cancel_ticket(
        &mut fixture.persistence,
        &wash_done_clock(),
        ticket.ticket_id,
        &CancelRequest {
            reason: Some(String::from("Water outage")),
        },
        &create_test_attendant(),
    )
    .unwrap();

    assert_eq!(canceled.status, "canceled");
    assert!(
        canceled
            .notes
            .as_deref()
            .unwrap_or_default()
            .ends_with("Canceled: Water outage")
    );

    let detail: AppointmentDetailResponse = get_appointment(
        &mut fixture.persistence,
        &wash_done_clock(),
        appointment.appointment_id,
    )
    .unwrap();
    assert_eq!(detail.appointment.status, "canceled");
    assert_eq!(
        detail.appointment.cancelled_at.as_deref(),
        Some("2025-06-10T09:45:00")
    );
    assert_eq!(detail.history.len(), 3);
}

#[test]
fn test_walk_in_completion_mirrors_nothing() {
    let mut fixture: Fixture = setup();
    let ticket: TicketInfo = walk_in(
        &mut fixture,
        &CreateTicketRequest {
            plate: Some(String::from("ABC1D23")),
            ..CreateTicketRequest::default()
        },
    )
    .unwrap();

    let done: TicketInfo = complete_ticket(
        &mut fixture.persistence,
        &wash_done_clock(),
        ticket.ticket_id,
        &create_test_attendant(),
    )
    .unwrap();
    assert_eq!(done.status, "concluded");

    let detail: TicketDetailResponse =
        get_ticket(&mut fixture.persistence, &wash_done_clock(), ticket.ticket_id).unwrap();
    assert_eq!(detail.appointment_id, None);
    assert_eq!(detail.elapsed_minutes, None);
}

#[test]
fn test_get_ticket_reports_origin_and_elapsed_time() {
    let mut fixture: Fixture = setup();
    let (appointment, ticket) = converted(&mut fixture);

    let detail: TicketDetailResponse =
        get_ticket(&mut fixture.persistence, &wash_done_clock(), ticket.ticket_id).unwrap();

    assert_eq!(detail.appointment_id, Some(appointment.appointment_id));
    assert_eq!(detail.appointment_code.as_deref(), Some("APT000001"));
    assert_eq!(detail.elapsed_minutes, Some(46));
}

#[test]
fn test_update_ticket_recomputes_final_price() {
    let mut fixture: Fixture = setup();
    let ticket: TicketInfo = walk_in(
        &mut fixture,
        &CreateTicketRequest {
            plate: Some(String::from("ABC1D23")),
            service_price: Some(String::from("100.00")),
            ..CreateTicketRequest::default()
        },
    )
    .unwrap();

    let discounted: TicketInfo = update_ticket(
        &mut fixture.persistence,
        &clock(),
        ticket.ticket_id,
        &UpdateTicketRequest {
            discount: Some(String::from("20")),
            payment_note: Some(Some(String::from("Card"))),
            ..UpdateTicketRequest::default()
        },
        &create_test_attendant(),
    )
    .unwrap();
    assert_eq!(discounted.final_price.as_deref(), Some("80.00"));
    assert_eq!(discounted.payment_note.as_deref(), Some("Card"));

    let unpriced: TicketInfo = update_ticket(
        &mut fixture.persistence,
        &clock(),
        ticket.ticket_id,
        &UpdateTicketRequest {
            service_price: Some(None),
            ..UpdateTicketRequest::default()
        },
        &create_test_attendant(),
    )
    .unwrap();
    assert_eq!(unpriced.service_price, None);
    assert_eq!(unpriced.final_price, None);
    assert_eq!(unpriced.payment_note.as_deref(), Some("Card"));
}

#[test]
fn test_list_tickets_filters_by_status() {
    let mut fixture: Fixture = setup();
    let (_, converted_ticket) = converted(&mut fixture);
    walk_in(
        &mut fixture,
        &CreateTicketRequest {
            plate: Some(String::from("XYZ9876")),
            ..CreateTicketRequest::default()
        },
    )
    .unwrap();
    complete_ticket(
        &mut fixture.persistence,
        &wash_done_clock(),
        converted_ticket.ticket_id,
        &create_test_attendant(),
    )
    .unwrap();

    let all = list_tickets(&mut fixture.persistence, &ListQuery::default()).unwrap();
    assert_eq!(all.tickets.len(), 2);

    let concluded = list_tickets(
        &mut fixture.persistence,
        &ListQuery {
            status: Some(String::from("concluded")),
            ..ListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(concluded.tickets.len(), 1);
    assert_eq!(concluded.tickets[0].ticket_id, converted_ticket.ticket_id);

    let by_plate = list_tickets(
        &mut fixture.persistence,
        &ListQuery {
            search: Some(String::from("xyz")),
            ..ListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(by_plate.tickets.len(), 1);
}
