// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for booking, editing and converting appointments.

use crate::{
    ApiError, AppointmentDetailResponse, AppointmentInfo, AvailabilityRequest, CancelRequest,
    ConfirmAppointmentRequest, ConvertToTicketRequest, ConvertToTicketResponse,
    CreateAppointmentRequest, ListQuery, UpdateAppointmentRequest, cancel_appointment,
    check_availability, confirm_appointment, convert_to_ticket, create_appointment,
    deactivate_vehicle, get_appointment, list_appointments, mark_no_show, update_appointment,
};

use super::helpers::{
    Fixture, book, booking, clock, create_test_attendant, create_test_manager, later_clock,
    setup,
};

fn attempt(
    fixture: &mut Fixture,
    request: &CreateAppointmentRequest,
) -> Result<AppointmentInfo, ApiError> {
    create_appointment(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        request,
        &create_test_attendant(),
    )
}

fn assert_invalid_field(result: Result<AppointmentInfo, ApiError>, expected: &str) {
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, expected),
        other => panic!("Expected InvalidInput on '{expected}', got {other:?}"),
    }
}

#[test]
fn test_create_appointment_applies_defaults() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");

    assert_eq!(appointment.code, "APT000001");
    assert_eq!(appointment.status, "scheduled");
    assert_eq!(appointment.priority, "normal");
    assert_eq!(appointment.plate, "ABC1D23");
    assert_eq!(appointment.estimated_price, "25.00");
    assert_eq!(appointment.discount, "0.00");
    assert_eq!(appointment.estimated_duration_minutes, 30);
    assert_eq!(appointment.scheduled_time, "09:00:00");
    assert_eq!(appointment.estimated_end, "2025-06-10T09:30:00");
    assert!(appointment.can_be_cancelled);
    assert_eq!(appointment.ticket_id, None);
}

#[test]
fn test_explicit_plate_overrides_vehicle_plate() {
    let mut fixture: Fixture = setup();
    let mut request: CreateAppointmentRequest = booking(&fixture, "09:00");
    request.plate = Some(String::from(" xyz-9876 "));

    let appointment: AppointmentInfo = attempt(&mut fixture, &request).unwrap();
    assert_eq!(appointment.plate, "XYZ-9876");
}

#[test]
fn test_booking_taken_slot_is_a_scheduling_conflict() {
    let mut fixture: Fixture = setup();
    book(&mut fixture, "09:00");

    let request: CreateAppointmentRequest = booking(&fixture, "09:00");
    let result: Result<AppointmentInfo, ApiError> = attempt(&mut fixture, &request);
    assert!(matches!(result, Err(ApiError::SchedulingConflict { .. })));

    let mut other_bay: CreateAppointmentRequest = booking(&fixture, "09:00");
    other_bay.location = String::from("Bay 2");
    assert!(attempt(&mut fixture, &other_bay).is_ok());
}

#[test]
fn test_canceling_frees_the_slot() {
    let mut fixture: Fixture = setup();
    let first: AppointmentInfo = book(&mut fixture, "09:00");

    let canceled: AppointmentInfo = cancel_appointment(
        &mut fixture.persistence,
        &clock(),
        first.appointment_id,
        &CancelRequest {
            reason: Some(String::from("Customer called")),
        },
        &create_test_attendant(),
    )
    .unwrap();
    assert_eq!(canceled.status, "canceled");
    assert_eq!(canceled.cancellation_reason.as_deref(), Some("Customer called"));
    assert!(!canceled.can_be_cancelled);

    let again: AppointmentInfo = book(&mut fixture, "09:00");
    assert_ne!(again.appointment_id, first.appointment_id);
}

#[test]
fn test_booking_outside_business_hours_is_rejected() {
    let mut fixture: Fixture = setup();

    let early: CreateAppointmentRequest = booking(&fixture, "05:59");
    assert_invalid_field(attempt(&mut fixture, &early), "time");

    let closing: CreateAppointmentRequest = booking(&fixture, "18:00");
    assert_invalid_field(attempt(&mut fixture, &closing), "time");

    let last: CreateAppointmentRequest = booking(&fixture, "17:59");
    assert!(attempt(&mut fixture, &last).is_ok());
}

#[test]
fn test_booking_in_the_past_is_rejected() {
    let mut fixture: Fixture = setup();
    let mut request: CreateAppointmentRequest = booking(&fixture, "09:00");
    request.scheduled_date = String::from("2025-06-09");

    assert_invalid_field(attempt(&mut fixture, &request), "scheduled_date");
}

#[test]
fn test_booking_that_cannot_end_is_rejected_before_storage() {
    let mut fixture: Fixture = setup();

    let mut far_future: CreateAppointmentRequest = booking(&fixture, "17:00");
    far_future.scheduled_date = String::from("9999-12-31");
    far_future.estimated_duration_minutes = Some(600);
    assert_invalid_field(attempt(&mut fixture, &far_future), "scheduled_date");

    let mut too_long: CreateAppointmentRequest = booking(&fixture, "09:00");
    too_long.estimated_duration_minutes = Some(3_000_000_000);
    assert_invalid_field(
        attempt(&mut fixture, &too_long),
        "estimated_duration_minutes",
    );

    let all = list_appointments(&mut fixture.persistence, &ListQuery::default()).unwrap();
    assert!(all.appointments.is_empty());
}

#[test]
fn test_booking_requires_plate_and_location() {
    let mut fixture: Fixture = setup();

    let mut no_plate: CreateAppointmentRequest = booking(&fixture, "09:00");
    no_plate.vehicle_id = None;
    assert_invalid_field(attempt(&mut fixture, &no_plate), "plate");

    let mut no_location: CreateAppointmentRequest = booking(&fixture, "09:00");
    no_location.location = String::from("   ");
    assert_invalid_field(attempt(&mut fixture, &no_location), "location");
}

#[test]
fn test_booking_checks_references() {
    let mut fixture: Fixture = setup();

    let mut unknown: CreateAppointmentRequest = booking(&fixture, "09:00");
    unknown.customer_id = 999;
    assert!(matches!(
        attempt(&mut fixture, &unknown),
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Customer"
    ));

    deactivate_vehicle(
        &mut fixture.persistence,
        fixture.vehicle_id,
        &create_test_manager(),
    )
    .unwrap();
    let request: CreateAppointmentRequest = booking(&fixture, "09:00");
    assert_invalid_field(attempt(&mut fixture, &request), "vehicle_id");
}

#[test]
fn test_confirm_records_who_confirmed() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");

    let confirmed: AppointmentInfo = confirm_appointment(
        &mut fixture.persistence,
        &clock(),
        appointment.appointment_id,
        &ConfirmAppointmentRequest::default(),
        &create_test_attendant(),
    )
    .unwrap();

    assert_eq!(confirmed.status, "confirmed");
    assert_eq!(confirmed.confirmed_by.as_deref(), Some("attendant-1"));
    assert_eq!(confirmed.confirmed_at.as_deref(), Some("2025-06-09T10:00:00"));
}

#[test]
fn test_confirm_canceled_appointment_is_illegal() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");
    cancel_appointment(
        &mut fixture.persistence,
        &clock(),
        appointment.appointment_id,
        &CancelRequest {
            reason: Some(String::from("Rain")),
        },
        &create_test_attendant(),
    )
    .unwrap();

    let result: Result<AppointmentInfo, ApiError> = confirm_appointment(
        &mut fixture.persistence,
        &clock(),
        appointment.appointment_id,
        &ConfirmAppointmentRequest::default(),
        &create_test_attendant(),
    );

    match result {
        Err(ApiError::IllegalTransition { from, to, .. }) => {
            assert_eq!(from, "canceled");
            assert_eq!(to, "confirmed");
        }
        other => panic!("Expected IllegalTransition, got {other:?}"),
    }
}

#[test]
fn test_cancel_requires_reason() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");

    let result: Result<AppointmentInfo, ApiError> = cancel_appointment(
        &mut fixture.persistence,
        &clock(),
        appointment.appointment_id,
        &CancelRequest {
            reason: Some(String::from("  ")),
        },
        &create_test_attendant(),
    );
    assert_invalid_field(result, "reason");
}

#[test]
fn test_no_show_is_final() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");

    let missed: AppointmentInfo = mark_no_show(
        &mut fixture.persistence,
        &later_clock(),
        appointment.appointment_id,
        &create_test_attendant(),
    )
    .unwrap();
    assert_eq!(missed.status, "no_show");

    let result: Result<AppointmentInfo, ApiError> = cancel_appointment(
        &mut fixture.persistence,
        &later_clock(),
        appointment.appointment_id,
        &CancelRequest {
            reason: Some(String::from("Too late")),
        },
        &create_test_attendant(),
    );
    assert!(matches!(result, Err(ApiError::IllegalTransition { .. })));
}

#[test]
fn test_convert_to_ticket_links_both_records() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");
    confirm_appointment(
        &mut fixture.persistence,
        &clock(),
        appointment.appointment_id,
        &ConfirmAppointmentRequest::default(),
        &create_test_attendant(),
    )
    .unwrap();

    let response: ConvertToTicketResponse = convert_to_ticket(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        appointment.appointment_id,
        &ConvertToTicketRequest {
            extra_notes: Some(String::from("Key in the ignition")),
        },
        &create_test_attendant(),
    )
    .unwrap();

    assert_eq!(response.appointment.status, "in_progress");
    assert_eq!(response.ticket.code, "WSH000002");
    assert_eq!(response.ticket.status, "in_progress");
    assert_eq!(response.ticket.plate, "ABC1D23");
    assert_eq!(response.ticket.service_price.as_deref(), Some("25.00"));
    assert_eq!(response.ticket.started_at, "2025-06-09T10:00:00");
    assert_eq!(response.appointment.ticket_id, Some(response.ticket.ticket_id));
    assert_eq!(
        response.message,
        "Appointment APT000001 converted to ticket WSH000002"
    );
    let notes: String = response.ticket.notes.unwrap_or_default();
    assert!(notes.starts_with("Created from appointment APT000001."));
    assert!(notes.ends_with("Key in the ignition"));

    let detail: AppointmentDetailResponse =
        get_appointment(&mut fixture.persistence, &clock(), appointment.appointment_id).unwrap();
    assert_eq!(detail.customer_name, "Maria Souza");
    assert!(!detail.can_start_wash);
    assert_eq!(
        detail.ticket.as_ref().map(|t| t.code.as_str()),
        Some("WSH000002")
    );
    let statuses: Vec<&str> = detail
        .history
        .iter()
        .map(|h| h.to_status.as_str())
        .collect();
    assert_eq!(statuses, vec!["scheduled", "confirmed", "in_progress"]);
    assert_eq!(
        detail.history[2].note.as_deref(),
        Some("Wash started for plate ABC1D23")
    );
}

#[test]
fn test_convert_past_appointment_is_not_allowed() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");

    let result: Result<ConvertToTicketResponse, ApiError> = convert_to_ticket(
        &mut fixture.persistence,
        &later_clock(),
        &fixture.codes,
        appointment.appointment_id,
        &ConvertToTicketRequest::default(),
        &create_test_attendant(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ConversionNotAllowed { code, .. }) if code == "APT000001"
    ));
    let detail: AppointmentDetailResponse =
        get_appointment(&mut fixture.persistence, &later_clock(), appointment.appointment_id)
            .unwrap();
    assert_eq!(detail.appointment.status, "scheduled");
    assert!(detail.ticket.is_none());
}

#[test]
fn test_convert_twice_is_not_allowed() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");
    let request: ConvertToTicketRequest = ConvertToTicketRequest::default();

    convert_to_ticket(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        appointment.appointment_id,
        &request,
        &create_test_attendant(),
    )
    .unwrap();
    let result: Result<ConvertToTicketResponse, ApiError> = convert_to_ticket(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        appointment.appointment_id,
        &request,
        &create_test_attendant(),
    );

    assert!(matches!(result, Err(ApiError::ConversionNotAllowed { .. })));
}

#[test]
fn test_reschedule_into_taken_slot_is_a_conflict() {
    let mut fixture: Fixture = setup();
    book(&mut fixture, "09:00");
    let second: AppointmentInfo = book(&mut fixture, "10:00");

    let result: Result<AppointmentInfo, ApiError> = update_appointment(
        &mut fixture.persistence,
        &clock(),
        second.appointment_id,
        &UpdateAppointmentRequest {
            scheduled_time: Some(String::from("09:00")),
            ..UpdateAppointmentRequest::default()
        },
        &create_test_attendant(),
    );
    assert!(matches!(result, Err(ApiError::SchedulingConflict { .. })));

    let moved: AppointmentInfo = update_appointment(
        &mut fixture.persistence,
        &clock(),
        second.appointment_id,
        &UpdateAppointmentRequest {
            scheduled_time: Some(String::from("11:30")),
            priority: Some(String::from("high")),
            ..UpdateAppointmentRequest::default()
        },
        &create_test_attendant(),
    )
    .unwrap();
    assert_eq!(moved.scheduled_time, "11:30:00");
    assert_eq!(moved.priority, "high");
}

#[test]
fn test_update_distinguishes_absent_from_null() {
    let mut fixture: Fixture = setup();
    let mut request: CreateAppointmentRequest = booking(&fixture, "09:00");
    request.notes = Some(String::from("Wax please"));
    request.internal_notes = Some(String::from("Regular"));
    let appointment: AppointmentInfo = attempt(&mut fixture, &request).unwrap();

    let updated: AppointmentInfo = update_appointment(
        &mut fixture.persistence,
        &clock(),
        appointment.appointment_id,
        &UpdateAppointmentRequest {
            notes: Some(None),
            ..UpdateAppointmentRequest::default()
        },
        &create_test_attendant(),
    )
    .unwrap();

    assert_eq!(updated.notes, None);
    assert_eq!(updated.internal_notes.as_deref(), Some("Regular"));
    assert_eq!(updated.scheduled_time, "09:00:00");
}

#[test]
fn test_availability_excludes_the_given_appointment() {
    let mut fixture: Fixture = setup();
    let appointment: AppointmentInfo = book(&mut fixture, "09:00");
    let mut request: AvailabilityRequest = AvailabilityRequest {
        scheduled_date: String::from("2025-06-10"),
        scheduled_time: String::from("09:00"),
        location: String::from("Bay 1"),
        exclude_appointment_id: None,
    };

    assert!(!check_availability(&mut fixture.persistence, &request).unwrap().available);

    request.exclude_appointment_id = Some(appointment.appointment_id);
    assert!(check_availability(&mut fixture.persistence, &request).unwrap().available);
}

#[test]
fn test_list_appointments_filters_by_status_and_search() {
    let mut fixture: Fixture = setup();
    let first: AppointmentInfo = book(&mut fixture, "09:00");
    book(&mut fixture, "08:00");
    confirm_appointment(
        &mut fixture.persistence,
        &clock(),
        first.appointment_id,
        &ConfirmAppointmentRequest::default(),
        &create_test_attendant(),
    )
    .unwrap();

    let all = list_appointments(&mut fixture.persistence, &ListQuery::default()).unwrap();
    let times: Vec<&str> = all
        .appointments
        .iter()
        .map(|a| a.scheduled_time.as_str())
        .collect();
    assert_eq!(times, vec!["08:00:00", "09:00:00"]);

    let confirmed = list_appointments(
        &mut fixture.persistence,
        &ListQuery {
            status: Some(String::from("confirmed")),
            ..ListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(confirmed.appointments.len(), 1);
    assert_eq!(confirmed.appointments[0].appointment_id, first.appointment_id);

    let by_name = list_appointments(
        &mut fixture.persistence,
        &ListQuery {
            search: Some(String::from("Souza")),
            ..ListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(by_name.appointments.len(), 2);

    let wildcard = list_appointments(
        &mut fixture.persistence,
        &ListQuery {
            search: Some(String::from("%")),
            ..ListQuery::default()
        },
    )
    .unwrap();
    assert!(wildcard.appointments.is_empty());

    let bad_status = list_appointments(
        &mut fixture.persistence,
        &ListQuery {
            status: Some(String::from("sleeping")),
            ..ListQuery::default()
        },
    );
    assert!(matches!(bad_status, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_missing_appointment_is_not_found() {
    let mut fixture: Fixture = setup();
    let result = get_appointment(&mut fixture.persistence, &clock(), 999);
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Appointment"
    ));
}
