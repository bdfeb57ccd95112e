// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_appointment, create_test_draft, create_test_ticket, create_test_ticket_draft,
    money, test_now,
};
use crate::{
    CoreError, prepare_appointment, prepare_appointment_update, prepare_ticket,
    prepare_ticket_update,
};
use time::macros::{date, datetime, time};
use washbay_domain::{
    AppointmentChanges, AppointmentStatus, DEFAULT_DURATION_MINUTES, DEFAULT_ESTIMATED_PRICE,
    DomainError, Priority, TicketChanges, TicketStatus,
};

#[test]
fn test_prepare_appointment_applies_defaults() {
    let appointment = prepare_appointment(create_test_draft(), test_now()).unwrap();

    assert_eq!(appointment.plate, "ABC1D23");
    assert_eq!(
        appointment.estimated_duration_minutes,
        DEFAULT_DURATION_MINUTES
    );
    assert_eq!(appointment.estimated_price, DEFAULT_ESTIMATED_PRICE);
    assert_eq!(appointment.discount, money("0"));
    assert_eq!(appointment.priority, Priority::Normal);
}

#[test]
fn test_prepare_appointment_rejects_past_slot() {
    let mut draft = create_test_draft();
    draft.scheduled_date = date!(2025 - 06 - 09);

    let result = prepare_appointment(draft, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ScheduledInPast { .. }
        ))
    ));
}

#[test]
fn test_prepare_appointment_rejects_out_of_hours() {
    for slot in [time!(5:59), time!(18:00)] {
        let mut draft = create_test_draft();
        draft.scheduled_time = slot;
        let result = prepare_appointment(draft, datetime!(2025-06-10 05:00));
        assert!(
            matches!(
                result,
                Err(CoreError::DomainViolation(
                    DomainError::OutsideBusinessHours { .. }
                ))
            ),
            "{slot} should be rejected"
        );
    }
}

#[test]
fn test_prepare_appointment_requires_location_and_duration() {
    let mut draft = create_test_draft();
    draft.location = String::from("   ");
    assert_eq!(
        prepare_appointment(draft, test_now()),
        Err(CoreError::DomainViolation(
            DomainError::MissingRequiredField("location")
        ))
    );

    let mut draft = create_test_draft();
    draft.estimated_duration_minutes = Some(0);
    assert_eq!(
        prepare_appointment(draft, test_now()),
        Err(CoreError::DomainViolation(DomainError::InvalidDuration(0)))
    );

    let mut draft = create_test_draft();
    draft.estimated_duration_minutes = Some(3_000_000_000);
    assert_eq!(
        prepare_appointment(draft, test_now()),
        Err(CoreError::DomainViolation(DomainError::InvalidDuration(
            3_000_000_000
        )))
    );
}

#[test]
fn test_slot_ending_past_last_date_is_rejected() {
    let mut draft = create_test_draft();
    draft.scheduled_date = date!(9999 - 12 - 31);
    draft.scheduled_time = time!(17:00);
    draft.estimated_duration_minutes = Some(600);
    assert_eq!(
        prepare_appointment(draft, test_now()),
        Err(CoreError::DomainViolation(DomainError::ScheduleOverflow {
            date: date!(9999 - 12 - 31),
            time: time!(17:00),
            minutes: 600,
        }))
    );

    let appointment = create_test_appointment(AppointmentStatus::Scheduled);
    let changes = AppointmentChanges {
        scheduled_date: Some(date!(9999 - 12 - 31)),
        scheduled_time: Some(time!(17:00)),
        estimated_duration_minutes: Some(600),
        ..AppointmentChanges::default()
    };
    assert!(matches!(
        prepare_appointment_update(&appointment, changes, test_now()),
        Err(CoreError::DomainViolation(
            DomainError::ScheduleOverflow { .. }
        ))
    ));
}

#[test]
fn test_update_reschedule_is_revalidated() {
    let appointment = create_test_appointment(AppointmentStatus::Scheduled);

    let changes = AppointmentChanges {
        scheduled_time: Some(time!(19:00)),
        ..AppointmentChanges::default()
    };
    assert!(prepare_appointment_update(&appointment, changes, test_now()).is_err());

    let changes = AppointmentChanges {
        scheduled_time: Some(time!(16:30)),
        notes: Some(None),
        ..AppointmentChanges::default()
    };
    let updated = prepare_appointment_update(&appointment, changes, test_now()).unwrap();
    assert_eq!(updated.scheduled_time, time!(16:30));
    assert_eq!(updated.notes, None);
    assert_eq!(updated.updated_at, test_now());
}

#[test]
fn test_update_of_terminal_appointment_is_illegal() {
    let appointment = create_test_appointment(AppointmentStatus::Concluded);

    let result =
        prepare_appointment_update(&appointment, AppointmentChanges::default(), test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::IllegalTransition { .. }
        ))
    ));
}

#[test]
fn test_prepare_ticket_defaults_to_now() {
    let ticket = prepare_ticket(create_test_ticket_draft(), test_now()).unwrap();

    assert_eq!(ticket.plate, "XYZ9876");
    assert_eq!(ticket.started_at, test_now());
    assert_eq!(ticket.service_date, date!(2025 - 06 - 10));
    assert_eq!(ticket.final_price(), Some(money("85.00")));
}

#[test]
fn test_prepare_ticket_rejects_end_before_start() {
    let mut draft = create_test_ticket_draft();
    draft.ended_at = Some(datetime!(2025-06-10 08:00));

    let result = prepare_ticket(draft, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTimeRange { .. }
        ))
    ));
}

#[test]
fn test_ticket_update_recomputes_final_price() {
    let ticket = create_test_ticket(TicketStatus::Concluded);

    let changes = TicketChanges {
        service_price: Some(Some(money("120.00"))),
        discount: Some(money("20.00")),
        payment_note: Some(Some(String::from("pix"))),
        ..TicketChanges::default()
    };
    let updated = prepare_ticket_update(&ticket, changes, test_now()).unwrap();

    assert_eq!(updated.final_price, Some(money("100.00")));
    assert_eq!(updated.payment_note.as_deref(), Some("pix"));
}

#[test]
fn test_ticket_update_rejects_negative_discount() {
    let ticket = create_test_ticket(TicketStatus::InProgress);

    let changes = TicketChanges {
        discount: Some(money("-1.00")),
        ..TicketChanges::default()
    };

    assert!(prepare_ticket_update(&ticket, changes, test_now()).is_err());
}
