// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    ACTOR, book, create_test_customer, create_test_db, create_test_new_appointment, money,
    test_date, test_now,
};
use crate::data_models::NewAppointmentRow;
use crate::{AppointmentFilter, PersistenceError, mutations};
use time::macros::{date, datetime, time};
use washbay::{AppointmentCommand, apply_appointment_command};
use washbay_domain::{AppointmentStatus, Slot, TicketStatus};

#[test]
fn test_create_appointment_starts_scheduled_with_history() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");

    let appointment = book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.code, "APT000001");
    assert_eq!(appointment.scheduled_time, time!(14:00));
    assert_eq!(appointment.discount, money("5.00"));
    assert_eq!(appointment.created_at, test_now());

    let history = db.get_status_history(appointment.appointment_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_status, None);
    assert_eq!(history[0].to_status, AppointmentStatus::Scheduled);
    assert_eq!(history[0].changed_by, ACTOR);
}

#[test]
fn test_second_booking_of_confirmed_slot_is_rejected() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    let first = book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    let confirmed = apply_appointment_command(
        &first,
        AppointmentCommand::Confirm { confirmed_by: None },
        ACTOR,
        test_now(),
    )
    .unwrap();
    db.persist_appointment_transition(&confirmed, None).unwrap();

    let result = db.create_appointment(
        &create_test_new_appointment(customer.customer_id, time!(14:00), "Bay 1"),
        "APT000002",
        ACTOR,
        test_now(),
    );

    assert_eq!(
        result,
        Err(PersistenceError::SlotUnavailable(Slot::new(
            test_date(),
            time!(14:00),
            "Bay 1"
        )))
    );
}

#[test]
fn test_same_time_other_location_is_available() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    let other = db
        .create_appointment(
            &create_test_new_appointment(customer.customer_id, time!(14:00), "Bay 2"),
            "APT000002",
            ACTOR,
            test_now(),
        )
        .unwrap();
    assert_eq!(other.location, "Bay 2");
}

#[test]
fn test_canceled_appointment_frees_its_slot() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    let first = book(&mut db, customer.customer_id, time!(14:00), "APT000001");
    let slot = first.slot();

    assert!(!db.is_slot_available(&slot, None).unwrap());
    assert!(db.is_slot_available(&slot, Some(first.appointment_id)).unwrap());

    let canceled = apply_appointment_command(
        &first,
        AppointmentCommand::Cancel {
            reason: Some(String::from("Customer called")),
        },
        ACTOR,
        test_now(),
    )
    .unwrap();
    let outcome = db.persist_appointment_transition(&canceled, None).unwrap();
    assert_eq!(outcome.appointment.status, AppointmentStatus::Canceled);
    assert_eq!(
        outcome.appointment.cancellation_reason.as_deref(),
        Some("Customer called")
    );

    assert!(db.is_slot_available(&slot, None).unwrap());
    book(&mut db, customer.customer_id, time!(14:00), "APT000002");
}

#[test]
fn test_duplicate_code_is_reported() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    let result = db.create_appointment(
        &create_test_new_appointment(customer.customer_id, time!(15:00), "Bay 1"),
        "APT000001",
        ACTOR,
        test_now(),
    );
    assert!(matches!(result, Err(PersistenceError::Duplicate(_))));
}

#[test]
fn test_reschedule_into_taken_slot_is_rejected() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    book(&mut db, customer.customer_id, time!(14:00), "APT000001");
    let second = book(&mut db, customer.customer_id, time!(15:00), "APT000002");

    let mut moved = second.clone();
    moved.scheduled_time = time!(14:00);
    let result = db.save_appointment(&moved);
    assert!(matches!(result, Err(PersistenceError::SlotUnavailable(_))));

    let stored = db.get_appointment(second.appointment_id).unwrap();
    assert_eq!(stored.scheduled_time, time!(15:00));
}

#[test]
fn test_save_appointment_keeps_own_slot() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    let appointment = book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    let mut edited = appointment.clone();
    edited.internal_notes = Some(String::from("Bring the foam cannon"));
    edited.updated_at = datetime!(2025-06-10 09:30);
    let saved = db.save_appointment(&edited).unwrap();

    assert_eq!(
        saved.internal_notes.as_deref(),
        Some("Bring the foam cannon")
    );
    assert_eq!(saved.updated_at, datetime!(2025-06-10 09:30));
}

#[test]
fn test_conversion_creates_and_links_ticket() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    let appointment = book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    let transition = apply_appointment_command(
        &appointment,
        AppointmentCommand::ConvertToTicket {
            extra_notes: Some(String::from("Key left at the desk")),
        },
        ACTOR,
        test_now(),
    )
    .unwrap();
    let outcome = db
        .persist_appointment_transition(&transition, Some("WSH000001"))
        .unwrap();

    let ticket = outcome.ticket.unwrap();
    assert_eq!(ticket.code, "WSH000001");
    assert_eq!(ticket.status, TicketStatus::InProgress);
    assert_eq!(ticket.service_price, Some(money("25.00")));
    assert_eq!(ticket.final_price, Some(money("20.00")));
    assert_eq!(
        ticket.notes.as_deref(),
        Some("Created from appointment APT000001. Customer asked for extra wax\nKey left at the desk")
    );
    assert_eq!(outcome.appointment.status, AppointmentStatus::InProgress);
    assert_eq!(outcome.appointment.ticket_id, Some(ticket.ticket_id));

    let linked = db.find_appointment_by_ticket(ticket.ticket_id).unwrap();
    assert_eq!(linked.map(|a| a.appointment_id), Some(appointment.appointment_id));

    let history = db.get_status_history(appointment.appointment_id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].to_status, AppointmentStatus::InProgress);
}

#[test]
fn test_conversion_without_ticket_code_writes_nothing() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    let appointment = book(&mut db, customer.customer_id, time!(14:00), "APT000001");

    let transition = apply_appointment_command(
        &appointment,
        AppointmentCommand::ConvertToTicket { extra_notes: None },
        ACTOR,
        test_now(),
    )
    .unwrap();
    assert!(db.persist_appointment_transition(&transition, None).is_err());

    let stored = db.get_appointment(appointment.appointment_id).unwrap();
    assert_eq!(stored.status, AppointmentStatus::Scheduled);
    assert_eq!(db.get_status_history(appointment.appointment_id).unwrap().len(), 1);
}

#[test]
fn test_list_appointments_filters_and_orders() {
    let mut db = create_test_db();
    let ana = create_test_customer(&mut db, "Ana Souza");
    let bruno = create_test_customer(&mut db, "Bruno Lima");

    book(&mut db, bruno.customer_id, time!(16:00), "APT000003");
    book(&mut db, ana.customer_id, time!(10:00), "APT000001");
    let mut other_day = create_test_new_appointment(ana.customer_id, time!(8:00), "Bay 1");
    other_day.scheduled_date = date!(2025 - 06 - 12);
    other_day.plate = String::from("XYZ9876");
    db.create_appointment(&other_day, "APT000002", ACTOR, test_now())
        .unwrap();

    let all = db.list_appointments(&AppointmentFilter::default()).unwrap();
    let codes: Vec<&str> = all.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["APT000001", "APT000003", "APT000002"]);

    let on_day = db
        .list_appointments(&AppointmentFilter {
            date_from: Some(test_date()),
            date_to: Some(test_date()),
            ..AppointmentFilter::default()
        })
        .unwrap();
    assert_eq!(on_day.len(), 2);

    let by_name = db
        .list_appointments(&AppointmentFilter {
            search: Some(String::from("bruno")),
            ..AppointmentFilter::default()
        })
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].code, "APT000003");

    let by_plate = db
        .list_appointments(&AppointmentFilter {
            search: Some(String::from("xyz98")),
            ..AppointmentFilter::default()
        })
        .unwrap();
    assert_eq!(by_plate.len(), 1);

    let scheduled = db
        .list_appointments(&AppointmentFilter {
            status: Some(AppointmentStatus::Confirmed),
            ..AppointmentFilter::default()
        })
        .unwrap();
    assert!(scheduled.is_empty());
}

#[test]
fn test_calendar_entries_carry_customer_name() {
    let mut db = create_test_db();
    let ana = create_test_customer(&mut db, "Ana Souza");
    book(&mut db, ana.customer_id, time!(10:00), "APT000001");

    let entries = db
        .list_calendar_entries(date!(2025 - 06 - 01), date!(2025 - 06 - 30))
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1.as_deref(), Some("Ana Souza"));

    let july = db
        .list_calendar_entries(date!(2025 - 07 - 01), date!(2025 - 07 - 31))
        .unwrap();
    assert!(july.is_empty());
}

#[test]
fn test_missing_appointment_is_not_found() {
    let mut db = create_test_db();
    assert_eq!(
        db.get_appointment(999),
        Err(PersistenceError::NotFound(String::from("Appointment 999")))
    );
}

#[test]
fn test_active_slot_index_rejects_unchecked_duplicate() {
    let mut db = create_test_db();
    let customer = create_test_customer(&mut db, "Ana Souza");
    let new_appointment = create_test_new_appointment(customer.customer_id, time!(14:00), "Bay 1");
    let slot = Slot::new(test_date(), time!(14:00), "Bay 1");

    let first = NewAppointmentRow::from_domain(&new_appointment, "APT000001", test_now()).unwrap();
    assert!(mutations::appointments::insert_appointment(&mut db.conn, &first, &slot).is_ok());

    let second =
        NewAppointmentRow::from_domain(&new_appointment, "APT000002", test_now()).unwrap();
    assert_eq!(
        mutations::appointments::insert_appointment(&mut db.conn, &second, &slot),
        Err(PersistenceError::SlotUnavailable(slot.clone()))
    );

    let mut canceled =
        NewAppointmentRow::from_domain(&new_appointment, "APT000003", test_now()).unwrap();
    canceled.status = AppointmentStatus::Canceled.as_str().to_string();
    assert!(mutations::appointments::insert_appointment(&mut db.conn, &canceled, &slot).is_ok());
}
