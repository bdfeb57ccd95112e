// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod appointment_store_tests;
mod database_tests;

use crate::Persistence;
use rust_decimal::Decimal;
use time::macros::{date, datetime};
use time::{Date, PrimitiveDateTime, Time};
use washbay_domain::{
    Appointment, Customer, CustomerFields, DEFAULT_ESTIMATED_PRICE, NewAppointment, NewTicket,
    Priority,
};

pub const ACTOR: &str = "attendant-1";

/// Monday morning, before the 14:00 test slot.
pub const fn test_now() -> PrimitiveDateTime {
    datetime!(2025-06-10 09:00)
}

pub const fn test_date() -> Date {
    date!(2025 - 06 - 10)
}

pub fn money(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub fn create_test_db() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_customer(db: &mut Persistence, name: &str) -> Customer {
    let fields = CustomerFields::new(name, Some("(11) 98765-4321"), None, None).unwrap();
    db.create_customer(&fields).unwrap()
}

pub fn create_test_new_appointment(customer_id: i64, time: Time, location: &str) -> NewAppointment {
    NewAppointment {
        customer_id,
        vehicle_id: None,
        plate: String::from("ABC1D23"),
        base_id: None,
        location: location.to_string(),
        wash_type_id: None,
        equipment_type_id: None,
        worker_id: None,
        scheduled_date: test_date(),
        scheduled_time: time,
        estimated_duration_minutes: 30,
        priority: Priority::Normal,
        estimated_price: DEFAULT_ESTIMATED_PRICE,
        discount: money("5.00"),
        contact_phone: None,
        contact_email: None,
        notes: Some(String::from("Customer asked for extra wax")),
        internal_notes: None,
    }
}

pub fn book(db: &mut Persistence, customer_id: i64, time: Time, code: &str) -> Appointment {
    db.create_appointment(
        &create_test_new_appointment(customer_id, time, "Bay 1"),
        code,
        ACTOR,
        test_now(),
    )
    .unwrap()
}

pub fn create_test_new_ticket(plate: &str) -> NewTicket {
    NewTicket {
        customer_id: None,
        vehicle_id: None,
        plate: plate.to_string(),
        base_id: None,
        location: None,
        wash_type_id: None,
        equipment_type_id: None,
        worker_id: None,
        started_at: test_now(),
        ended_at: None,
        service_date: test_date(),
        service_price: Some(money("100.00")),
        discount: money("15.00"),
        notes: None,
        payment_note: None,
        contract: None,
    }
}
