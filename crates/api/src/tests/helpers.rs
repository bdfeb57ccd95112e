// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::macros::datetime;
use washbay::{FixedClock, SequentialCodeGenerator};
use washbay_persistence::Persistence;

use crate::{
    AppointmentInfo, AuthenticatedActor, CreateAppointmentRequest, CustomerRequest, Role,
    VehicleRequest, create_appointment, create_customer, create_vehicle,
};

/// Monday 2025-06-09, mid-morning.
pub const fn clock() -> FixedClock {
    FixedClock::new(datetime!(2025-06-09 10:00))
}

/// A clock after every fixture appointment has started.
pub const fn later_clock() -> FixedClock {
    FixedClock::new(datetime!(2025-06-20 09:00))
}

pub fn create_test_manager() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("manager-1"), Role::Manager)
}

pub fn create_test_attendant() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("attendant-1"), Role::Attendant)
}

/// Everything a front desk test needs.
pub struct Fixture {
    pub persistence: Persistence,
    pub codes: SequentialCodeGenerator,
    pub customer_id: i64,
    pub vehicle_id: i64,
}

/// Opens an in-memory store with one customer and their vehicle.
pub fn setup() -> Fixture {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let manager: AuthenticatedActor = create_test_manager();

    let customer = create_customer(
        &mut persistence,
        &CustomerRequest {
            name: String::from("Maria Souza"),
            phone: Some(String::from("(11) 98765-4321")),
            email: Some(String::from("maria@example.com")),
            notes: None,
        },
        &manager,
    )
    .expect("Failed to create customer");

    let vehicle = create_vehicle(
        &mut persistence,
        &VehicleRequest {
            customer_id: customer.customer_id,
            plate: String::from("abc1d23"),
            model: String::from("Civic"),
            make: String::from("Honda"),
            year: Some(2020),
            color: Some(String::from("Silver")),
            kind: None,
            notes: None,
        },
        &manager,
    )
    .expect("Failed to create vehicle");

    Fixture {
        persistence,
        codes: SequentialCodeGenerator::new(),
        customer_id: customer.customer_id,
        vehicle_id: vehicle.vehicle_id,
    }
}

/// A booking for the fixture vehicle on 2025-06-10 at `time` in Bay 1.
pub fn booking(fixture: &Fixture, time: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        customer_id: fixture.customer_id,
        vehicle_id: Some(fixture.vehicle_id),
        location: String::from("Bay 1"),
        scheduled_date: String::from("2025-06-10"),
        scheduled_time: String::from(time),
        ..CreateAppointmentRequest::default()
    }
}

/// Books the fixture vehicle and returns the stored appointment.
pub fn book(fixture: &mut Fixture, time: &str) -> AppointmentInfo {
    let request: CreateAppointmentRequest = booking(fixture, time);
    create_appointment(
        &mut fixture.persistence,
        &clock(),
        &fixture.codes,
        &request,
        &create_test_attendant(),
    )
    .expect("Failed to book appointment")
}
