// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use time::macros::{date, time};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::MissingRequiredField("location");
    assert_eq!(format!("{err}"), "Field 'location' is required");

    let err: DomainError = DomainError::InvalidPlate(String::from("Plate cannot be empty"));
    assert_eq!(format!("{err}"), "Invalid plate: Plate cannot be empty");

    let err: DomainError = DomainError::InvalidDuration(0);
    assert_eq!(
        format!("{err}"),
        "Invalid estimated duration: 0. Must be between 1 and 1440"
    );

    let err: DomainError = DomainError::InvalidStatus {
        status: String::from("agendado"),
    };
    assert_eq!(format!("{err}"), "Invalid status: 'agendado'");

    let err: DomainError = DomainError::InactiveReference {
        entity: "worker",
        id: 3,
    };
    assert_eq!(format!("{err}"), "The worker 3 is inactive");

    let err: DomainError = DomainError::IllegalTransition {
        from: String::from("canceled"),
        to: String::from("confirmed"),
        reason: String::from("cannot transition from terminal state"),
    };
    assert_eq!(
        format!("{err}"),
        "Cannot change status from 'canceled' to 'confirmed': cannot transition from terminal state"
    );

    let err: DomainError = DomainError::ConversionNotAllowed {
        code: String::from("APT00000A"),
        reason: String::from("the scheduled time has passed"),
    };
    assert_eq!(
        format!("{err}"),
        "Appointment APT00000A cannot be converted into a wash ticket: the scheduled time has passed"
    );
}

#[test]
fn test_slot_errors_name_the_slot() {
    let err: DomainError = DomainError::SlotUnavailable {
        date: date!(2025 - 06 - 10),
        time: time!(14:00),
        location: String::from("Bay 1"),
    };
    let message: String = err.to_string();
    assert!(message.contains("Bay 1"));
    assert!(message.contains("2025-06-10"));

    let err: DomainError = DomainError::OutsideBusinessHours { time: time!(18:00) };
    assert!(err.to_string().contains("between 06:00 and 18:00"));
}
