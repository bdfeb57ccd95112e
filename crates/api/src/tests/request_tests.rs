// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for request decoding and error translation.

use washbay_domain::DomainError;
use washbay_persistence::PersistenceError;

use crate::{
    ApiError, CreateAppointmentRequest, UpdateAppointmentRequest, UpdateTicketRequest,
    translate_domain_error, translate_persistence_error,
};

#[test]
fn test_update_request_distinguishes_absent_and_null() {
    let request: UpdateAppointmentRequest = serde_json::from_str(
        r#"{"notes": null, "contact_phone": "(11) 5555-0000", "scheduled_time": "10:30"}"#,
    )
    .unwrap();

    assert_eq!(request.notes, Some(None));
    assert_eq!(
        request.contact_phone,
        Some(Some(String::from("(11) 5555-0000")))
    );
    assert_eq!(request.internal_notes, None);
    assert_eq!(request.worker_id, None);
    assert_eq!(request.scheduled_time.as_deref(), Some("10:30"));
}

#[test]
fn test_ticket_update_can_clear_price() {
    let request: UpdateTicketRequest =
        serde_json::from_str(r#"{"service_price": null, "worker_id": 4}"#).unwrap();

    assert_eq!(request.service_price, Some(None));
    assert_eq!(request.worker_id, Some(Some(4)));
    assert_eq!(request.discount, None);
    assert_eq!(request.notes, None);
}

#[test]
fn test_create_request_tolerates_missing_fields() {
    let request: CreateAppointmentRequest =
        serde_json::from_str(r#"{"customer_id": 7, "location": "Bay 1"}"#).unwrap();

    assert_eq!(request.customer_id, 7);
    assert!(request.scheduled_date.is_empty());
    assert_eq!(request.plate, None);
}

#[test]
fn test_error_kinds() {
    let conflict: ApiError = translate_persistence_error(
        PersistenceError::Duplicate(String::from("code APT000001")),
        "Appointment",
    );
    assert_eq!(conflict.kind(), "conflict");

    let missing: ApiError = translate_persistence_error(
        PersistenceError::NotFound(String::from("Ticket 3")),
        "Ticket",
    );
    assert_eq!(missing.kind(), "not_found");

    let internal: ApiError = translate_persistence_error(
        PersistenceError::QueryFailed(String::from("disk I/O error")),
        "Ticket",
    );
    assert_eq!(internal.kind(), "internal");

    let missing_field: ApiError =
        translate_domain_error(DomainError::MissingRequiredField("location"));
    assert_eq!(missing_field.kind(), "validation_error");
    assert!(matches!(
        missing_field,
        ApiError::InvalidInput { field, .. } if field == "location"
    ));
}
