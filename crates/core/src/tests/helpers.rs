// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AppointmentDraft, TicketDraft};
use rust_decimal::Decimal;
use time::PrimitiveDateTime;
use time::macros::{date, datetime, time};
use washbay_domain::{
    Appointment, AppointmentStatus, DEFAULT_ESTIMATED_PRICE, Priority, Ticket, TicketStatus,
};

pub const ACTOR: &str = "attendant-1";

/// Monday morning, before the 14:00 test slot.
pub const fn test_now() -> PrimitiveDateTime {
    datetime!(2025-06-10 09:00)
}

pub fn money(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub fn create_test_appointment(status: AppointmentStatus) -> Appointment {
    Appointment {
        appointment_id: 42,
        code: String::from("APT0000AB"),
        customer_id: 7,
        vehicle_id: Some(3),
        plate: String::from("ABC1D23"),
        base_id: Some(1),
        location: String::from("Bay 1"),
        wash_type_id: Some(2),
        equipment_type_id: None,
        worker_id: Some(5),
        scheduled_date: date!(2025 - 06 - 10),
        scheduled_time: time!(14:00),
        estimated_duration_minutes: 30,
        priority: Priority::Normal,
        status,
        estimated_price: DEFAULT_ESTIMATED_PRICE,
        discount: money("5.00"),
        contact_phone: None,
        contact_email: None,
        notes: Some(String::from("Customer asked for extra wax")),
        internal_notes: None,
        confirmed_at: None,
        confirmed_by: None,
        cancelled_at: None,
        cancellation_reason: None,
        ticket_id: None,
        created_at: datetime!(2025-06-01 08:00),
        updated_at: datetime!(2025-06-01 08:00),
    }
}

pub fn create_test_ticket(status: TicketStatus) -> Ticket {
    Ticket {
        ticket_id: 11,
        code: String::from("WSH0000CD"),
        customer_id: Some(7),
        vehicle_id: Some(3),
        plate: String::from("ABC1D23"),
        base_id: Some(1),
        location: Some(String::from("Bay 1")),
        wash_type_id: Some(2),
        equipment_type_id: None,
        worker_id: Some(5),
        started_at: datetime!(2025-06-10 14:00),
        ended_at: None,
        service_date: date!(2025 - 06 - 10),
        status,
        service_price: Some(money("100.00")),
        discount: money("15.00"),
        final_price: Some(money("85.00")),
        notes: None,
        payment_note: None,
        contract: None,
        created_at: datetime!(2025-06-10 14:00),
        updated_at: datetime!(2025-06-10 14:00),
    }
}

pub fn create_test_draft() -> AppointmentDraft {
    AppointmentDraft {
        customer_id: 7,
        vehicle_id: None,
        plate: String::from(" abc1d23 "),
        base_id: None,
        location: String::from("Bay 1"),
        wash_type_id: None,
        equipment_type_id: None,
        worker_id: None,
        scheduled_date: date!(2025 - 06 - 10),
        scheduled_time: time!(14:00),
        estimated_duration_minutes: None,
        priority: None,
        estimated_price: None,
        discount: None,
        contact_phone: None,
        contact_email: None,
        notes: None,
        internal_notes: None,
    }
}

pub fn create_test_ticket_draft() -> TicketDraft {
    TicketDraft {
        customer_id: None,
        vehicle_id: None,
        plate: String::from("xyz9876"),
        base_id: None,
        location: None,
        wash_type_id: None,
        equipment_type_id: None,
        worker_id: None,
        started_at: None,
        ended_at: None,
        service_date: None,
        service_price: Some(money("100.00")),
        discount: Some(money("15.00")),
        notes: None,
        payment_note: None,
        contract: None,
    }
}
