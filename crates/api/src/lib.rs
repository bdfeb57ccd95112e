// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Washbay car wash system.
//!
//! Handlers take request DTOs, authenticate the acting user, enforce the
//! appointment and ticket lifecycles through `washbay`, and persist the
//! outcome. Transport concerns (HTTP status codes, routing) live in the
//! server crate.
//!
//! ## Roles
//!
//! - Managers may write reference data (customers, vehicles, workers and
//!   the service catalog).
//! - Attendants run the front desk: bookings, conversions and tickets.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    appointment_stats, calendar, cancel_appointment, cancel_ticket, check_availability,
    complete_ticket, confirm_appointment, convert_to_ticket, create_appointment, create_base,
    create_customer, create_equipment_type, create_material, create_ticket, create_vehicle,
    create_wash_type, create_worker, deactivate_customer, deactivate_vehicle, deactivate_worker,
    delete_base, delete_equipment_type, delete_material, delete_wash_type, get_appointment,
    get_base, get_customer, get_equipment_type, get_ticket, get_vehicle, get_vehicle_by_plate,
    get_wash_type, get_worker, list_appointments, list_bases, list_customers,
    list_equipment_types, list_materials, list_tickets, list_vehicles, list_wash_types,
    list_workers, mark_no_show, period_report, ticket_stats, update_appointment, update_base,
    update_customer, update_equipment_type, update_ticket, update_vehicle, update_wash_type,
    update_worker,
};
pub use request_response::{
    ActiveQuery, AppointmentDetailResponse, AppointmentInfo, AppointmentStatsResponse,
    AvailabilityRequest, AvailabilityResponse, BaseInfo, BaseRequest, CalendarEventInfo,
    CalendarQuery, CalendarResponse, CancelRequest, ConfirmAppointmentRequest,
    ConvertToTicketRequest, ConvertToTicketResponse, CreateAppointmentRequest,
    CreateTicketRequest, CustomerInfo, CustomerRequest, DailyRevenueInfo, DeleteResponse,
    EquipmentTypeInfo, EquipmentTypeRequest, ListAppointmentsResponse, ListQuery,
    ListTicketsResponse, MaterialInfo, MaterialRequest, PeriodQuery, PeriodReportResponse,
    StatusChangeInfo, StatusCount, TicketDetailResponse, TicketInfo, TicketStatsResponse,
    TicketSummary, UpdateAppointmentRequest, UpdateTicketRequest, VehicleInfo, VehicleQuery,
    VehicleRequest, WashTypeInfo, WashTypeRequest, WorkerInfo, WorkerRequest,
};
