// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers validate requests, check references, drive the lifecycle rules
//! in `washbay` and persist the outcome. Each handler works on one borrowed
//! `Persistence`; the caller serializes access.

mod appointments;
mod reference;
mod reports;
mod tickets;

pub use appointments::{
    cancel_appointment, check_availability, confirm_appointment, convert_to_ticket,
    create_appointment, get_appointment, list_appointments, mark_no_show, update_appointment,
};
pub use reference::{
    create_base, create_customer, create_equipment_type, create_material, create_vehicle,
    create_wash_type, create_worker, deactivate_customer, deactivate_vehicle, deactivate_worker,
    delete_base, delete_equipment_type, delete_material, delete_wash_type, get_base,
    get_customer, get_equipment_type, get_vehicle, get_vehicle_by_plate, get_wash_type,
    get_worker, list_bases, list_customers, list_equipment_types, list_materials, list_vehicles,
    list_wash_types, list_workers, update_base, update_customer, update_equipment_type,
    update_vehicle, update_wash_type, update_worker,
};
pub use reports::{appointment_stats, calendar, period_report, ticket_stats};
pub use tickets::{
    cancel_ticket, complete_ticket, create_ticket, get_ticket, list_tickets, update_ticket,
};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use rust_decimal::Decimal;
use time::Date;
use washbay_domain::{DirectoryEntry, Vehicle, parse_date, parse_optional_money};
use washbay_persistence::Persistence;

/// Parses an optional `YYYY-MM-DD` query bound.
fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)
}

/// Parses an optional money field.
fn parse_amount(field: &'static str, value: Option<&str>) -> Result<Option<Decimal>, ApiError> {
    parse_optional_money(field, value).map_err(translate_domain_error)
}

/// Foreign keys a booking or ticket may carry.
#[derive(Debug, Clone, Copy, Default)]
struct References {
    customer_id: Option<i64>,
    vehicle_id: Option<i64>,
    worker_id: Option<i64>,
    base_id: Option<i64>,
    wash_type_id: Option<i64>,
    equipment_type_id: Option<i64>,
}

/// Verifies every referenced record exists, and that customers, vehicles
/// and workers are active.
///
/// # Returns
///
/// The referenced vehicle, so callers can default the plate from it.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for a missing record and
/// `ApiError::InvalidInput` for an inactive one.
fn check_references(
    persistence: &mut Persistence,
    refs: References,
) -> Result<Option<Vehicle>, ApiError> {
    if let Some(customer_id) = refs.customer_id {
        let entry: DirectoryEntry = persistence
            .customer_entry(customer_id)
            .map_err(|e| translate_persistence_error(e, "Customer"))?;
        entry
            .require_active("customer")
            .map_err(translate_domain_error)?;
    }
    if let Some(worker_id) = refs.worker_id {
        let entry: DirectoryEntry = persistence
            .worker_entry(worker_id)
            .map_err(|e| translate_persistence_error(e, "Worker"))?;
        entry.require_active("worker").map_err(translate_domain_error)?;
    }
    if let Some(base_id) = refs.base_id {
        persistence
            .get_base(base_id)
            .map_err(|e| translate_persistence_error(e, "Base"))?;
    }
    if let Some(wash_type_id) = refs.wash_type_id {
        persistence
            .get_wash_type(wash_type_id)
            .map_err(|e| translate_persistence_error(e, "Wash type"))?;
    }
    if let Some(equipment_type_id) = refs.equipment_type_id {
        persistence
            .get_equipment_type(equipment_type_id)
            .map_err(|e| translate_persistence_error(e, "Equipment type"))?;
    }

    let Some(vehicle_id) = refs.vehicle_id else {
        return Ok(None);
    };
    let vehicle: Vehicle = persistence
        .get_vehicle(vehicle_id)
        .map_err(|e| translate_persistence_error(e, "Vehicle"))?;
    DirectoryEntry {
        id: vehicle.vehicle_id,
        display_name: vehicle.plate.clone(),
        active: vehicle.active,
    }
    .require_active("vehicle")
    .map_err(translate_domain_error)?;
    Ok(Some(vehicle))
}

/// Picks the plate from the request, falling back to the vehicle's.
fn resolve_plate(requested: Option<&str>, vehicle: Option<&Vehicle>) -> String {
    requested
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| vehicle.map(|v| v.plate.clone()))
        .unwrap_or_default()
}
