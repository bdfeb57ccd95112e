// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data queries: customers, vehicles, workers, bases, wash
//! types, equipment types and materials.

use diesel::SqliteConnection;
use diesel::prelude::*;
use washbay_domain::{
    Base, Customer, DirectoryEntry, EquipmentType, Material, Vehicle, WashType, Worker,
};

use crate::data_models::{
    BaseRow, CustomerRow, EquipmentTypeRow, MaterialRow, VehicleRow, WashTypeRow, WorkerRow,
};
use crate::diesel_schema::{
    bases, customers, equipment_types, materials, vehicles, wash_types, workers,
};
use crate::error::PersistenceError;

fn not_found(entity: &str, id: i64) -> PersistenceError {
    PersistenceError::NotFound(format!("{entity} {id}"))
}

// ============================================================================
// Customers
// ============================================================================

/// Retrieves a customer by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such customer exists.
pub fn get_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Customer, PersistenceError> {
    customers::table
        .filter(customers::customer_id.eq(customer_id))
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()?
        .map(Customer::from)
        .ok_or_else(|| not_found("Customer", customer_id))
}

/// Lists customers ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_customers(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<Vec<Customer>, PersistenceError> {
    let mut query = customers::table.select(CustomerRow::as_select()).into_boxed();
    if active_only {
        query = query.filter(customers::is_active.ne(0));
    }
    Ok(query
        .order((customers::name.asc(), customers::customer_id.asc()))
        .load::<CustomerRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_customers: {e}")))?
        .into_iter()
        .map(Customer::from)
        .collect())
}

// ============================================================================
// Vehicles
// ============================================================================

/// Retrieves a vehicle by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such vehicle exists.
pub fn get_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
) -> Result<Vehicle, PersistenceError> {
    vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .select(VehicleRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| not_found("Vehicle", vehicle_id))?
        .into_domain()
}

/// Retrieves a vehicle by its normalized plate.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no vehicle has the plate.
pub fn get_vehicle_by_plate(
    conn: &mut SqliteConnection,
    plate: &str,
) -> Result<Vehicle, PersistenceError> {
    vehicles::table
        .filter(vehicles::plate.eq(plate))
        .select(VehicleRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Vehicle with plate {plate}")))?
        .into_domain()
}

/// Lists vehicles ordered by plate, optionally for one customer.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_vehicles(
    conn: &mut SqliteConnection,
    customer_id: Option<i64>,
    active_only: bool,
) -> Result<Vec<Vehicle>, PersistenceError> {
    let mut query = vehicles::table.select(VehicleRow::as_select()).into_boxed();
    if let Some(customer_id) = customer_id {
        query = query.filter(vehicles::customer_id.eq(customer_id));
    }
    if active_only {
        query = query.filter(vehicles::is_active.ne(0));
    }
    query
        .order(vehicles::plate.asc())
        .load::<VehicleRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_vehicles: {e}")))?
        .into_iter()
        .map(VehicleRow::into_domain)
        .collect()
}

// ============================================================================
// Workers
// ============================================================================

/// Retrieves a worker by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such worker exists.
pub fn get_worker(conn: &mut SqliteConnection, worker_id: i64) -> Result<Worker, PersistenceError> {
    workers::table
        .filter(workers::worker_id.eq(worker_id))
        .select(WorkerRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| not_found("Worker", worker_id))?
        .into_domain()
}

/// Lists workers ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_workers(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<Vec<Worker>, PersistenceError> {
    let mut query = workers::table.select(WorkerRow::as_select()).into_boxed();
    if active_only {
        query = query.filter(workers::is_active.ne(0));
    }
    query
        .order((workers::name.asc(), workers::worker_id.asc()))
        .load::<WorkerRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_workers: {e}")))?
        .into_iter()
        .map(WorkerRow::into_domain)
        .collect()
}

// ============================================================================
// Directory lookups
// ============================================================================

/// Looks up a customer's display name and active flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such customer exists.
pub fn customer_entry(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<DirectoryEntry, PersistenceError> {
    let customer: Customer = get_customer(conn, customer_id)?;
    Ok(DirectoryEntry {
        id: customer.customer_id,
        display_name: customer.name,
        active: customer.active,
    })
}

/// Looks up a vehicle's display name (`PLATE - Make Model`) and active flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such vehicle exists.
pub fn vehicle_entry(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
) -> Result<DirectoryEntry, PersistenceError> {
    let vehicle: Vehicle = get_vehicle(conn, vehicle_id)?;
    Ok(DirectoryEntry {
        id: vehicle.vehicle_id,
        display_name: format!("{} - {} {}", vehicle.plate, vehicle.make, vehicle.model),
        active: vehicle.active,
    })
}

/// Looks up a worker's display name and active flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such worker exists.
pub fn worker_entry(
    conn: &mut SqliteConnection,
    worker_id: i64,
) -> Result<DirectoryEntry, PersistenceError> {
    let worker: Worker = get_worker(conn, worker_id)?;
    Ok(DirectoryEntry {
        id: worker.worker_id,
        display_name: worker.name,
        active: worker.active,
    })
}

// ============================================================================
// Service catalog
// ============================================================================

/// Retrieves a base by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such base exists.
pub fn get_base(conn: &mut SqliteConnection, base_id: i64) -> Result<Base, PersistenceError> {
    bases::table
        .filter(bases::base_id.eq(base_id))
        .select(BaseRow::as_select())
        .first(conn)
        .optional()?
        .map(Base::from)
        .ok_or_else(|| not_found("Base", base_id))
}

/// Lists bases ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_bases(conn: &mut SqliteConnection) -> Result<Vec<Base>, PersistenceError> {
    Ok(bases::table
        .order(bases::name.asc())
        .select(BaseRow::as_select())
        .load::<BaseRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bases: {e}")))?
        .into_iter()
        .map(Base::from)
        .collect())
}

/// Retrieves a wash type by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such wash type exists.
pub fn get_wash_type(
    conn: &mut SqliteConnection,
    wash_type_id: i64,
) -> Result<WashType, PersistenceError> {
    wash_types::table
        .filter(wash_types::wash_type_id.eq(wash_type_id))
        .select(WashTypeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| not_found("Wash type", wash_type_id))?
        .into_domain()
}

/// Lists wash types ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_wash_types(conn: &mut SqliteConnection) -> Result<Vec<WashType>, PersistenceError> {
    wash_types::table
        .order(wash_types::name.asc())
        .select(WashTypeRow::as_select())
        .load::<WashTypeRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_wash_types: {e}")))?
        .into_iter()
        .map(WashTypeRow::into_domain)
        .collect()
}

/// Retrieves an equipment type by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such equipment type exists.
pub fn get_equipment_type(
    conn: &mut SqliteConnection,
    equipment_type_id: i64,
) -> Result<EquipmentType, PersistenceError> {
    equipment_types::table
        .filter(equipment_types::equipment_type_id.eq(equipment_type_id))
        .select(EquipmentTypeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| not_found("Equipment type", equipment_type_id))?
        .into_domain()
}

/// Lists equipment types ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_equipment_types(
    conn: &mut SqliteConnection,
) -> Result<Vec<EquipmentType>, PersistenceError> {
    equipment_types::table
        .order(equipment_types::name.asc())
        .select(EquipmentTypeRow::as_select())
        .load::<EquipmentTypeRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_equipment_types: {e}")))?
        .into_iter()
        .map(EquipmentTypeRow::into_domain)
        .collect()
}

/// Retrieves a material by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such material exists.
pub fn get_material(
    conn: &mut SqliteConnection,
    material_id: i64,
) -> Result<Material, PersistenceError> {
    materials::table
        .filter(materials::material_id.eq(material_id))
        .select(MaterialRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| not_found("Material", material_id))?
        .into_domain()
}

/// Lists the materials of a wash type ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_materials(
    conn: &mut SqliteConnection,
    wash_type_id: i64,
) -> Result<Vec<Material>, PersistenceError> {
    materials::table
        .filter(materials::wash_type_id.eq(wash_type_id))
        .order(materials::name.asc())
        .select(MaterialRow::as_select())
        .load::<MaterialRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_materials: {e}")))?
        .into_iter()
        .map(MaterialRow::into_domain)
        .collect()
}
