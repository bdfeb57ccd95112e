// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data mutations.
//!
//! Customers, vehicles and workers are deactivated, never deleted, because
//! appointments and tickets keep pointing at them. Catalog rows are deleted;
//! the foreign keys refuse a delete while a ticket or appointment still
//! references the row, and materials go with their wash type.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::backend::sqlite::last_insert_id;
use crate::data_models::{CustomerValues, VehicleValues, WorkerValues, encode_flag, encode_money};
use crate::diesel_schema::{
    bases, customers, equipment_types, materials, vehicles, wash_types, workers,
};
use crate::error::PersistenceError;
use crate::mutations::require_affected;

// ============================================================================
// Customers, vehicles, workers
// ============================================================================

/// Inserts a customer and returns its id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_customer(
    conn: &mut SqliteConnection,
    values: &CustomerValues,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(customers::table)
        .values(values)
        .execute(conn)?;
    last_insert_id(conn)
}

/// Replaces a customer's editable fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the customer does not exist.
pub fn update_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
    values: &CustomerValues,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(customers::table.filter(customers::customer_id.eq(customer_id)))
            .set(values)
            .execute(conn)?;
    require_affected(affected, "Customer", customer_id)
}

/// Sets a customer's active flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the customer does not exist.
pub fn set_customer_active(
    conn: &mut SqliteConnection,
    customer_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(customers::table.filter(customers::customer_id.eq(customer_id)))
            .set(customers::is_active.eq(encode_flag(active)))
            .execute(conn)?;
    require_affected(affected, "Customer", customer_id)
}

/// Inserts a vehicle and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the plate is taken, or
/// `ReferenceViolation` if the owner does not exist.
pub fn insert_vehicle(
    conn: &mut SqliteConnection,
    values: &VehicleValues,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(vehicles::table)
        .values(values)
        .execute(conn)?;
    last_insert_id(conn)
}

/// Replaces a vehicle's editable fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the vehicle does not exist, or
/// `Duplicate` if the new plate is taken.
pub fn update_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
    values: &VehicleValues,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(vehicles::table.filter(vehicles::vehicle_id.eq(vehicle_id)))
            .set(values)
            .execute(conn)?;
    require_affected(affected, "Vehicle", vehicle_id)
}

/// Sets a vehicle's active flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the vehicle does not exist.
pub fn set_vehicle_active(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(vehicles::table.filter(vehicles::vehicle_id.eq(vehicle_id)))
            .set(vehicles::is_active.eq(encode_flag(active)))
            .execute(conn)?;
    require_affected(affected, "Vehicle", vehicle_id)
}

/// Inserts a worker and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the tax id is taken.
pub fn insert_worker(
    conn: &mut SqliteConnection,
    values: &WorkerValues,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(workers::table)
        .values(values)
        .execute(conn)?;
    last_insert_id(conn)
}

/// Replaces a worker's editable fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the worker does not exist, or
/// `Duplicate` if the new tax id is taken.
pub fn update_worker(
    conn: &mut SqliteConnection,
    worker_id: i64,
    values: &WorkerValues,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(workers::table.filter(workers::worker_id.eq(worker_id)))
        .set(values)
        .execute(conn)?;
    require_affected(affected, "Worker", worker_id)
}

/// Sets a worker's active flag.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the worker does not exist.
pub fn set_worker_active(
    conn: &mut SqliteConnection,
    worker_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(workers::table.filter(workers::worker_id.eq(worker_id)))
        .set(workers::is_active.eq(encode_flag(active)))
        .execute(conn)?;
    require_affected(affected, "Worker", worker_id)
}

// ============================================================================
// Service catalog
// ============================================================================

/// Inserts a base and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the name is taken.
pub fn insert_base(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(bases::table)
        .values(bases::name.eq(name))
        .execute(conn)?;
    last_insert_id(conn)
}

/// Renames a base.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the base does not exist.
pub fn rename_base(
    conn: &mut SqliteConnection,
    base_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(bases::table.filter(bases::base_id.eq(base_id)))
        .set(bases::name.eq(name))
        .execute(conn)?;
    require_affected(affected, "Base", base_id)
}

/// Deletes a base.
///
/// # Errors
///
/// Returns `PersistenceError::ReferenceViolation` if a ticket or
/// appointment still uses it.
pub fn delete_base(conn: &mut SqliteConnection, base_id: i64) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::delete(bases::table.filter(bases::base_id.eq(base_id))).execute(conn)?;
    require_affected(affected, "Base", base_id)
}

/// Inserts a wash type and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the name is taken.
pub fn insert_wash_type(
    conn: &mut SqliteConnection,
    name: &str,
    base_price: Decimal,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(wash_types::table)
        .values((
            wash_types::name.eq(name),
            wash_types::base_price.eq(encode_money(base_price)),
        ))
        .execute(conn)?;
    last_insert_id(conn)
}

/// Replaces a wash type's name and base price.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the wash type does not exist.
pub fn update_wash_type(
    conn: &mut SqliteConnection,
    wash_type_id: i64,
    name: &str,
    base_price: Decimal,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(wash_types::table.filter(wash_types::wash_type_id.eq(wash_type_id)))
            .set((
                wash_types::name.eq(name),
                wash_types::base_price.eq(encode_money(base_price)),
            ))
            .execute(conn)?;
    require_affected(affected, "Wash type", wash_type_id)
}

/// Deletes a wash type together with its materials.
///
/// # Errors
///
/// Returns `PersistenceError::ReferenceViolation` if a ticket or
/// appointment still uses it.
pub fn delete_wash_type(
    conn: &mut SqliteConnection,
    wash_type_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::delete(wash_types::table.filter(wash_types::wash_type_id.eq(wash_type_id)))
            .execute(conn)?;
    require_affected(affected, "Wash type", wash_type_id)
}

/// Inserts an equipment type and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the name is taken.
pub fn insert_equipment_type(
    conn: &mut SqliteConnection,
    name: &str,
    price_multiplier: Decimal,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(equipment_types::table)
        .values((
            equipment_types::name.eq(name),
            equipment_types::price_multiplier.eq(encode_money(price_multiplier)),
        ))
        .execute(conn)?;
    last_insert_id(conn)
}

/// Replaces an equipment type's name and multiplier.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the equipment type does not exist.
pub fn update_equipment_type(
    conn: &mut SqliteConnection,
    equipment_type_id: i64,
    name: &str,
    price_multiplier: Decimal,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        equipment_types::table.filter(equipment_types::equipment_type_id.eq(equipment_type_id)),
    )
    .set((
        equipment_types::name.eq(name),
        equipment_types::price_multiplier.eq(encode_money(price_multiplier)),
    ))
    .execute(conn)?;
    require_affected(affected, "Equipment type", equipment_type_id)
}

/// Deletes an equipment type.
///
/// # Errors
///
/// Returns `PersistenceError::ReferenceViolation` if a ticket or
/// appointment still uses it.
pub fn delete_equipment_type(
    conn: &mut SqliteConnection,
    equipment_type_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(
        equipment_types::table.filter(equipment_types::equipment_type_id.eq(equipment_type_id)),
    )
    .execute(conn)?;
    require_affected(affected, "Equipment type", equipment_type_id)
}

/// Inserts a material for a wash type and returns its id.
///
/// # Errors
///
/// Returns `PersistenceError::ReferenceViolation` if the wash type does
/// not exist.
pub fn insert_material(
    conn: &mut SqliteConnection,
    wash_type_id: i64,
    name: &str,
    cost: Decimal,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(materials::table)
        .values((
            materials::wash_type_id.eq(wash_type_id),
            materials::name.eq(name),
            materials::cost.eq(encode_money(cost)),
        ))
        .execute(conn)?;
    last_insert_id(conn)
}

/// Deletes a material.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the material does not exist.
pub fn delete_material(
    conn: &mut SqliteConnection,
    material_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::delete(materials::table.filter(materials::material_id.eq(material_id)))
            .execute(conn)?;
    require_affected(affected, "Material", material_id)
}
