// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data: customers, vehicles, workers and the service catalog.
//!
//! Reads are open to every actor. Writes require the manager role.

use rust_decimal::Decimal;
use tracing::info;
use washbay_domain::{
    Base, Customer, CustomerFields, EquipmentType, Material, VehicleFields, VehicleKind,
    WashType, Worker, WorkerFields, normalize_plate, parse_date, parse_money, require_text,
};
use washbay_persistence::Persistence;

use super::parse_amount;
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    ActiveQuery, BaseInfo, BaseRequest, CustomerInfo, CustomerRequest, DeleteResponse,
    EquipmentTypeInfo, EquipmentTypeRequest, MaterialInfo, MaterialRequest, VehicleInfo,
    VehicleQuery, VehicleRequest, WashTypeInfo, WashTypeRequest, WorkerInfo, WorkerRequest,
};

// ============================================================================
// Customers
// ============================================================================

fn customer_fields(request: &CustomerRequest) -> Result<CustomerFields, ApiError> {
    CustomerFields::new(
        &request.name,
        request.phone.as_deref(),
        request.email.as_deref(),
        request.notes.as_deref(),
    )
    .map_err(translate_domain_error)
}

/// Lists customers ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_customers(
    persistence: &mut Persistence,
    query: &ActiveQuery,
) -> Result<Vec<CustomerInfo>, ApiError> {
    let customers: Vec<Customer> = persistence
        .list_customers(query.active_only)
        .map_err(|e| translate_persistence_error(e, "Customer"))?;
    Ok(customers.iter().map(CustomerInfo::from).collect())
}

/// Creates a customer.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or a field is invalid.
pub fn create_customer(
    persistence: &mut Persistence,
    request: &CustomerRequest,
    actor: &AuthenticatedActor,
) -> Result<CustomerInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_customer")?;
    let customer: Customer = persistence
        .create_customer(&customer_fields(request)?)
        .map_err(|e| translate_persistence_error(e, "Customer"))?;
    info!(customer_id = customer.customer_id, actor = %actor.id, "Customer created");
    Ok(CustomerInfo::from(&customer))
}

/// Retrieves a customer.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the customer does not exist.
pub fn get_customer(
    persistence: &mut Persistence,
    customer_id: i64,
) -> Result<CustomerInfo, ApiError> {
    persistence
        .get_customer(customer_id)
        .map(|c| CustomerInfo::from(&c))
        .map_err(|e| translate_persistence_error(e, "Customer"))
}

/// Replaces a customer's fields.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a field is invalid or
/// the customer does not exist.
pub fn update_customer(
    persistence: &mut Persistence,
    customer_id: i64,
    request: &CustomerRequest,
    actor: &AuthenticatedActor,
) -> Result<CustomerInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "update_customer")?;
    persistence
        .update_customer(customer_id, &customer_fields(request)?)
        .map(|c| CustomerInfo::from(&c))
        .map_err(|e| translate_persistence_error(e, "Customer"))
}

/// Deactivates a customer. Existing appointments and tickets keep their link.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or the customer does not exist.
pub fn deactivate_customer(
    persistence: &mut Persistence,
    customer_id: i64,
    actor: &AuthenticatedActor,
) -> Result<CustomerInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "deactivate_customer")?;
    let customer: Customer = persistence
        .deactivate_customer(customer_id)
        .map_err(|e| translate_persistence_error(e, "Customer"))?;
    info!(customer_id, actor = %actor.id, "Customer deactivated");
    Ok(CustomerInfo::from(&customer))
}

// ============================================================================
// Vehicles
// ============================================================================

fn vehicle_fields(
    persistence: &mut Persistence,
    request: &VehicleRequest,
) -> Result<VehicleFields, ApiError> {
    persistence
        .get_customer(request.customer_id)
        .map_err(|e| translate_persistence_error(e, "Customer"))?;
    let kind: VehicleKind = match request.kind.as_deref().map(str::trim) {
        None | Some("") => VehicleKind::default(),
        Some(kind) => kind.parse().map_err(translate_domain_error)?,
    };
    VehicleFields::new(
        request.customer_id,
        &request.plate,
        &request.model,
        &request.make,
        request.year,
        request.color.as_deref(),
        kind,
        request.notes.as_deref(),
    )
    .map_err(translate_domain_error)
}

/// Lists vehicles ordered by plate, optionally for one customer.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_vehicles(
    persistence: &mut Persistence,
    query: &VehicleQuery,
) -> Result<Vec<VehicleInfo>, ApiError> {
    persistence
        .list_vehicles(query.customer_id, query.active_only)
        .map(|vehicles| vehicles.iter().map(VehicleInfo::from).collect())
        .map_err(|e| translate_persistence_error(e, "Vehicle"))
}

/// Registers a vehicle for a customer.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the customer does not
/// exist, a field is invalid, or the plate is already registered.
pub fn create_vehicle(
    persistence: &mut Persistence,
    request: &VehicleRequest,
    actor: &AuthenticatedActor,
) -> Result<VehicleInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_vehicle")?;
    let fields: VehicleFields = vehicle_fields(persistence, request)?;
    let vehicle = persistence
        .create_vehicle(&fields)
        .map_err(|e| translate_persistence_error(e, "Vehicle"))?;
    info!(vehicle_id = vehicle.vehicle_id, plate = %vehicle.plate, "Vehicle registered");
    Ok(VehicleInfo::from(&vehicle))
}

/// Retrieves a vehicle.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the vehicle does not exist.
pub fn get_vehicle(
    persistence: &mut Persistence,
    vehicle_id: i64,
) -> Result<VehicleInfo, ApiError> {
    persistence
        .get_vehicle(vehicle_id)
        .map(|v| VehicleInfo::from(&v))
        .map_err(|e| translate_persistence_error(e, "Vehicle"))
}

/// Looks a vehicle up by plate, in any letter case.
///
/// # Errors
///
/// Returns an error if the plate is malformed or unknown.
pub fn get_vehicle_by_plate(
    persistence: &mut Persistence,
    plate: &str,
) -> Result<VehicleInfo, ApiError> {
    let plate: String = normalize_plate(plate).map_err(translate_domain_error)?;
    persistence
        .get_vehicle_by_plate(&plate)
        .map(|v| VehicleInfo::from(&v))
        .map_err(|e| translate_persistence_error(e, "Vehicle"))
}

/// Replaces a vehicle's fields.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a field is invalid, the
/// vehicle does not exist, or the new plate belongs to another vehicle.
pub fn update_vehicle(
    persistence: &mut Persistence,
    vehicle_id: i64,
    request: &VehicleRequest,
    actor: &AuthenticatedActor,
) -> Result<VehicleInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "update_vehicle")?;
    let fields: VehicleFields = vehicle_fields(persistence, request)?;
    persistence
        .update_vehicle(vehicle_id, &fields)
        .map(|v| VehicleInfo::from(&v))
        .map_err(|e| translate_persistence_error(e, "Vehicle"))
}

/// Deactivates a vehicle.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or the vehicle does not exist.
pub fn deactivate_vehicle(
    persistence: &mut Persistence,
    vehicle_id: i64,
    actor: &AuthenticatedActor,
) -> Result<VehicleInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "deactivate_vehicle")?;
    persistence
        .deactivate_vehicle(vehicle_id)
        .map(|v| VehicleInfo::from(&v))
        .map_err(|e| translate_persistence_error(e, "Vehicle"))
}

// ============================================================================
// Workers
// ============================================================================

fn worker_fields(request: &WorkerRequest) -> Result<WorkerFields, ApiError> {
    WorkerFields::new(
        &request.name,
        &request.tax_id,
        request.phone.as_deref(),
        parse_date(&request.hire_date).map_err(translate_domain_error)?,
        parse_amount("salary", request.salary.as_deref())?,
        request.notes.as_deref(),
    )
    .map_err(translate_domain_error)
}

/// Lists workers ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_workers(
    persistence: &mut Persistence,
    query: &ActiveQuery,
) -> Result<Vec<WorkerInfo>, ApiError> {
    let workers: Vec<Worker> = persistence
        .list_workers(query.active_only)
        .map_err(|e| translate_persistence_error(e, "Worker"))?;
    Ok(workers.iter().map(WorkerInfo::from).collect())
}

/// Hires a worker.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a field is invalid, or
/// the tax id is already registered.
pub fn create_worker(
    persistence: &mut Persistence,
    request: &WorkerRequest,
    actor: &AuthenticatedActor,
) -> Result<WorkerInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_worker")?;
    let worker: Worker = persistence
        .create_worker(&worker_fields(request)?)
        .map_err(|e| translate_persistence_error(e, "Worker"))?;
    info!(worker_id = worker.worker_id, actor = %actor.id, "Worker created");
    Ok(WorkerInfo::from(&worker))
}

/// Retrieves a worker.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the worker does not exist.
pub fn get_worker(persistence: &mut Persistence, worker_id: i64) -> Result<WorkerInfo, ApiError> {
    persistence
        .get_worker(worker_id)
        .map(|w| WorkerInfo::from(&w))
        .map_err(|e| translate_persistence_error(e, "Worker"))
}

/// Replaces a worker's fields.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a field is invalid, or
/// the worker does not exist.
pub fn update_worker(
    persistence: &mut Persistence,
    worker_id: i64,
    request: &WorkerRequest,
    actor: &AuthenticatedActor,
) -> Result<WorkerInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "update_worker")?;
    persistence
        .update_worker(worker_id, &worker_fields(request)?)
        .map(|w| WorkerInfo::from(&w))
        .map_err(|e| translate_persistence_error(e, "Worker"))
}

/// Deactivates a worker. They can no longer be assigned.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or the worker does not exist.
pub fn deactivate_worker(
    persistence: &mut Persistence,
    worker_id: i64,
    actor: &AuthenticatedActor,
) -> Result<WorkerInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "deactivate_worker")?;
    persistence
        .deactivate_worker(worker_id)
        .map(|w| WorkerInfo::from(&w))
        .map_err(|e| translate_persistence_error(e, "Worker"))
}

// ============================================================================
// Catalog
// ============================================================================

fn catalog_name(name: &str) -> Result<String, ApiError> {
    require_text("name", name).map_err(translate_domain_error)
}

fn deleted(resource: &str, id: i64) -> DeleteResponse {
    DeleteResponse {
        message: format!("{resource} {id} deleted"),
    }
}

/// Lists bases ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_bases(persistence: &mut Persistence) -> Result<Vec<BaseInfo>, ApiError> {
    let bases: Vec<Base> = persistence
        .list_bases()
        .map_err(|e| translate_persistence_error(e, "Base"))?;
    Ok(bases.iter().map(BaseInfo::from).collect())
}

/// Creates a base.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or the name is blank or taken.
pub fn create_base(
    persistence: &mut Persistence,
    request: &BaseRequest,
    actor: &AuthenticatedActor,
) -> Result<BaseInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_base")?;
    persistence
        .create_base(&catalog_name(&request.name)?)
        .map(|b| BaseInfo::from(&b))
        .map_err(|e| translate_persistence_error(e, "Base"))
}

/// Retrieves a base.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the base does not exist.
pub fn get_base(persistence: &mut Persistence, base_id: i64) -> Result<BaseInfo, ApiError> {
    persistence
        .get_base(base_id)
        .map(|b| BaseInfo::from(&b))
        .map_err(|e| translate_persistence_error(e, "Base"))
}

/// Renames a base.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the name is blank or
/// taken, or the base does not exist.
pub fn update_base(
    persistence: &mut Persistence,
    base_id: i64,
    request: &BaseRequest,
    actor: &AuthenticatedActor,
) -> Result<BaseInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "update_base")?;
    persistence
        .update_base(base_id, &catalog_name(&request.name)?)
        .map(|b| BaseInfo::from(&b))
        .map_err(|e| translate_persistence_error(e, "Base"))
}

/// Deletes a base.
///
/// # Errors
///
/// Returns `ApiError::Conflict` if appointments or tickets still reference it.
pub fn delete_base(
    persistence: &mut Persistence,
    base_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "delete_base")?;
    persistence
        .delete_base(base_id)
        .map_err(|e| translate_persistence_error(e, "Base"))?;
    info!(base_id, actor = %actor.id, "Base deleted");
    Ok(deleted("Base", base_id))
}

fn base_price(request: &WashTypeRequest) -> Result<Decimal, ApiError> {
    Ok(parse_amount("base_price", request.base_price.as_deref())?.unwrap_or(Decimal::ZERO))
}

/// Lists wash types ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_wash_types(persistence: &mut Persistence) -> Result<Vec<WashTypeInfo>, ApiError> {
    let wash_types: Vec<WashType> = persistence
        .list_wash_types()
        .map_err(|e| translate_persistence_error(e, "Wash type"))?;
    Ok(wash_types.iter().map(WashTypeInfo::from).collect())
}

/// Creates a wash type; the base price defaults to zero.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the name is blank or
/// taken, or the price is malformed.
pub fn create_wash_type(
    persistence: &mut Persistence,
    request: &WashTypeRequest,
    actor: &AuthenticatedActor,
) -> Result<WashTypeInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_wash_type")?;
    persistence
        .create_wash_type(&catalog_name(&request.name)?, base_price(request)?)
        .map(|w| WashTypeInfo::from(&w))
        .map_err(|e| translate_persistence_error(e, "Wash type"))
}

/// Retrieves a wash type.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the wash type does not exist.
pub fn get_wash_type(
    persistence: &mut Persistence,
    wash_type_id: i64,
) -> Result<WashTypeInfo, ApiError> {
    persistence
        .get_wash_type(wash_type_id)
        .map(|w| WashTypeInfo::from(&w))
        .map_err(|e| translate_persistence_error(e, "Wash type"))
}

/// Replaces a wash type's name and base price.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a field is invalid, or
/// the wash type does not exist.
pub fn update_wash_type(
    persistence: &mut Persistence,
    wash_type_id: i64,
    request: &WashTypeRequest,
    actor: &AuthenticatedActor,
) -> Result<WashTypeInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "update_wash_type")?;
    persistence
        .update_wash_type(
            wash_type_id,
            &catalog_name(&request.name)?,
            base_price(request)?,
        )
        .map(|w| WashTypeInfo::from(&w))
        .map_err(|e| translate_persistence_error(e, "Wash type"))
}

/// Deletes a wash type together with its materials.
///
/// # Errors
///
/// Returns `ApiError::Conflict` if appointments or tickets still reference it.
pub fn delete_wash_type(
    persistence: &mut Persistence,
    wash_type_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "delete_wash_type")?;
    persistence
        .delete_wash_type(wash_type_id)
        .map_err(|e| translate_persistence_error(e, "Wash type"))?;
    info!(wash_type_id, actor = %actor.id, "Wash type deleted");
    Ok(deleted("Wash type", wash_type_id))
}

/// Lists the materials a wash type consumes.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the wash type does not exist.
pub fn list_materials(
    persistence: &mut Persistence,
    wash_type_id: i64,
) -> Result<Vec<MaterialInfo>, ApiError> {
    persistence
        .get_wash_type(wash_type_id)
        .map_err(|e| translate_persistence_error(e, "Wash type"))?;
    let materials: Vec<Material> = persistence
        .list_materials(wash_type_id)
        .map_err(|e| translate_persistence_error(e, "Material"))?;
    Ok(materials.iter().map(MaterialInfo::from).collect())
}

/// Adds a material to a wash type.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the wash type does not
/// exist, or a field is invalid.
pub fn create_material(
    persistence: &mut Persistence,
    wash_type_id: i64,
    request: &MaterialRequest,
    actor: &AuthenticatedActor,
) -> Result<MaterialInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_material")?;
    persistence
        .get_wash_type(wash_type_id)
        .map_err(|e| translate_persistence_error(e, "Wash type"))?;
    let cost: Decimal = parse_money("cost", &request.cost).map_err(translate_domain_error)?;
    persistence
        .create_material(wash_type_id, &catalog_name(&request.name)?, cost)
        .map(|m| MaterialInfo::from(&m))
        .map_err(|e| translate_persistence_error(e, "Material"))
}

/// Deletes a material.
///
/// # Errors
///
/// Returns an error if the actor is not a manager or the material does not exist.
pub fn delete_material(
    persistence: &mut Persistence,
    material_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "delete_material")?;
    persistence
        .delete_material(material_id)
        .map_err(|e| translate_persistence_error(e, "Material"))?;
    Ok(deleted("Material", material_id))
}

fn price_multiplier(request: &EquipmentTypeRequest) -> Result<Decimal, ApiError> {
    Ok(
        parse_amount("price_multiplier", request.price_multiplier.as_deref())?
            .unwrap_or(EquipmentType::DEFAULT_MULTIPLIER),
    )
}

/// Lists equipment types ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_equipment_types(
    persistence: &mut Persistence,
) -> Result<Vec<EquipmentTypeInfo>, ApiError> {
    let equipment_types: Vec<EquipmentType> = persistence
        .list_equipment_types()
        .map_err(|e| translate_persistence_error(e, "Equipment type"))?;
    Ok(equipment_types.iter().map(EquipmentTypeInfo::from).collect())
}

/// Creates an equipment type; the multiplier defaults to 1.00.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, the name is blank or
/// taken, or the multiplier is malformed.
pub fn create_equipment_type(
    persistence: &mut Persistence,
    request: &EquipmentTypeRequest,
    actor: &AuthenticatedActor,
) -> Result<EquipmentTypeInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "create_equipment_type")?;
    persistence
        .create_equipment_type(&catalog_name(&request.name)?, price_multiplier(request)?)
        .map(|e| EquipmentTypeInfo::from(&e))
        .map_err(|e| translate_persistence_error(e, "Equipment type"))
}

/// Retrieves an equipment type.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the equipment type does not exist.
pub fn get_equipment_type(
    persistence: &mut Persistence,
    equipment_type_id: i64,
) -> Result<EquipmentTypeInfo, ApiError> {
    persistence
        .get_equipment_type(equipment_type_id)
        .map(|e| EquipmentTypeInfo::from(&e))
        .map_err(|e| translate_persistence_error(e, "Equipment type"))
}

/// Replaces an equipment type's name and multiplier.
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a field is invalid, or
/// the equipment type does not exist.
pub fn update_equipment_type(
    persistence: &mut Persistence,
    equipment_type_id: i64,
    request: &EquipmentTypeRequest,
    actor: &AuthenticatedActor,
) -> Result<EquipmentTypeInfo, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "update_equipment_type")?;
    persistence
        .update_equipment_type(
            equipment_type_id,
            &catalog_name(&request.name)?,
            price_multiplier(request)?,
        )
        .map(|e| EquipmentTypeInfo::from(&e))
        .map_err(|e| translate_persistence_error(e, "Equipment type"))
}

/// Deletes an equipment type.
///
/// # Errors
///
/// Returns `ApiError::Conflict` if appointments or tickets still reference it.
pub fn delete_equipment_type(
    persistence: &mut Persistence,
    equipment_type_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_reference_write(actor, "delete_equipment_type")?;
    persistence
        .delete_equipment_type(equipment_type_id)
        .map_err(|e| translate_persistence_error(e, "Equipment type"))?;
    Ok(deleted("Equipment type", equipment_type_id))
}
