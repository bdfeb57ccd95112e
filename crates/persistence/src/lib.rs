// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Washbay car wash system.
//!
//! This crate stores appointments, wash tickets, their status history and
//! the reference data they point at. It is built on Diesel over `SQLite`.
//!
//! ## Storage
//!
//! - In-memory databases back the tests; each one gets a unique shared name.
//! - File databases run in WAL mode.
//! - The schema is applied from embedded migrations on open, and foreign
//!   key enforcement is verified before the adapter is returned.
//!
//! ## Slot Uniqueness
//!
//! An appointment slot is the (date, time, location) triple. Booking and
//! rescheduling check the slot inside a `BEGIN IMMEDIATE` transaction, and a
//! partial unique index over active appointments backs the check up. Either
//! path reports `PersistenceError::SlotUnavailable`.

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

use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, PrimitiveDateTime};
use washbay::{AppointmentTransition, TicketTransition};
use washbay_domain::{
    Appointment, Base, Customer, CustomerFields, DirectoryEntry, EquipmentType, Material,
    NewAppointment, NewTicket, Slot, StatusChange, Ticket, Vehicle, VehicleFields, WashType,
    Worker, WorkerFields,
};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{AppointmentFilter, TicketFilter};
pub use error::PersistenceError;
pub use mutations::AppointmentOutcome;

use backend::sqlite::StoreLocation;
use data_models::{CustomerValues, VehicleValues, WorkerValues};

/// Type alias kept for callers that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter for appointments, tickets and reference data.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call gets its own database, named from an atomic counter, so
    /// tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_washbay_{db_id}");
        let conn: SqliteConnection = backend::sqlite::open(StoreLocation::Memory(&db_name))?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database cannot
    /// be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        let path_str: &str = path.to_str().ok_or_else(|| {
            PersistenceError::InitializationError(format!(
                "Database path is not valid UTF-8: {}",
                path.display()
            ))
        })?;
        let conn: SqliteConnection = backend::sqlite::open(StoreLocation::File(path_str))?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::check_foreign_keys(&mut self.conn)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Returns true if no active appointment other than `excluding` holds the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_slot_available(
        &mut self,
        slot: &Slot,
        excluding: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::appointments::is_slot_available(&mut self.conn, slot, excluding)
    }

    /// Books a validated appointment.
    ///
    /// # Arguments
    ///
    /// * `appointment` - The validated appointment
    /// * `code` - The generated appointment code
    /// * `actor` - Who booked it
    /// * `now` - The current local instant
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SlotUnavailable` if the slot is taken.
    pub fn create_appointment(
        &mut self,
        appointment: &NewAppointment,
        code: &str,
        actor: &str,
        now: PrimitiveDateTime,
    ) -> Result<Appointment, PersistenceError> {
        mutations::lifecycle::create_appointment(&mut self.conn, appointment, code, actor, now)
    }

    /// Writes an edited appointment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SlotUnavailable` if the new slot is taken,
    /// or `NotFound`.
    pub fn save_appointment(
        &mut self,
        appointment: &Appointment,
    ) -> Result<Appointment, PersistenceError> {
        mutations::lifecycle::save_appointment(&mut self.conn, appointment)
    }

    /// Persists the outcome of an appointment status command.
    ///
    /// # Arguments
    ///
    /// * `transition` - The outcome of the command
    /// * `ticket_code` - The code for the ticket a conversion creates
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written in that case.
    pub fn persist_appointment_transition(
        &mut self,
        transition: &AppointmentTransition,
        ticket_code: Option<&str>,
    ) -> Result<AppointmentOutcome, PersistenceError> {
        mutations::lifecycle::persist_appointment_transition(
            &mut self.conn,
            transition,
            ticket_code,
        )
    }

    /// Retrieves an appointment by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such appointment exists.
    pub fn get_appointment(&mut self, appointment_id: i64) -> Result<Appointment, PersistenceError> {
        queries::appointments::get_appointment(&mut self.conn, appointment_id)
    }

    /// Retrieves the appointment that produced a ticket, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_appointment_by_ticket(
        &mut self,
        ticket_id: i64,
    ) -> Result<Option<Appointment>, PersistenceError> {
        queries::appointments::find_appointment_by_ticket(&mut self.conn, ticket_id)
    }

    /// Lists appointments matching a filter, ordered by date then time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_appointments(
        &mut self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_appointments(&mut self.conn, filter)
    }

    /// Lists appointments in `[from, to]` with their customer names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_calendar_entries(
        &mut self,
        from: Date,
        to: Date,
    ) -> Result<Vec<(Appointment, Option<String>)>, PersistenceError> {
        queries::appointments::list_calendar_entries(&mut self.conn, from, to)
    }

    /// Returns the status history of an appointment, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_status_history(
        &mut self,
        appointment_id: i64,
    ) -> Result<Vec<StatusChange>, PersistenceError> {
        queries::appointments::get_status_history(&mut self.conn, appointment_id)
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Opens a walk-in ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or a reference is invalid.
    pub fn create_ticket(
        &mut self,
        ticket: &NewTicket,
        code: &str,
        now: PrimitiveDateTime,
    ) -> Result<Ticket, PersistenceError> {
        mutations::lifecycle::create_ticket(&mut self.conn, ticket, code, now)
    }

    /// Writes an edited ticket.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the ticket does not exist.
    pub fn save_ticket(&mut self, ticket: &Ticket) -> Result<Ticket, PersistenceError> {
        mutations::lifecycle::save_ticket(&mut self.conn, ticket)
    }

    /// Persists a ticket status command and the mirrored appointment status.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written in that case.
    pub fn persist_ticket_transition(
        &mut self,
        transition: &TicketTransition,
    ) -> Result<Ticket, PersistenceError> {
        mutations::lifecycle::persist_ticket_transition(&mut self.conn, transition)
    }

    /// Retrieves a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such ticket exists.
    pub fn get_ticket(&mut self, ticket_id: i64) -> Result<Ticket, PersistenceError> {
        queries::tickets::get_ticket(&mut self.conn, ticket_id)
    }

    /// Lists tickets matching a filter, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tickets(&mut self, filter: &TicketFilter) -> Result<Vec<Ticket>, PersistenceError> {
        queries::tickets::list_tickets(&mut self.conn, filter)
    }

    // ========================================================================
    // Customers, Vehicles, Workers
    // ========================================================================

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_customer(&mut self, fields: &CustomerFields) -> Result<Customer, PersistenceError> {
        let customer_id: i64 =
            mutations::reference::insert_customer(&mut self.conn, &CustomerValues::from(fields))?;
        queries::reference::get_customer(&mut self.conn, customer_id)
    }

    /// Replaces a customer's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the customer does not exist.
    pub fn update_customer(
        &mut self,
        customer_id: i64,
        fields: &CustomerFields,
    ) -> Result<Customer, PersistenceError> {
        mutations::reference::update_customer(
            &mut self.conn,
            customer_id,
            &CustomerValues::from(fields),
        )?;
        queries::reference::get_customer(&mut self.conn, customer_id)
    }

    /// Deactivates a customer.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the customer does not exist.
    pub fn deactivate_customer(&mut self, customer_id: i64) -> Result<Customer, PersistenceError> {
        mutations::reference::set_customer_active(&mut self.conn, customer_id, false)?;
        queries::reference::get_customer(&mut self.conn, customer_id)
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such customer exists.
    pub fn get_customer(&mut self, customer_id: i64) -> Result<Customer, PersistenceError> {
        queries::reference::get_customer(&mut self.conn, customer_id)
    }

    /// Lists customers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers(&mut self, active_only: bool) -> Result<Vec<Customer>, PersistenceError> {
        queries::reference::list_customers(&mut self.conn, active_only)
    }

    /// Creates a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the plate is registered.
    pub fn create_vehicle(&mut self, fields: &VehicleFields) -> Result<Vehicle, PersistenceError> {
        let vehicle_id: i64 =
            mutations::reference::insert_vehicle(&mut self.conn, &VehicleValues::from(fields))?;
        queries::reference::get_vehicle(&mut self.conn, vehicle_id)
    }

    /// Replaces a vehicle's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the vehicle does not exist.
    pub fn update_vehicle(
        &mut self,
        vehicle_id: i64,
        fields: &VehicleFields,
    ) -> Result<Vehicle, PersistenceError> {
        mutations::reference::update_vehicle(
            &mut self.conn,
            vehicle_id,
            &VehicleValues::from(fields),
        )?;
        queries::reference::get_vehicle(&mut self.conn, vehicle_id)
    }

    /// Deactivates a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the vehicle does not exist.
    pub fn deactivate_vehicle(&mut self, vehicle_id: i64) -> Result<Vehicle, PersistenceError> {
        mutations::reference::set_vehicle_active(&mut self.conn, vehicle_id, false)?;
        queries::reference::get_vehicle(&mut self.conn, vehicle_id)
    }

    /// Retrieves a vehicle by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such vehicle exists.
    pub fn get_vehicle(&mut self, vehicle_id: i64) -> Result<Vehicle, PersistenceError> {
        queries::reference::get_vehicle(&mut self.conn, vehicle_id)
    }

    /// Retrieves a vehicle by its normalized plate.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no vehicle has the plate.
    pub fn get_vehicle_by_plate(&mut self, plate: &str) -> Result<Vehicle, PersistenceError> {
        queries::reference::get_vehicle_by_plate(&mut self.conn, plate)
    }

    /// Lists vehicles, optionally for one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vehicles(
        &mut self,
        customer_id: Option<i64>,
        active_only: bool,
    ) -> Result<Vec<Vehicle>, PersistenceError> {
        queries::reference::list_vehicles(&mut self.conn, customer_id, active_only)
    }

    /// Creates a worker.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the tax id is registered.
    pub fn create_worker(&mut self, fields: &WorkerFields) -> Result<Worker, PersistenceError> {
        let worker_id: i64 =
            mutations::reference::insert_worker(&mut self.conn, &WorkerValues::from(fields))?;
        queries::reference::get_worker(&mut self.conn, worker_id)
    }

    /// Replaces a worker's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the worker does not exist.
    pub fn update_worker(
        &mut self,
        worker_id: i64,
        fields: &WorkerFields,
    ) -> Result<Worker, PersistenceError> {
        mutations::reference::update_worker(&mut self.conn, worker_id, &WorkerValues::from(fields))?;
        queries::reference::get_worker(&mut self.conn, worker_id)
    }

    /// Deactivates a worker.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the worker does not exist.
    pub fn deactivate_worker(&mut self, worker_id: i64) -> Result<Worker, PersistenceError> {
        mutations::reference::set_worker_active(&mut self.conn, worker_id, false)?;
        queries::reference::get_worker(&mut self.conn, worker_id)
    }

    /// Retrieves a worker by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such worker exists.
    pub fn get_worker(&mut self, worker_id: i64) -> Result<Worker, PersistenceError> {
        queries::reference::get_worker(&mut self.conn, worker_id)
    }

    /// Lists workers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_workers(&mut self, active_only: bool) -> Result<Vec<Worker>, PersistenceError> {
        queries::reference::list_workers(&mut self.conn, active_only)
    }

    // ========================================================================
    // Directory Lookups
    // ========================================================================

    /// Looks up a customer's display name and active flag.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such customer exists.
    pub fn customer_entry(&mut self, customer_id: i64) -> Result<DirectoryEntry, PersistenceError> {
        queries::reference::customer_entry(&mut self.conn, customer_id)
    }

    /// Looks up a vehicle's display name and active flag.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such vehicle exists.
    pub fn vehicle_entry(&mut self, vehicle_id: i64) -> Result<DirectoryEntry, PersistenceError> {
        queries::reference::vehicle_entry(&mut self.conn, vehicle_id)
    }

    /// Looks up a worker's display name and active flag.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such worker exists.
    pub fn worker_entry(&mut self, worker_id: i64) -> Result<DirectoryEntry, PersistenceError> {
        queries::reference::worker_entry(&mut self.conn, worker_id)
    }

    // ========================================================================
    // Service Catalog
    // ========================================================================

    /// Creates a base.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the name is taken.
    pub fn create_base(&mut self, name: &str) -> Result<Base, PersistenceError> {
        let base_id: i64 = mutations::reference::insert_base(&mut self.conn, name)?;
        queries::reference::get_base(&mut self.conn, base_id)
    }

    /// Renames a base.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the base does not exist.
    pub fn update_base(&mut self, base_id: i64, name: &str) -> Result<Base, PersistenceError> {
        mutations::reference::rename_base(&mut self.conn, base_id, name)?;
        queries::reference::get_base(&mut self.conn, base_id)
    }

    /// Deletes a base.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReferenceViolation` if it is still in use.
    pub fn delete_base(&mut self, base_id: i64) -> Result<(), PersistenceError> {
        mutations::reference::delete_base(&mut self.conn, base_id)
    }

    /// Retrieves a base by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such base exists.
    pub fn get_base(&mut self, base_id: i64) -> Result<Base, PersistenceError> {
        queries::reference::get_base(&mut self.conn, base_id)
    }

    /// Lists bases ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bases(&mut self) -> Result<Vec<Base>, PersistenceError> {
        queries::reference::list_bases(&mut self.conn)
    }

    /// Creates a wash type.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the name is taken.
    pub fn create_wash_type(
        &mut self,
        name: &str,
        base_price: Decimal,
    ) -> Result<WashType, PersistenceError> {
        let wash_type_id: i64 =
            mutations::reference::insert_wash_type(&mut self.conn, name, base_price)?;
        queries::reference::get_wash_type(&mut self.conn, wash_type_id)
    }

    /// Replaces a wash type's name and base price.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the wash type does not exist.
    pub fn update_wash_type(
        &mut self,
        wash_type_id: i64,
        name: &str,
        base_price: Decimal,
    ) -> Result<WashType, PersistenceError> {
        mutations::reference::update_wash_type(&mut self.conn, wash_type_id, name, base_price)?;
        queries::reference::get_wash_type(&mut self.conn, wash_type_id)
    }

    /// Deletes a wash type and its materials.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReferenceViolation` if it is still in use.
    pub fn delete_wash_type(&mut self, wash_type_id: i64) -> Result<(), PersistenceError> {
        mutations::reference::delete_wash_type(&mut self.conn, wash_type_id)
    }

    /// Retrieves a wash type by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such wash type exists.
    pub fn get_wash_type(&mut self, wash_type_id: i64) -> Result<WashType, PersistenceError> {
        queries::reference::get_wash_type(&mut self.conn, wash_type_id)
    }

    /// Lists wash types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_wash_types(&mut self) -> Result<Vec<WashType>, PersistenceError> {
        queries::reference::list_wash_types(&mut self.conn)
    }

    /// Creates an equipment type.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the name is taken.
    pub fn create_equipment_type(
        &mut self,
        name: &str,
        price_multiplier: Decimal,
    ) -> Result<EquipmentType, PersistenceError> {
        let equipment_type_id: i64 =
            mutations::reference::insert_equipment_type(&mut self.conn, name, price_multiplier)?;
        queries::reference::get_equipment_type(&mut self.conn, equipment_type_id)
    }

    /// Replaces an equipment type's name and multiplier.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the equipment type does not exist.
    pub fn update_equipment_type(
        &mut self,
        equipment_type_id: i64,
        name: &str,
        price_multiplier: Decimal,
    ) -> Result<EquipmentType, PersistenceError> {
        mutations::reference::update_equipment_type(
            &mut self.conn,
            equipment_type_id,
            name,
            price_multiplier,
        )?;
        queries::reference::get_equipment_type(&mut self.conn, equipment_type_id)
    }

    /// Deletes an equipment type.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReferenceViolation` if it is still in use.
    pub fn delete_equipment_type(&mut self, equipment_type_id: i64) -> Result<(), PersistenceError> {
        mutations::reference::delete_equipment_type(&mut self.conn, equipment_type_id)
    }

    /// Retrieves an equipment type by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no such equipment type exists.
    pub fn get_equipment_type(
        &mut self,
        equipment_type_id: i64,
    ) -> Result<EquipmentType, PersistenceError> {
        queries::reference::get_equipment_type(&mut self.conn, equipment_type_id)
    }

    /// Lists equipment types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_equipment_types(&mut self) -> Result<Vec<EquipmentType>, PersistenceError> {
        queries::reference::list_equipment_types(&mut self.conn)
    }

    /// Adds a material to a wash type.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReferenceViolation` if the wash type does not exist.
    pub fn create_material(
        &mut self,
        wash_type_id: i64,
        name: &str,
        cost: Decimal,
    ) -> Result<Material, PersistenceError> {
        let material_id: i64 =
            mutations::reference::insert_material(&mut self.conn, wash_type_id, name, cost)?;
        queries::reference::get_material(&mut self.conn, material_id)
    }

    /// Deletes a material.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the material does not exist.
    pub fn delete_material(&mut self, material_id: i64) -> Result<(), PersistenceError> {
        mutations::reference::delete_material(&mut self.conn, material_id)
    }

    /// Lists the materials of a wash type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_materials(&mut self, wash_type_id: i64) -> Result<Vec<Material>, PersistenceError> {
        queries::reference::list_materials(&mut self.conn, wash_type_id)
    }
}
