// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Dates are stored as `YYYY-MM-DD`, times as `HH:MM:SS` and timestamps as
//! `YYYY-MM-DDTHH:MM:SS`, so text ordering matches chronological ordering.
//! Money is stored as decimal text.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::{Date, PrimitiveDateTime};
use washbay_domain::{
    Appointment, AppointmentStatus, Base, Customer, CustomerFields, DomainError, EquipmentType,
    Material, NewAppointment, NewTicket, Priority, StatusChange, Ticket, TicketStatus, Vehicle,
    VehicleFields, VehicleKind, WashType, Worker, WorkerFields, format_date, format_datetime,
    format_time, parse_date, parse_datetime, parse_time,
};

use crate::diesel_schema::{
    appointment_status_history, appointments, bases, customers, equipment_types, materials,
    tickets, vehicles, wash_types, workers,
};
use crate::error::PersistenceError;

/// Filters for listing appointments. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    /// Case-insensitive match against code, plate and customer name.
    pub search: Option<String>,
}

/// Filters for listing tickets. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    /// Inclusive lower bound on the service date.
    pub date_from: Option<Date>,
    /// Inclusive upper bound on the service date.
    pub date_to: Option<Date>,
    /// Case-insensitive match against code, plate and customer name.
    pub search: Option<String>,
}

fn decode_error(column: &str, err: &DomainError) -> PersistenceError {
    PersistenceError::ConversionError(format!("{column}: {err}"))
}

fn decode_date(column: &str, value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| decode_error(column, &e))
}

fn decode_datetime(column: &str, value: &str) -> Result<PrimitiveDateTime, PersistenceError> {
    parse_datetime(value).map_err(|e| decode_error(column, &e))
}

fn decode_optional_datetime(
    column: &str,
    value: Option<&str>,
) -> Result<Option<PrimitiveDateTime>, PersistenceError> {
    value.map(|v| decode_datetime(column, v)).transpose()
}

fn decode_money(column: &str, value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value)
        .map_err(|e| PersistenceError::ConversionError(format!("{column}: {e}")))
}

fn decode_optional_money(
    column: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>, PersistenceError> {
    value.map(|v| decode_money(column, v)).transpose()
}

const fn decode_flag(value: i32) -> bool {
    value != 0
}

pub(crate) fn encode_flag(value: bool) -> i32 {
    i32::from(value)
}

pub(crate) fn encode_money(value: Decimal) -> String {
    value.to_string()
}

fn encode_minutes(minutes: u32) -> Result<i32, PersistenceError> {
    minutes.to_i32().ok_or_else(|| {
        PersistenceError::ConversionError(format!("duration {minutes} does not fit the column"))
    })
}

pub(crate) fn encode_optional_datetime(value: Option<PrimitiveDateTime>) -> Option<String> {
    value.map(format_datetime)
}

// ============================================================================
// Appointments
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AppointmentRow {
    pub appointment_id: i64,
    pub code: String,
    pub customer_id: i64,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: String,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub estimated_duration_minutes: i32,
    pub priority: String,
    pub status: String,
    pub estimated_price: String,
    pub discount: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub confirmed_at: Option<String>,
    pub confirmed_by: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub ticket_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl AppointmentRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConversionError` if a column holds a value
    /// the domain cannot represent.
    pub fn into_domain(self) -> Result<Appointment, PersistenceError> {
        Ok(Appointment {
            appointment_id: self.appointment_id,
            code: self.code,
            customer_id: self.customer_id,
            vehicle_id: self.vehicle_id,
            plate: self.plate,
            base_id: self.base_id,
            location: self.location,
            wash_type_id: self.wash_type_id,
            equipment_type_id: self.equipment_type_id,
            worker_id: self.worker_id,
            scheduled_date: decode_date("scheduled_date", &self.scheduled_date)?,
            scheduled_time: parse_time(&self.scheduled_time)
                .map_err(|e| decode_error("scheduled_time", &e))?,
            estimated_duration_minutes: self.estimated_duration_minutes.to_u32().unwrap_or(0),
            priority: Priority::from_str(&self.priority)
                .map_err(|e| decode_error("priority", &e))?,
            status: AppointmentStatus::from_str(&self.status)
                .map_err(|e| decode_error("status", &e))?,
            estimated_price: decode_money("estimated_price", &self.estimated_price)?,
            discount: decode_money("discount", &self.discount)?,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            notes: self.notes,
            internal_notes: self.internal_notes,
            confirmed_at: decode_optional_datetime("confirmed_at", self.confirmed_at.as_deref())?,
            confirmed_by: self.confirmed_by,
            cancelled_at: decode_optional_datetime("cancelled_at", self.cancelled_at.as_deref())?,
            cancellation_reason: self.cancellation_reason,
            ticket_id: self.ticket_id,
            created_at: decode_datetime("created_at", &self.created_at)?,
            updated_at: decode_datetime("updated_at", &self.updated_at)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub struct NewAppointmentRow {
    pub code: String,
    pub customer_id: i64,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: String,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub estimated_duration_minutes: i32,
    pub priority: String,
    pub status: String,
    pub estimated_price: String,
    pub discount: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewAppointmentRow {
    /// Encodes a validated appointment, created in `Scheduled`.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration does not fit the column.
    pub fn from_domain(
        appointment: &NewAppointment,
        code: &str,
        now: PrimitiveDateTime,
    ) -> Result<Self, PersistenceError> {
        let created_at: String = format_datetime(now);
        Ok(Self {
            code: code.to_string(),
            customer_id: appointment.customer_id,
            vehicle_id: appointment.vehicle_id,
            plate: appointment.plate.clone(),
            base_id: appointment.base_id,
            location: appointment.location.clone(),
            wash_type_id: appointment.wash_type_id,
            equipment_type_id: appointment.equipment_type_id,
            worker_id: appointment.worker_id,
            scheduled_date: format_date(appointment.scheduled_date),
            scheduled_time: format_time(appointment.scheduled_time),
            estimated_duration_minutes: encode_minutes(appointment.estimated_duration_minutes)?,
            priority: appointment.priority.as_str().to_string(),
            status: AppointmentStatus::Scheduled.as_str().to_string(),
            estimated_price: encode_money(appointment.estimated_price),
            discount: encode_money(appointment.discount),
            contact_phone: appointment.contact_phone.clone(),
            contact_email: appointment.contact_email.clone(),
            notes: appointment.notes.clone(),
            internal_notes: appointment.internal_notes.clone(),
            updated_at: created_at.clone(),
            created_at,
        })
    }
}

/// Every column of an appointment that may change after creation.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = appointments)]
#[diesel(treat_none_as_null = true)]
pub struct AppointmentChangeset {
    pub worker_id: Option<i64>,
    pub location: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub estimated_duration_minutes: i32,
    pub priority: String,
    pub status: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub confirmed_at: Option<String>,
    pub confirmed_by: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub ticket_id: Option<i64>,
    pub updated_at: String,
}

impl AppointmentChangeset {
    /// Encodes the mutable state of an appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration does not fit the column.
    pub fn from_domain(appointment: &Appointment) -> Result<Self, PersistenceError> {
        Ok(Self {
            worker_id: appointment.worker_id,
            location: appointment.location.clone(),
            scheduled_date: format_date(appointment.scheduled_date),
            scheduled_time: format_time(appointment.scheduled_time),
            estimated_duration_minutes: encode_minutes(appointment.estimated_duration_minutes)?,
            priority: appointment.priority.as_str().to_string(),
            status: appointment.status.as_str().to_string(),
            contact_phone: appointment.contact_phone.clone(),
            contact_email: appointment.contact_email.clone(),
            notes: appointment.notes.clone(),
            internal_notes: appointment.internal_notes.clone(),
            confirmed_at: encode_optional_datetime(appointment.confirmed_at),
            confirmed_by: appointment.confirmed_by.clone(),
            cancelled_at: encode_optional_datetime(appointment.cancelled_at),
            cancellation_reason: appointment.cancellation_reason.clone(),
            ticket_id: appointment.ticket_id,
            updated_at: format_datetime(appointment.updated_at),
        })
    }
}

/// A status history row without its surrogate key, which only orders rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = appointment_status_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StatusHistoryRow {
    pub appointment_id: i64,
    pub from_status: Option<String>,
    pub to_status: String,
    pub changed_by: String,
    pub changed_at: String,
    pub note: Option<String>,
}

impl StatusHistoryRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if a status or timestamp cannot be decoded.
    pub fn into_domain(self) -> Result<StatusChange, PersistenceError> {
        Ok(StatusChange {
            appointment_id: self.appointment_id,
            from_status: self
                .from_status
                .as_deref()
                .map(AppointmentStatus::from_str)
                .transpose()
                .map_err(|e| decode_error("from_status", &e))?,
            to_status: AppointmentStatus::from_str(&self.to_status)
                .map_err(|e| decode_error("to_status", &e))?,
            changed_by: self.changed_by,
            changed_at: decode_datetime("changed_at", &self.changed_at)?,
            note: self.note,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = appointment_status_history)]
pub struct NewStatusHistoryRow {
    pub appointment_id: i64,
    pub from_status: Option<String>,
    pub to_status: String,
    pub changed_by: String,
    pub changed_at: String,
    pub note: Option<String>,
}

impl From<&StatusChange> for NewStatusHistoryRow {
    fn from(change: &StatusChange) -> Self {
        Self {
            appointment_id: change.appointment_id,
            from_status: change.from_status.map(|s| s.as_str().to_string()),
            to_status: change.to_status.as_str().to_string(),
            changed_by: change.changed_by.clone(),
            changed_at: format_datetime(change.changed_at),
            note: change.note.clone(),
        }
    }
}

// ============================================================================
// Tickets
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TicketRow {
    pub ticket_id: i64,
    pub code: String,
    pub customer_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: Option<String>,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub service_date: String,
    pub status: String,
    pub service_price: Option<String>,
    pub discount: String,
    pub final_price: Option<String>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TicketRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConversionError` if a column holds a value
    /// the domain cannot represent.
    pub fn into_domain(self) -> Result<Ticket, PersistenceError> {
        Ok(Ticket {
            ticket_id: self.ticket_id,
            code: self.code,
            customer_id: self.customer_id,
            vehicle_id: self.vehicle_id,
            plate: self.plate,
            base_id: self.base_id,
            location: self.location,
            wash_type_id: self.wash_type_id,
            equipment_type_id: self.equipment_type_id,
            worker_id: self.worker_id,
            started_at: decode_datetime("started_at", &self.started_at)?,
            ended_at: decode_optional_datetime("ended_at", self.ended_at.as_deref())?,
            service_date: decode_date("service_date", &self.service_date)?,
            status: TicketStatus::from_str(&self.status)
                .map_err(|e| decode_error("status", &e))?,
            service_price: decode_optional_money("service_price", self.service_price.as_deref())?,
            discount: decode_money("discount", &self.discount)?,
            final_price: decode_optional_money("final_price", self.final_price.as_deref())?,
            notes: self.notes,
            payment_note: self.payment_note,
            contract: self.contract,
            created_at: decode_datetime("created_at", &self.created_at)?,
            updated_at: decode_datetime("updated_at", &self.updated_at)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicketRow {
    pub code: String,
    pub customer_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub plate: String,
    pub base_id: Option<i64>,
    pub location: Option<String>,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub service_date: String,
    pub status: String,
    pub service_price: Option<String>,
    pub discount: String,
    pub final_price: Option<String>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewTicketRow {
    /// Encodes a new ticket, created in `InProgress` with its final price.
    #[must_use]
    pub fn from_domain(ticket: &NewTicket, code: &str, now: PrimitiveDateTime) -> Self {
        let created_at: String = format_datetime(now);
        Self {
            code: code.to_string(),
            customer_id: ticket.customer_id,
            vehicle_id: ticket.vehicle_id,
            plate: ticket.plate.clone(),
            base_id: ticket.base_id,
            location: ticket.location.clone(),
            wash_type_id: ticket.wash_type_id,
            equipment_type_id: ticket.equipment_type_id,
            worker_id: ticket.worker_id,
            started_at: format_datetime(ticket.started_at),
            ended_at: encode_optional_datetime(ticket.ended_at),
            service_date: format_date(ticket.service_date),
            status: TicketStatus::InProgress.as_str().to_string(),
            service_price: ticket.service_price.map(encode_money),
            discount: encode_money(ticket.discount),
            final_price: ticket.final_price().map(encode_money),
            notes: ticket.notes.clone(),
            payment_note: ticket.payment_note.clone(),
            contract: ticket.contract.clone(),
            updated_at: created_at.clone(),
            created_at,
        }
    }
}

/// Every column of a ticket that may change after creation.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = tickets)]
#[diesel(treat_none_as_null = true)]
pub struct TicketChangeset {
    pub worker_id: Option<i64>,
    pub ended_at: Option<String>,
    pub status: String,
    pub service_price: Option<String>,
    pub discount: String,
    pub final_price: Option<String>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
    pub updated_at: String,
}

impl From<&Ticket> for TicketChangeset {
    fn from(ticket: &Ticket) -> Self {
        Self {
            worker_id: ticket.worker_id,
            ended_at: encode_optional_datetime(ticket.ended_at),
            status: ticket.status.as_str().to_string(),
            service_price: ticket.service_price.map(encode_money),
            discount: encode_money(ticket.discount),
            final_price: ticket.final_price.map(encode_money),
            notes: ticket.notes.clone(),
            payment_note: ticket.payment_note.clone(),
            contract: ticket.contract.clone(),
            updated_at: format_datetime(ticket.updated_at),
        }
    }
}

// ============================================================================
// Reference data
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub is_active: i32,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_id: row.customer_id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            notes: row.notes,
            active: decode_flag(row.is_active),
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub struct CustomerValues {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl From<&CustomerFields> for CustomerValues {
    fn from(fields: &CustomerFields) -> Self {
        Self {
            name: fields.name.clone(),
            phone: fields.phone.clone(),
            email: fields.email.clone(),
            notes: fields.notes.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VehicleRow {
    pub vehicle_id: i64,
    pub customer_id: i64,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub kind: String,
    pub notes: Option<String>,
    pub is_active: i32,
}

impl VehicleRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind or year cannot be decoded.
    pub fn into_domain(self) -> Result<Vehicle, PersistenceError> {
        Ok(Vehicle {
            vehicle_id: self.vehicle_id,
            customer_id: self.customer_id,
            plate: self.plate,
            model: self.model,
            make: self.make,
            year: self
                .year
                .map(|y| {
                    y.to_u16().ok_or_else(|| {
                        PersistenceError::ConversionError(format!("year: {y} out of range"))
                    })
                })
                .transpose()?,
            color: self.color,
            kind: VehicleKind::from_str(&self.kind).map_err(|e| decode_error("kind", &e))?,
            notes: self.notes,
            active: decode_flag(self.is_active),
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = vehicles)]
#[diesel(treat_none_as_null = true)]
pub struct VehicleValues {
    pub customer_id: i64,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub kind: String,
    pub notes: Option<String>,
}

impl From<&VehicleFields> for VehicleValues {
    fn from(fields: &VehicleFields) -> Self {
        Self {
            customer_id: fields.customer_id,
            plate: fields.plate.clone(),
            model: fields.model.clone(),
            make: fields.make.clone(),
            year: fields.year.map(i32::from),
            color: fields.color.clone(),
            kind: fields.kind.as_str().to_string(),
            notes: fields.notes.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = workers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkerRow {
    pub worker_id: i64,
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub is_active: i32,
}

impl WorkerRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the hire date or salary cannot be decoded.
    pub fn into_domain(self) -> Result<Worker, PersistenceError> {
        Ok(Worker {
            worker_id: self.worker_id,
            name: self.name,
            tax_id: self.tax_id,
            phone: self.phone,
            hire_date: decode_date("hire_date", &self.hire_date)?,
            salary: decode_optional_money("salary", self.salary.as_deref())?,
            notes: self.notes,
            active: decode_flag(self.is_active),
        })
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = workers)]
#[diesel(treat_none_as_null = true)]
pub struct WorkerValues {
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: Option<String>,
    pub notes: Option<String>,
}

impl From<&WorkerFields> for WorkerValues {
    fn from(fields: &WorkerFields) -> Self {
        Self {
            name: fields.name.clone(),
            tax_id: fields.tax_id.clone(),
            phone: fields.phone.clone(),
            hire_date: format_date(fields.hire_date),
            salary: fields.salary.map(encode_money),
            notes: fields.notes.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = bases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BaseRow {
    pub base_id: i64,
    pub name: String,
}

impl From<BaseRow> for Base {
    fn from(row: BaseRow) -> Self {
        Self {
            base_id: row.base_id,
            name: row.name,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = wash_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WashTypeRow {
    pub wash_type_id: i64,
    pub name: String,
    pub base_price: String,
}

impl WashTypeRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the base price cannot be decoded.
    pub fn into_domain(self) -> Result<WashType, PersistenceError> {
        Ok(WashType {
            wash_type_id: self.wash_type_id,
            base_price: decode_money("base_price", &self.base_price)?,
            name: self.name,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = equipment_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EquipmentTypeRow {
    pub equipment_type_id: i64,
    pub name: String,
    pub price_multiplier: String,
}

impl EquipmentTypeRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the multiplier cannot be decoded.
    pub fn into_domain(self) -> Result<EquipmentType, PersistenceError> {
        Ok(EquipmentType {
            equipment_type_id: self.equipment_type_id,
            price_multiplier: decode_money("price_multiplier", &self.price_multiplier)?,
            name: self.name,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = materials)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MaterialRow {
    pub material_id: i64,
    pub wash_type_id: i64,
    pub name: String,
    pub cost: String,
}

impl MaterialRow {
    /// Decodes the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the cost cannot be decoded.
    pub fn into_domain(self) -> Result<Material, PersistenceError> {
        Ok(Material {
            material_id: self.material_id,
            wash_type_id: self.wash_type_id,
            cost: decode_money("cost", &self.cost)?,
            name: self.name,
        })
    }
}
