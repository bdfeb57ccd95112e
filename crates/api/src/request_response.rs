// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry dates, times and money as strings so that parse failures
//! surface as field-level validation errors. Responses render them in the
//! same textual forms.

use serde::{Deserialize, Deserializer, Serialize};
use washbay_domain::{
    Appointment, AppointmentStats, Base, CalendarEvent, Customer, DailyRevenue, EquipmentType,
    Material, PeriodSummary, StatusChange, Ticket, TicketStats, Vehicle, WashType, Worker,
    format_date, format_datetime, format_money, format_time,
};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
#[allow(clippy::option_option)]
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Appointments
// ============================================================================

/// Filters for listing appointments or tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// Status name to match exactly.
    pub status: Option<String>,
    /// Inclusive lower date bound (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`).
    pub date_to: Option<String>,
    /// Case-insensitive text matched against code, plate and customer name.
    pub search: Option<String>,
}

/// API request to book an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateAppointmentRequest {
    pub customer_id: i64,
    pub vehicle_id: Option<i64>,
    /// Defaults to the vehicle's plate when a vehicle is given.
    pub plate: Option<String>,
    pub base_id: Option<i64>,
    pub location: String,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub estimated_duration_minutes: Option<u32>,
    pub priority: Option<String>,
    pub estimated_price: Option<String>,
    pub discount: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
}

/// API request to edit an appointment that still holds its slot.
///
/// Absent fields are left alone. For nullable fields an explicit `null`
/// clears the stored value.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub estimated_duration_minutes: Option<u32>,
    pub priority: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub worker_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub internal_notes: Option<Option<String>>,
}

/// API request to confirm an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfirmAppointmentRequest {
    /// Who confirmed with the customer. Defaults to the actor.
    pub confirmed_by: Option<String>,
}

/// API request to cancel an appointment or a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// API request to start the wash for an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConvertToTicketRequest {
    /// Appended to the ticket notes on a new line.
    pub extra_notes: Option<String>,
}

/// API request to check whether a slot is free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvailabilityRequest {
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub location: String,
    /// An appointment to ignore, used when rescheduling it.
    pub exclude_appointment_id: Option<i64>,
}

/// Month selector for the calendar feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u8,
}

/// An appointment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInfo {
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
    pub estimated_end: String,
    pub estimated_duration_minutes: u32,
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
    pub can_be_cancelled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Appointment> for AppointmentInfo {
    fn from(a: &Appointment) -> Self {
        Self {
            appointment_id: a.appointment_id,
            code: a.code.clone(),
            customer_id: a.customer_id,
            vehicle_id: a.vehicle_id,
            plate: a.plate.clone(),
            base_id: a.base_id,
            location: a.location.clone(),
            wash_type_id: a.wash_type_id,
            equipment_type_id: a.equipment_type_id,
            worker_id: a.worker_id,
            scheduled_date: format_date(a.scheduled_date),
            scheduled_time: format_time(a.scheduled_time),
            estimated_end: format_datetime(a.estimated_end()),
            estimated_duration_minutes: a.estimated_duration_minutes,
            priority: a.priority.as_str().to_string(),
            status: a.status.as_str().to_string(),
            estimated_price: format_money(a.estimated_price),
            discount: format_money(a.discount),
            contact_phone: a.contact_phone.clone(),
            contact_email: a.contact_email.clone(),
            notes: a.notes.clone(),
            internal_notes: a.internal_notes.clone(),
            confirmed_at: a.confirmed_at.map(format_datetime),
            confirmed_by: a.confirmed_by.clone(),
            cancelled_at: a.cancelled_at.map(format_datetime),
            cancellation_reason: a.cancellation_reason.clone(),
            ticket_id: a.ticket_id,
            can_be_cancelled: a.can_be_cancelled(),
            created_at: format_datetime(a.created_at),
            updated_at: format_datetime(a.updated_at),
        }
    }
}

/// One row of an appointment's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeInfo {
    pub from_status: Option<String>,
    pub to_status: String,
    pub changed_by: String,
    pub changed_at: String,
    pub note: Option<String>,
}

impl From<&StatusChange> for StatusChangeInfo {
    fn from(change: &StatusChange) -> Self {
        Self {
            from_status: change.from_status.map(|s| s.as_str().to_string()),
            to_status: change.to_status.as_str().to_string(),
            changed_by: change.changed_by.clone(),
            changed_at: format_datetime(change.changed_at),
            note: change.note.clone(),
        }
    }
}

/// The ticket an appointment produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub ticket_id: i64,
    pub code: String,
    pub status: String,
    pub final_price: Option<String>,
}

impl From<&Ticket> for TicketSummary {
    fn from(t: &Ticket) -> Self {
        Self {
            ticket_id: t.ticket_id,
            code: t.code.clone(),
            status: t.status.as_str().to_string(),
            final_price: t.final_price.map(format_money),
        }
    }
}

/// API response for a single appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetailResponse {
    pub appointment: AppointmentInfo,
    pub customer_name: String,
    /// Whether the wash can be started now.
    pub can_start_wash: bool,
    pub ticket: Option<TicketSummary>,
    pub history: Vec<StatusChangeInfo>,
}

/// API response for listing appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAppointmentsResponse {
    pub appointments: Vec<AppointmentInfo>,
}

/// API response for a conversion into a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertToTicketResponse {
    pub appointment: AppointmentInfo,
    pub ticket: TicketInfo,
    /// A success message.
    pub message: String,
}

/// API response for a slot check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub location: String,
    pub available: bool,
}

/// A count of records in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// API response for appointment statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStatsResponse {
    pub total: u64,
    pub today: u64,
    pub by_status: Vec<StatusCount>,
    /// Past-dated appointments still scheduled or confirmed.
    pub overdue: u64,
}

impl From<&AppointmentStats> for AppointmentStatsResponse {
    fn from(stats: &AppointmentStats) -> Self {
        Self {
            total: stats.total,
            today: stats.today,
            by_status: stats
                .by_status
                .iter()
                .map(|(status, count)| StatusCount {
                    status: status.as_str().to_string(),
                    count: *count,
                })
                .collect(),
            overdue: stats.overdue,
        }
    }
}

/// An appointment placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventInfo {
    pub appointment_id: i64,
    pub code: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub status: String,
    pub color: String,
}

impl From<&CalendarEvent> for CalendarEventInfo {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            appointment_id: event.appointment_id,
            code: event.code.clone(),
            title: event.title.clone(),
            start: format_datetime(event.start),
            end: format_datetime(event.end),
            status: event.status.as_str().to_string(),
            color: event.color.to_string(),
        }
    }
}

/// API response for the calendar feed of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u8,
    pub events: Vec<CalendarEventInfo>,
}

// ============================================================================
// Tickets
// ============================================================================

/// API request to open a walk-in ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTicketRequest {
    pub customer_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    /// Defaults to the vehicle's plate when a vehicle is given.
    pub plate: Option<String>,
    pub base_id: Option<i64>,
    pub location: Option<String>,
    pub wash_type_id: Option<i64>,
    pub equipment_type_id: Option<i64>,
    pub worker_id: Option<i64>,
    /// Defaults to now.
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    /// Defaults to today.
    pub service_date: Option<String>,
    pub service_price: Option<String>,
    pub discount: Option<String>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
}

/// API request to edit a ticket's pricing and notes.
///
/// Absent fields are left alone; an explicit `null` clears nullable ones.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub service_price: Option<Option<String>>,
    pub discount: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub worker_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub payment_note: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contract: Option<Option<String>>,
}

/// Service-date range for the period report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PeriodQuery {
    pub from: String,
    pub to: String,
}

/// A ticket as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
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
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
    pub payment_note: Option<String>,
    pub contract: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Ticket> for TicketInfo {
    fn from(t: &Ticket) -> Self {
        Self {
            ticket_id: t.ticket_id,
            code: t.code.clone(),
            customer_id: t.customer_id,
            vehicle_id: t.vehicle_id,
            plate: t.plate.clone(),
            base_id: t.base_id,
            location: t.location.clone(),
            wash_type_id: t.wash_type_id,
            equipment_type_id: t.equipment_type_id,
            worker_id: t.worker_id,
            started_at: format_datetime(t.started_at),
            ended_at: t.ended_at.map(format_datetime),
            service_date: format_date(t.service_date),
            status: t.status.as_str().to_string(),
            service_price: t.service_price.map(format_money),
            discount: format_money(t.discount),
            final_price: t.final_price.map(format_money),
            duration_minutes: t.duration_minutes(),
            notes: t.notes.clone(),
            payment_note: t.payment_note.clone(),
            contract: t.contract.clone(),
            created_at: format_datetime(t.created_at),
            updated_at: format_datetime(t.updated_at),
        }
    }
}

/// API response for a single ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDetailResponse {
    pub ticket: TicketInfo,
    /// Minutes since the wash started, while it is in progress.
    pub elapsed_minutes: Option<i64>,
    /// The appointment that produced the ticket, if any.
    pub appointment_id: Option<i64>,
    pub appointment_code: Option<String>,
}

/// API response for listing tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<TicketInfo>,
}

/// API response for ticket statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStatsResponse {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
    pub revenue_today: String,
    pub revenue_month: String,
    pub average_duration_minutes: Option<i64>,
}

impl From<&TicketStats> for TicketStatsResponse {
    fn from(stats: &TicketStats) -> Self {
        Self {
            total: stats.total,
            by_status: stats
                .by_status
                .iter()
                .map(|(status, count)| StatusCount {
                    status: status.as_str().to_string(),
                    count: *count,
                })
                .collect(),
            revenue_today: format_money(stats.revenue_today),
            revenue_month: format_money(stats.revenue_month),
            average_duration_minutes: stats.average_duration_minutes,
        }
    }
}

/// Revenue of one service date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenueInfo {
    pub date: String,
    pub ticket_count: u64,
    pub revenue: String,
}

impl From<&DailyRevenue> for DailyRevenueInfo {
    fn from(day: &DailyRevenue) -> Self {
        Self {
            date: format_date(day.date),
            ticket_count: day.ticket_count,
            revenue: format_money(day.revenue),
        }
    }
}

/// API response for the period report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReportResponse {
    pub from: String,
    pub to: String,
    pub ticket_count: u64,
    pub concluded_count: u64,
    pub revenue: String,
    pub average_ticket: String,
    pub daily: Vec<DailyRevenueInfo>,
    pub tickets: Vec<TicketInfo>,
}

impl PeriodReportResponse {
    /// Builds the report from its summary and the tickets it covers.
    #[must_use]
    pub fn new(summary: &PeriodSummary, tickets: &[Ticket]) -> Self {
        Self {
            from: format_date(summary.from),
            to: format_date(summary.to),
            ticket_count: summary.ticket_count,
            concluded_count: summary.concluded_count,
            revenue: format_money(summary.revenue),
            average_ticket: format_money(summary.average_ticket),
            daily: summary.daily.iter().map(DailyRevenueInfo::from).collect(),
            tickets: tickets.iter().map(TicketInfo::from).collect(),
        }
    }
}

// ============================================================================
// Reference data
// ============================================================================

/// Filters for listing customers and workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ActiveQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// Filters for listing vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct VehicleQuery {
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub active_only: bool,
}

/// API request to create or replace a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomerRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// A customer as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub customer_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
}

impl From<&Customer> for CustomerInfo {
    fn from(c: &Customer) -> Self {
        Self {
            customer_id: c.customer_id,
            name: c.name.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            notes: c.notes.clone(),
            active: c.active,
        }
    }
}

/// API request to create or replace a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VehicleRequest {
    pub customer_id: i64,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub year: Option<u16>,
    pub color: Option<String>,
    /// Defaults to `car`.
    pub kind: Option<String>,
    pub notes: Option<String>,
}

/// A vehicle as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub vehicle_id: i64,
    pub customer_id: i64,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub year: Option<u16>,
    pub color: Option<String>,
    pub kind: String,
    pub notes: Option<String>,
    pub active: bool,
}

impl From<&Vehicle> for VehicleInfo {
    fn from(v: &Vehicle) -> Self {
        Self {
            vehicle_id: v.vehicle_id,
            customer_id: v.customer_id,
            plate: v.plate.clone(),
            model: v.model.clone(),
            make: v.make.clone(),
            year: v.year,
            color: v.color.clone(),
            kind: v.kind.as_str().to_string(),
            notes: v.notes.clone(),
            active: v.active,
        }
    }
}

/// API request to create or replace a worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkerRequest {
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: Option<String>,
    pub notes: Option<String>,
}

/// A worker as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerInfo {
    pub worker_id: i64,
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
}

impl From<&Worker> for WorkerInfo {
    fn from(w: &Worker) -> Self {
        Self {
            worker_id: w.worker_id,
            name: w.name.clone(),
            tax_id: w.tax_id.clone(),
            phone: w.phone.clone(),
            hire_date: format_date(w.hire_date),
            salary: w.salary.map(format_money),
            notes: w.notes.clone(),
            active: w.active,
        }
    }
}

/// API request to create or rename a base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BaseRequest {
    pub name: String,
}

/// A base as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseInfo {
    pub base_id: i64,
    pub name: String,
}

impl From<&Base> for BaseInfo {
    fn from(b: &Base) -> Self {
        Self {
            base_id: b.base_id,
            name: b.name.clone(),
        }
    }
}

/// API request to create or replace a wash type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WashTypeRequest {
    pub name: String,
    /// Defaults to `0.00`.
    pub base_price: Option<String>,
}

/// A wash type as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WashTypeInfo {
    pub wash_type_id: i64,
    pub name: String,
    pub base_price: String,
}

impl From<&WashType> for WashTypeInfo {
    fn from(w: &WashType) -> Self {
        Self {
            wash_type_id: w.wash_type_id,
            name: w.name.clone(),
            base_price: format_money(w.base_price),
        }
    }
}

/// API request to create or replace an equipment type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EquipmentTypeRequest {
    pub name: String,
    /// Defaults to `1.00`.
    pub price_multiplier: Option<String>,
}

/// An equipment type as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentTypeInfo {
    pub equipment_type_id: i64,
    pub name: String,
    pub price_multiplier: String,
}

impl From<&EquipmentType> for EquipmentTypeInfo {
    fn from(e: &EquipmentType) -> Self {
        Self {
            equipment_type_id: e.equipment_type_id,
            name: e.name.clone(),
            price_multiplier: format_money(e.price_multiplier),
        }
    }
}

/// API request to add a material to a wash type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MaterialRequest {
    pub name: String,
    pub cost: String,
}

/// A material as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub material_id: i64,
    pub wash_type_id: i64,
    pub name: String,
    pub cost: String,
}

impl From<&Material> for MaterialInfo {
    fn from(m: &Material) -> Self {
        Self {
            material_id: m.material_id,
            wash_type_id: m.wash_type_id,
            name: m.name.clone(),
            cost: format_money(m.cost),
        }
    }
}

/// API response for deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// A success message.
    pub message: String,
}
