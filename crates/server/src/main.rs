// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use washbay::{Clock, CodeGenerator, DEFAULT_TIMEZONE, RandomCodeGenerator, SystemClock};
use washbay_api::{
    ActiveQuery, ApiError, AppointmentDetailResponse, AppointmentInfo, AppointmentStatsResponse,
    AuthenticatedActor, AvailabilityRequest, AvailabilityResponse, BaseInfo, BaseRequest,
    CalendarQuery, CalendarResponse, CancelRequest, ConfirmAppointmentRequest,
    ConvertToTicketRequest, ConvertToTicketResponse, CreateAppointmentRequest,
    CreateTicketRequest, CustomerInfo, CustomerRequest, DeleteResponse, EquipmentTypeInfo,
    EquipmentTypeRequest, ListAppointmentsResponse, ListQuery, ListTicketsResponse, MaterialInfo,
    MaterialRequest, PeriodQuery, PeriodReportResponse, TicketDetailResponse, TicketInfo,
    TicketStatsResponse, UpdateAppointmentRequest, UpdateTicketRequest, VehicleInfo,
    VehicleQuery, VehicleRequest, WashTypeInfo, WashTypeRequest, WorkerInfo, WorkerRequest,
    authenticate,
};
use washbay_persistence::Persistence;

/// Washbay Server - HTTP server for the Washbay car wash system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "WASHBAY_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "WASHBAY_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "WASHBAY_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// IANA timezone the business operates in
    #[arg(short, long, env = "WASHBAY_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex, so store access is
/// serialized across requests.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    clock: Arc<dyn Clock>,
    codes: Arc<dyn CodeGenerator>,
}

/// A request body with the acting user attached.
///
/// Every mutating endpoint takes `actor_id` and `actor_role` next to its
/// own fields.
#[derive(Debug, Deserialize)]
struct Authored<T> {
    actor_id: String,
    actor_role: String,
    #[serde(flatten)]
    request: T,
}

impl<T> Authored<T> {
    fn actor(&self) -> Result<AuthenticatedActor, HttpError> {
        authenticate(&self.actor_id, &self.actor_role)
            .map_err(|e| HttpError::from(ApiError::from(e)))
    }
}

/// Body of actions that carry nothing but the actor.
#[derive(Debug, Default, Deserialize)]
struct NoFields {}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Machine-readable error kind.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::SchedulingConflict { .. } | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::IllegalTransition { .. } | ApiError::ConversionNotAllowed { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;

// ============================================================================
// Appointments
// ============================================================================

/// Handler for GET `/appointments`.
async fn handle_list_appointments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> HttpResult<ListAppointmentsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_appointments(&mut persistence, &query)?))
}

/// Handler for POST `/appointments`.
///
/// Books a new appointment.
async fn handle_create_appointment(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<CreateAppointmentRequest>>,
) -> HttpResult<AppointmentInfo> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        location = %req.request.location,
        "Handling create_appointment request"
    );
    let actor: AuthenticatedActor = req.actor()?;

    let mut persistence = app_state.persistence.lock().await;
    let appointment: AppointmentInfo = washbay_api::create_appointment(
        &mut persistence,
        app_state.clock.as_ref(),
        app_state.codes.as_ref(),
        &req.request,
        &actor,
    )?;
    drop(persistence);

    info!(
        appointment_id = appointment.appointment_id,
        code = %appointment.code,
        "Successfully booked appointment"
    );
    Ok(Json(appointment))
}

/// Handler for GET `/appointments/{id}`.
async fn handle_get_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
) -> HttpResult<AppointmentDetailResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_appointment(
        &mut persistence,
        app_state.clock.as_ref(),
        appointment_id,
    )?))
}

/// Handler for PUT `/appointments/{id}`.
async fn handle_update_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    Json(req): Json<Authored<UpdateAppointmentRequest>>,
) -> HttpResult<AppointmentInfo> {
    info!(appointment_id, actor_id = %req.actor_id, "Handling update_appointment request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_appointment(
        &mut persistence,
        app_state.clock.as_ref(),
        appointment_id,
        &req.request,
        &actor,
    )?))
}

/// Handler for POST `/appointments/{id}/confirm`.
async fn handle_confirm_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    Json(req): Json<Authored<ConfirmAppointmentRequest>>,
) -> HttpResult<AppointmentInfo> {
    info!(appointment_id, actor_id = %req.actor_id, "Handling confirm_appointment request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::confirm_appointment(
        &mut persistence,
        app_state.clock.as_ref(),
        appointment_id,
        &req.request,
        &actor,
    )?))
}

/// Handler for POST `/appointments/{id}/cancel`.
async fn handle_cancel_appointment(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    Json(req): Json<Authored<CancelRequest>>,
) -> HttpResult<AppointmentInfo> {
    info!(appointment_id, actor_id = %req.actor_id, "Handling cancel_appointment request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::cancel_appointment(
        &mut persistence,
        app_state.clock.as_ref(),
        appointment_id,
        &req.request,
        &actor,
    )?))
}

/// Handler for POST `/appointments/{id}/no-show`.
async fn handle_mark_no_show(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<AppointmentInfo> {
    info!(appointment_id, actor_id = %req.actor_id, "Handling mark_no_show request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::mark_no_show(
        &mut persistence,
        app_state.clock.as_ref(),
        appointment_id,
        &actor,
    )?))
}

/// Handler for POST `/appointments/{id}/convert-to-ticket`.
///
/// Starts the wash: opens a ticket and moves the appointment in progress.
async fn handle_convert_to_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(appointment_id): Path<i64>,
    Json(req): Json<Authored<ConvertToTicketRequest>>,
) -> HttpResult<ConvertToTicketResponse> {
    info!(appointment_id, actor_id = %req.actor_id, "Handling convert_to_ticket request");
    let actor: AuthenticatedActor = req.actor()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ConvertToTicketResponse = washbay_api::convert_to_ticket(
        &mut persistence,
        app_state.clock.as_ref(),
        app_state.codes.as_ref(),
        appointment_id,
        &req.request,
        &actor,
    )?;
    drop(persistence);

    info!(
        appointment_id,
        ticket_id = response.ticket.ticket_id,
        "Successfully converted appointment"
    );
    Ok(Json(response))
}

/// Handler for POST `/appointments/availability`.
async fn handle_check_availability(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AvailabilityRequest>,
) -> HttpResult<AvailabilityResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::check_availability(&mut persistence, &req)?))
}

/// Handler for GET `/appointments/stats`.
async fn handle_appointment_stats(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<AppointmentStatsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::appointment_stats(
        &mut persistence,
        app_state.clock.as_ref(),
    )?))
}

/// Handler for GET `/appointments/calendar`.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CalendarQuery>,
) -> HttpResult<CalendarResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::calendar(&mut persistence, &query)?))
}

// ============================================================================
// Tickets
// ============================================================================

/// Handler for GET `/tickets`.
async fn handle_list_tickets(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> HttpResult<ListTicketsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_tickets(&mut persistence, &query)?))
}

/// Handler for POST `/tickets`.
///
/// Opens a walk-in ticket.
async fn handle_create_ticket(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<CreateTicketRequest>>,
) -> HttpResult<TicketInfo> {
    info!(actor_id = %req.actor_id, role = %req.actor_role, "Handling create_ticket request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_ticket(
        &mut persistence,
        app_state.clock.as_ref(),
        app_state.codes.as_ref(),
        &req.request,
        &actor,
    )?))
}

/// Handler for GET `/tickets/{id}`.
async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
) -> HttpResult<TicketDetailResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_ticket(
        &mut persistence,
        app_state.clock.as_ref(),
        ticket_id,
    )?))
}

/// Handler for PUT `/tickets/{id}`.
async fn handle_update_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<Authored<UpdateTicketRequest>>,
) -> HttpResult<TicketInfo> {
    info!(ticket_id, actor_id = %req.actor_id, "Handling update_ticket request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_ticket(
        &mut persistence,
        app_state.clock.as_ref(),
        ticket_id,
        &req.request,
        &actor,
    )?))
}

/// Handler for POST `/tickets/{id}/complete`.
async fn handle_complete_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<TicketInfo> {
    info!(ticket_id, actor_id = %req.actor_id, "Handling complete_ticket request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::complete_ticket(
        &mut persistence,
        app_state.clock.as_ref(),
        ticket_id,
        &actor,
    )?))
}

/// Handler for POST `/tickets/{id}/cancel`.
async fn handle_cancel_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<Authored<CancelRequest>>,
) -> HttpResult<TicketInfo> {
    info!(ticket_id, actor_id = %req.actor_id, "Handling cancel_ticket request");
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::cancel_ticket(
        &mut persistence,
        app_state.clock.as_ref(),
        ticket_id,
        &req.request,
        &actor,
    )?))
}

/// Handler for GET `/tickets/stats`.
async fn handle_ticket_stats(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<TicketStatsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::ticket_stats(
        &mut persistence,
        app_state.clock.as_ref(),
    )?))
}

/// Handler for GET `/reports/period`.
async fn handle_period_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PeriodQuery>,
) -> HttpResult<PeriodReportResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::period_report(&mut persistence, &query)?))
}

// ============================================================================
// Customers, vehicles and workers
// ============================================================================

async fn handle_list_customers(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActiveQuery>,
) -> HttpResult<Vec<CustomerInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_customers(&mut persistence, &query)?))
}

async fn handle_create_customer(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<CustomerRequest>>,
) -> HttpResult<CustomerInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_customer(
        &mut persistence,
        &req.request,
        &actor,
    )?))
}

async fn handle_get_customer(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
) -> HttpResult<CustomerInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_customer(&mut persistence, customer_id)?))
}

async fn handle_update_customer(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
    Json(req): Json<Authored<CustomerRequest>>,
) -> HttpResult<CustomerInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_customer(
        &mut persistence,
        customer_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_deactivate_customer(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<CustomerInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::deactivate_customer(
        &mut persistence,
        customer_id,
        &actor,
    )?))
}

async fn handle_list_vehicles(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<VehicleQuery>,
) -> HttpResult<Vec<VehicleInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_vehicles(&mut persistence, &query)?))
}

async fn handle_create_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<VehicleRequest>>,
) -> HttpResult<VehicleInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_vehicle(
        &mut persistence,
        &req.request,
        &actor,
    )?))
}

async fn handle_get_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Path(vehicle_id): Path<i64>,
) -> HttpResult<VehicleInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_vehicle(&mut persistence, vehicle_id)?))
}

/// Handler for GET `/vehicles/by-plate/{plate}`.
async fn handle_get_vehicle_by_plate(
    AxumState(app_state): AxumState<AppState>,
    Path(plate): Path<String>,
) -> HttpResult<VehicleInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_vehicle_by_plate(
        &mut persistence,
        &plate,
    )?))
}

async fn handle_update_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Path(vehicle_id): Path<i64>,
    Json(req): Json<Authored<VehicleRequest>>,
) -> HttpResult<VehicleInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_vehicle(
        &mut persistence,
        vehicle_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_deactivate_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Path(vehicle_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<VehicleInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::deactivate_vehicle(
        &mut persistence,
        vehicle_id,
        &actor,
    )?))
}

async fn handle_list_workers(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActiveQuery>,
) -> HttpResult<Vec<WorkerInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_workers(&mut persistence, &query)?))
}

async fn handle_create_worker(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<WorkerRequest>>,
) -> HttpResult<WorkerInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_worker(
        &mut persistence,
        &req.request,
        &actor,
    )?))
}

async fn handle_get_worker(
    AxumState(app_state): AxumState<AppState>,
    Path(worker_id): Path<i64>,
) -> HttpResult<WorkerInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_worker(&mut persistence, worker_id)?))
}

async fn handle_update_worker(
    AxumState(app_state): AxumState<AppState>,
    Path(worker_id): Path<i64>,
    Json(req): Json<Authored<WorkerRequest>>,
) -> HttpResult<WorkerInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_worker(
        &mut persistence,
        worker_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_deactivate_worker(
    AxumState(app_state): AxumState<AppState>,
    Path(worker_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<WorkerInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::deactivate_worker(
        &mut persistence,
        worker_id,
        &actor,
    )?))
}

// ============================================================================
// Catalog
// ============================================================================

async fn handle_list_bases(AxumState(app_state): AxumState<AppState>) -> HttpResult<Vec<BaseInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_bases(&mut persistence)?))
}

async fn handle_create_base(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<BaseRequest>>,
) -> HttpResult<BaseInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_base(
        &mut persistence,
        &req.request,
        &actor,
    )?))
}

async fn handle_get_base(
    AxumState(app_state): AxumState<AppState>,
    Path(base_id): Path<i64>,
) -> HttpResult<BaseInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_base(&mut persistence, base_id)?))
}

async fn handle_update_base(
    AxumState(app_state): AxumState<AppState>,
    Path(base_id): Path<i64>,
    Json(req): Json<Authored<BaseRequest>>,
) -> HttpResult<BaseInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_base(
        &mut persistence,
        base_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_delete_base(
    AxumState(app_state): AxumState<AppState>,
    Path(base_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<DeleteResponse> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::delete_base(
        &mut persistence,
        base_id,
        &actor,
    )?))
}

async fn handle_list_wash_types(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<Vec<WashTypeInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_wash_types(&mut persistence)?))
}

async fn handle_create_wash_type(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<WashTypeRequest>>,
) -> HttpResult<WashTypeInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_wash_type(
        &mut persistence,
        &req.request,
        &actor,
    )?))
}

async fn handle_get_wash_type(
    AxumState(app_state): AxumState<AppState>,
    Path(wash_type_id): Path<i64>,
) -> HttpResult<WashTypeInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_wash_type(
        &mut persistence,
        wash_type_id,
    )?))
}

async fn handle_update_wash_type(
    AxumState(app_state): AxumState<AppState>,
    Path(wash_type_id): Path<i64>,
    Json(req): Json<Authored<WashTypeRequest>>,
) -> HttpResult<WashTypeInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_wash_type(
        &mut persistence,
        wash_type_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_delete_wash_type(
    AxumState(app_state): AxumState<AppState>,
    Path(wash_type_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<DeleteResponse> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::delete_wash_type(
        &mut persistence,
        wash_type_id,
        &actor,
    )?))
}

/// Handler for GET `/wash-types/{id}/materials`.
async fn handle_list_materials(
    AxumState(app_state): AxumState<AppState>,
    Path(wash_type_id): Path<i64>,
) -> HttpResult<Vec<MaterialInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_materials(
        &mut persistence,
        wash_type_id,
    )?))
}

/// Handler for POST `/wash-types/{id}/materials`.
async fn handle_create_material(
    AxumState(app_state): AxumState<AppState>,
    Path(wash_type_id): Path<i64>,
    Json(req): Json<Authored<MaterialRequest>>,
) -> HttpResult<MaterialInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_material(
        &mut persistence,
        wash_type_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_delete_material(
    AxumState(app_state): AxumState<AppState>,
    Path(material_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<DeleteResponse> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::delete_material(
        &mut persistence,
        material_id,
        &actor,
    )?))
}

async fn handle_list_equipment_types(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<Vec<EquipmentTypeInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::list_equipment_types(&mut persistence)?))
}

async fn handle_create_equipment_type(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authored<EquipmentTypeRequest>>,
) -> HttpResult<EquipmentTypeInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::create_equipment_type(
        &mut persistence,
        &req.request,
        &actor,
    )?))
}

async fn handle_get_equipment_type(
    AxumState(app_state): AxumState<AppState>,
    Path(equipment_type_id): Path<i64>,
) -> HttpResult<EquipmentTypeInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::get_equipment_type(
        &mut persistence,
        equipment_type_id,
    )?))
}

async fn handle_update_equipment_type(
    AxumState(app_state): AxumState<AppState>,
    Path(equipment_type_id): Path<i64>,
    Json(req): Json<Authored<EquipmentTypeRequest>>,
) -> HttpResult<EquipmentTypeInfo> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::update_equipment_type(
        &mut persistence,
        equipment_type_id,
        &req.request,
        &actor,
    )?))
}

async fn handle_delete_equipment_type(
    AxumState(app_state): AxumState<AppState>,
    Path(equipment_type_id): Path<i64>,
    Json(req): Json<Authored<NoFields>>,
) -> HttpResult<DeleteResponse> {
    let actor: AuthenticatedActor = req.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(washbay_api::delete_equipment_type(
        &mut persistence,
        equipment_type_id,
        &actor,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/appointments",
            get(handle_list_appointments).post(handle_create_appointment),
        )
        .route("/appointments/stats", get(handle_appointment_stats))
        .route("/appointments/calendar", get(handle_calendar))
        .route("/appointments/availability", post(handle_check_availability))
        .route(
            "/appointments/{id}",
            get(handle_get_appointment).put(handle_update_appointment),
        )
        .route("/appointments/{id}/confirm", post(handle_confirm_appointment))
        .route("/appointments/{id}/cancel", post(handle_cancel_appointment))
        .route("/appointments/{id}/no-show", post(handle_mark_no_show))
        .route(
            "/appointments/{id}/convert-to-ticket",
            post(handle_convert_to_ticket),
        )
        .route("/tickets", get(handle_list_tickets).post(handle_create_ticket))
        .route("/tickets/stats", get(handle_ticket_stats))
        .route(
            "/tickets/{id}",
            get(handle_get_ticket).put(handle_update_ticket),
        )
        .route("/tickets/{id}/complete", post(handle_complete_ticket))
        .route("/tickets/{id}/cancel", post(handle_cancel_ticket))
        .route("/reports/period", get(handle_period_report))
        .route(
            "/customers",
            get(handle_list_customers).post(handle_create_customer),
        )
        .route(
            "/customers/{id}",
            get(handle_get_customer).put(handle_update_customer),
        )
        .route(
            "/customers/{id}/deactivate",
            post(handle_deactivate_customer),
        )
        .route(
            "/vehicles",
            get(handle_list_vehicles).post(handle_create_vehicle),
        )
        .route(
            "/vehicles/by-plate/{plate}",
            get(handle_get_vehicle_by_plate),
        )
        .route(
            "/vehicles/{id}",
            get(handle_get_vehicle).put(handle_update_vehicle),
        )
        .route("/vehicles/{id}/deactivate", post(handle_deactivate_vehicle))
        .route("/workers", get(handle_list_workers).post(handle_create_worker))
        .route(
            "/workers/{id}",
            get(handle_get_worker).put(handle_update_worker),
        )
        .route("/workers/{id}/deactivate", post(handle_deactivate_worker))
        .route("/bases", get(handle_list_bases).post(handle_create_base))
        .route(
            "/bases/{id}",
            get(handle_get_base)
                .put(handle_update_base)
                .delete(handle_delete_base),
        )
        .route(
            "/wash-types",
            get(handle_list_wash_types).post(handle_create_wash_type),
        )
        .route(
            "/wash-types/{id}",
            get(handle_get_wash_type)
                .put(handle_update_wash_type)
                .delete(handle_delete_wash_type),
        )
        .route(
            "/wash-types/{id}/materials",
            get(handle_list_materials).post(handle_create_material),
        )
        .route("/materials/{id}", delete(handle_delete_material))
        .route(
            "/equipment-types",
            get(handle_list_equipment_types).post(handle_create_equipment_type),
        )
        .route(
            "/equipment-types/{id}",
            get(handle_get_equipment_type)
                .put(handle_update_equipment_type)
                .delete(handle_delete_equipment_type),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Washbay Server");

    let clock: SystemClock = SystemClock::from_name(&args.timezone)?;
    info!(timezone = %args.timezone, "Using business timezone");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(clock),
        codes: Arc::new(RandomCodeGenerator),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
