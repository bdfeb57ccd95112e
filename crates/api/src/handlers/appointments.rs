// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, PrimitiveDateTime, Time};
use tracing::info;
use washbay::{
    AppointmentCommand, AppointmentDraft, AppointmentTransition, Clock, CodeGenerator,
    apply_appointment_command, prepare_appointment, prepare_appointment_update,
};
use washbay_domain::{
    Appointment, AppointmentChanges, AppointmentStatus, Customer, NewAppointment, Priority, Slot,
    StatusChange, Ticket, Vehicle, clean_text, format_date, format_time, parse_date, parse_time,
    require_text, validate_date_range,
};
use washbay_persistence::{AppointmentFilter, AppointmentOutcome, Persistence};

use super::{References, check_references, parse_amount, parse_optional_date, resolve_plate};
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AppointmentDetailResponse, AppointmentInfo, AvailabilityRequest, AvailabilityResponse,
    CancelRequest, ConfirmAppointmentRequest, ConvertToTicketRequest, ConvertToTicketResponse,
    CreateAppointmentRequest, ListAppointmentsResponse, ListQuery, StatusChangeInfo, TicketInfo,
    TicketSummary, UpdateAppointmentRequest,
};

const RESOURCE: &str = "Appointment";

fn load_appointment(
    persistence: &mut Persistence,
    appointment_id: i64,
) -> Result<Appointment, ApiError> {
    persistence
        .get_appointment(appointment_id)
        .map_err(|e| translate_persistence_error(e, RESOURCE))
}

/// Applies a status command to a stored appointment.
fn apply_command(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    appointment_id: i64,
    command: AppointmentCommand,
    actor: &AuthenticatedActor,
) -> Result<AppointmentTransition, ApiError> {
    AuthorizationService::authorize_front_desk(actor)?;
    let appointment: Appointment = load_appointment(persistence, appointment_id)?;
    apply_appointment_command(&appointment, command, &actor.id, clock.now())
        .map_err(translate_core_error)
}

fn persist(
    persistence: &mut Persistence,
    transition: &AppointmentTransition,
    ticket_code: Option<&str>,
) -> Result<AppointmentOutcome, ApiError> {
    let outcome: AppointmentOutcome = persistence
        .persist_appointment_transition(transition, ticket_code)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;
    info!(
        appointment_id = outcome.appointment.appointment_id,
        code = %outcome.appointment.code,
        status = %outcome.appointment.status,
        "Appointment status changed"
    );
    Ok(outcome)
}

/// Lists appointments ordered by date and time.
///
/// # Errors
///
/// Returns an error if a filter value is malformed or the query fails.
pub fn list_appointments(
    persistence: &mut Persistence,
    query: &ListQuery,
) -> Result<ListAppointmentsResponse, ApiError> {
    let status: Option<AppointmentStatus> = clean_text(query.status.as_deref())
        .map(|s| s.parse())
        .transpose()
        .map_err(translate_domain_error)?;
    let date_from: Option<Date> = parse_optional_date(query.date_from.as_deref())?;
    let date_to: Option<Date> = parse_optional_date(query.date_to.as_deref())?;
    if let (Some(from), Some(to)) = (date_from, date_to) {
        validate_date_range(from, to).map_err(translate_domain_error)?;
    }

    let filter: AppointmentFilter = AppointmentFilter {
        status,
        date_from,
        date_to,
        search: clean_text(query.search.as_deref()),
    };
    let appointments: Vec<Appointment> = persistence
        .list_appointments(&filter)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    Ok(ListAppointmentsResponse {
        appointments: appointments.iter().map(AppointmentInfo::from).collect(),
    })
}

/// Books an appointment.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `clock` - Source of the current local instant
/// * `codes` - Generator for the appointment code
/// * `request` - The booking request
/// * `actor` - The authenticated actor performing this action
///
/// # Returns
///
/// * `Ok(AppointmentInfo)` with the stored appointment, in `scheduled`
/// * `Err(ApiError)` if the request is invalid or the slot is taken
///
/// # Errors
///
/// Returns an error if:
/// - Any field fails validation, or the slot is in the past or out of hours
/// - A referenced customer, vehicle or worker is missing or inactive
/// - Another active appointment holds the slot
pub fn create_appointment(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    codes: &dyn CodeGenerator,
    request: &CreateAppointmentRequest,
    actor: &AuthenticatedActor,
) -> Result<AppointmentInfo, ApiError> {
    AuthorizationService::authorize_front_desk(actor)?;

    let scheduled_date: Date =
        parse_date(&request.scheduled_date).map_err(translate_domain_error)?;
    let scheduled_time: Time =
        parse_time(&request.scheduled_time).map_err(translate_domain_error)?;
    let priority: Option<Priority> = clean_text(request.priority.as_deref())
        .map(|p| p.parse())
        .transpose()
        .map_err(translate_domain_error)?;

    let vehicle: Option<Vehicle> = check_references(
        persistence,
        References {
            customer_id: Some(request.customer_id),
            vehicle_id: request.vehicle_id,
            worker_id: request.worker_id,
            base_id: request.base_id,
            wash_type_id: request.wash_type_id,
            equipment_type_id: request.equipment_type_id,
        },
    )?;

    let draft: AppointmentDraft = AppointmentDraft {
        customer_id: request.customer_id,
        vehicle_id: request.vehicle_id,
        plate: resolve_plate(request.plate.as_deref(), vehicle.as_ref()),
        base_id: request.base_id,
        location: request.location.clone(),
        wash_type_id: request.wash_type_id,
        equipment_type_id: request.equipment_type_id,
        worker_id: request.worker_id,
        scheduled_date,
        scheduled_time,
        estimated_duration_minutes: request.estimated_duration_minutes,
        priority,
        estimated_price: parse_amount("estimated_price", request.estimated_price.as_deref())?,
        discount: parse_amount("discount", request.discount.as_deref())?,
        contact_phone: request.contact_phone.clone(),
        contact_email: request.contact_email.clone(),
        notes: request.notes.clone(),
        internal_notes: request.internal_notes.clone(),
    };

    let now: PrimitiveDateTime = clock.now();
    let new_appointment: NewAppointment =
        prepare_appointment(draft, now).map_err(translate_core_error)?;
    let code: String = codes.appointment_code();

    let appointment: Appointment = persistence
        .create_appointment(&new_appointment, &code, &actor.id, now)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    Ok(AppointmentInfo::from(&appointment))
}

/// Retrieves an appointment with its customer, ticket and status history.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the appointment does not exist.
pub fn get_appointment(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    appointment_id: i64,
) -> Result<AppointmentDetailResponse, ApiError> {
    let appointment: Appointment = load_appointment(persistence, appointment_id)?;
    let customer: Customer = persistence
        .get_customer(appointment.customer_id)
        .map_err(|e| translate_persistence_error(e, "Customer"))?;
    let ticket: Option<Ticket> = appointment
        .ticket_id
        .map(|ticket_id| persistence.get_ticket(ticket_id))
        .transpose()
        .map_err(|e| translate_persistence_error(e, "Ticket"))?;
    let history: Vec<StatusChange> = persistence
        .get_status_history(appointment_id)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    Ok(AppointmentDetailResponse {
        can_start_wash: appointment.can_start_wash(clock.now()),
        appointment: AppointmentInfo::from(&appointment),
        customer_name: customer.name,
        ticket: ticket.as_ref().map(TicketSummary::from),
        history: history.iter().map(StatusChangeInfo::from).collect(),
    })
}

/// Edits an appointment that still holds its slot.
///
/// A new date or time is checked against the schedule rules again, and the
/// slot is re-checked excluding the appointment itself.
///
/// # Errors
///
/// Returns an error if:
/// - The appointment does not exist or is no longer scheduled or confirmed
/// - Any edited field is invalid, or the new worker is inactive
/// - The new slot is taken
pub fn update_appointment(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    appointment_id: i64,
    request: &UpdateAppointmentRequest,
    actor: &AuthenticatedActor,
) -> Result<AppointmentInfo, ApiError> {
    AuthorizationService::authorize_front_desk(actor)?;
    let current: Appointment = load_appointment(persistence, appointment_id)?;

    let changes: AppointmentChanges = AppointmentChanges {
        scheduled_date: request
            .scheduled_date
            .as_deref()
            .map(parse_date)
            .transpose()
            .map_err(translate_domain_error)?,
        scheduled_time: request
            .scheduled_time
            .as_deref()
            .map(parse_time)
            .transpose()
            .map_err(translate_domain_error)?,
        estimated_duration_minutes: request.estimated_duration_minutes,
        priority: request
            .priority
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(translate_domain_error)?,
        location: request.location.clone(),
        worker_id: request.worker_id,
        contact_phone: request.contact_phone.clone(),
        contact_email: request.contact_email.clone(),
        notes: request.notes.clone(),
        internal_notes: request.internal_notes.clone(),
    };
    if let Some(Some(worker_id)) = changes.worker_id {
        check_references(
            persistence,
            References {
                worker_id: Some(worker_id),
                ..References::default()
            },
        )?;
    }

    let updated: Appointment = prepare_appointment_update(&current, changes, clock.now())
        .map_err(translate_core_error)?;
    let saved: Appointment = persistence
        .save_appointment(&updated)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    info!(
        appointment_id,
        actor = %actor.id,
        "Appointment updated"
    );
    Ok(AppointmentInfo::from(&saved))
}

/// Confirms a scheduled appointment.
///
/// # Errors
///
/// Returns `ApiError::IllegalTransition` unless the appointment is scheduled.
pub fn confirm_appointment(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    appointment_id: i64,
    request: &ConfirmAppointmentRequest,
    actor: &AuthenticatedActor,
) -> Result<AppointmentInfo, ApiError> {
    let transition: AppointmentTransition = apply_command(
        persistence,
        clock,
        appointment_id,
        AppointmentCommand::Confirm {
            confirmed_by: request.confirmed_by.clone(),
        },
        actor,
    )?;
    let outcome: AppointmentOutcome = persist(persistence, &transition, None)?;
    Ok(AppointmentInfo::from(&outcome.appointment))
}

/// Cancels a scheduled or confirmed appointment, freeing its slot.
///
/// # Errors
///
/// Returns an error if:
/// - No reason is given
/// - The appointment is no longer scheduled or confirmed
pub fn cancel_appointment(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    appointment_id: i64,
    request: &CancelRequest,
    actor: &AuthenticatedActor,
) -> Result<AppointmentInfo, ApiError> {
    let Some(reason) = clean_text(request.reason.as_deref()) else {
        return Err(ApiError::InvalidInput {
            field: String::from("reason"),
            message: String::from("A cancellation reason is required"),
        });
    };
    let transition: AppointmentTransition = apply_command(
        persistence,
        clock,
        appointment_id,
        AppointmentCommand::Cancel {
            reason: Some(reason),
        },
        actor,
    )?;
    let outcome: AppointmentOutcome = persist(persistence, &transition, None)?;
    Ok(AppointmentInfo::from(&outcome.appointment))
}

/// Records that the customer did not show up.
///
/// # Errors
///
/// Returns `ApiError::IllegalTransition` unless the appointment is
/// scheduled or confirmed.
pub fn mark_no_show(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    appointment_id: i64,
    actor: &AuthenticatedActor,
) -> Result<AppointmentInfo, ApiError> {
    let transition: AppointmentTransition = apply_command(
        persistence,
        clock,
        appointment_id,
        AppointmentCommand::MarkNoShow,
        actor,
    )?;
    let outcome: AppointmentOutcome = persist(persistence, &transition, None)?;
    Ok(AppointmentInfo::from(&outcome.appointment))
}

/// Starts the wash for an appointment by opening its ticket.
///
/// The ticket and the appointment's new status are written together.
///
/// # Errors
///
/// Returns `ApiError::ConversionNotAllowed` if the appointment is not
/// scheduled or confirmed, or its scheduled time has been reached.
pub fn convert_to_ticket(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    codes: &dyn CodeGenerator,
    appointment_id: i64,
    request: &ConvertToTicketRequest,
    actor: &AuthenticatedActor,
) -> Result<ConvertToTicketResponse, ApiError> {
    let transition: AppointmentTransition = apply_command(
        persistence,
        clock,
        appointment_id,
        AppointmentCommand::ConvertToTicket {
            extra_notes: request.extra_notes.clone(),
        },
        actor,
    )?;
    let ticket_code: Option<String> = transition
        .new_ticket
        .as_ref()
        .map(|_| codes.ticket_code());
    let outcome: AppointmentOutcome = persist(persistence, &transition, ticket_code.as_deref())?;
    let ticket: Ticket = outcome.ticket.ok_or_else(|| ApiError::Internal {
        message: String::from("conversion stored no ticket"),
    })?;

    Ok(ConvertToTicketResponse {
        message: format!(
            "Appointment {} converted to ticket {}",
            outcome.appointment.code, ticket.code
        ),
        appointment: AppointmentInfo::from(&outcome.appointment),
        ticket: TicketInfo::from(&ticket),
    })
}

/// Checks whether a slot is free.
///
/// # Errors
///
/// Returns an error if the date, time or location is malformed.
pub fn check_availability(
    persistence: &mut Persistence,
    request: &AvailabilityRequest,
) -> Result<AvailabilityResponse, ApiError> {
    let slot: Slot = Slot::new(
        parse_date(&request.scheduled_date).map_err(translate_domain_error)?,
        parse_time(&request.scheduled_time).map_err(translate_domain_error)?,
        require_text("location", &request.location).map_err(translate_domain_error)?,
    );
    let available: bool = persistence
        .is_slot_available(&slot, request.exclude_appointment_id)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    Ok(AvailabilityResponse {
        scheduled_date: format_date(slot.date),
        scheduled_time: format_time(slot.time),
        location: slot.location,
        available,
    })
}
