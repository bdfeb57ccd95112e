// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, PrimitiveDateTime};
use tracing::info;
use washbay::{
    Clock, CodeGenerator, TicketCommand, TicketDraft, TicketTransition, apply_ticket_command,
    prepare_ticket, prepare_ticket_update,
};
use washbay_domain::{
    Appointment, NewTicket, Ticket, TicketChanges, TicketStatus, Vehicle, clean_text,
    parse_datetime, parse_money, validate_date_range,
};
use washbay_persistence::{Persistence, TicketFilter};

use super::{References, check_references, parse_amount, parse_optional_date, resolve_plate};
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CancelRequest, CreateTicketRequest, ListQuery, ListTicketsResponse, TicketDetailResponse,
    TicketInfo, UpdateTicketRequest,
};

const RESOURCE: &str = "Ticket";

fn load_ticket(persistence: &mut Persistence, ticket_id: i64) -> Result<Ticket, ApiError> {
    persistence
        .get_ticket(ticket_id)
        .map_err(|e| translate_persistence_error(e, RESOURCE))
}

fn parse_optional_datetime(value: Option<&str>) -> Result<Option<PrimitiveDateTime>, ApiError> {
    clean_text(value)
        .map(|v| parse_datetime(&v))
        .transpose()
        .map_err(translate_domain_error)
}

/// Lists tickets, most recent first.
///
/// # Errors
///
/// Returns an error if a filter value is malformed or the query fails.
pub fn list_tickets(
    persistence: &mut Persistence,
    query: &ListQuery,
) -> Result<ListTicketsResponse, ApiError> {
    let status: Option<TicketStatus> = clean_text(query.status.as_deref())
        .map(|s| s.parse())
        .transpose()
        .map_err(translate_domain_error)?;
    let date_from: Option<Date> = parse_optional_date(query.date_from.as_deref())?;
    let date_to: Option<Date> = parse_optional_date(query.date_to.as_deref())?;
    if let (Some(from), Some(to)) = (date_from, date_to) {
        validate_date_range(from, to).map_err(translate_domain_error)?;
    }

    let tickets: Vec<Ticket> = persistence
        .list_tickets(&TicketFilter {
            status,
            date_from,
            date_to,
            search: clean_text(query.search.as_deref()),
        })
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    Ok(ListTicketsResponse {
        tickets: tickets.iter().map(TicketInfo::from).collect(),
    })
}

/// Opens a walk-in ticket.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `clock` - Source of the default start time and service date
/// * `codes` - Generator for the ticket code
/// * `request` - The ticket request
/// * `actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - The plate is missing and no vehicle is given
/// - A timestamp or amount is malformed, or the end precedes the start
/// - A referenced record is missing or inactive
pub fn create_ticket(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    codes: &dyn CodeGenerator,
    request: &CreateTicketRequest,
    actor: &AuthenticatedActor,
) -> Result<TicketInfo, ApiError> {
    AuthorizationService::authorize_front_desk(actor)?;

    let vehicle: Option<Vehicle> = check_references(
        persistence,
        References {
            customer_id: request.customer_id,
            vehicle_id: request.vehicle_id,
            worker_id: request.worker_id,
            base_id: request.base_id,
            wash_type_id: request.wash_type_id,
            equipment_type_id: request.equipment_type_id,
        },
    )?;

    let draft: TicketDraft = TicketDraft {
        customer_id: request
            .customer_id
            .or_else(|| vehicle.as_ref().map(|v| v.customer_id)),
        vehicle_id: request.vehicle_id,
        plate: resolve_plate(request.plate.as_deref(), vehicle.as_ref()),
        base_id: request.base_id,
        location: request.location.clone(),
        wash_type_id: request.wash_type_id,
        equipment_type_id: request.equipment_type_id,
        worker_id: request.worker_id,
        started_at: parse_optional_datetime(request.started_at.as_deref())?,
        ended_at: parse_optional_datetime(request.ended_at.as_deref())?,
        service_date: parse_optional_date(request.service_date.as_deref())?,
        service_price: parse_amount("service_price", request.service_price.as_deref())?,
        discount: parse_amount("discount", request.discount.as_deref())?,
        notes: request.notes.clone(),
        payment_note: request.payment_note.clone(),
        contract: request.contract.clone(),
    };

    let now: PrimitiveDateTime = clock.now();
    let new_ticket: NewTicket = prepare_ticket(draft, now).map_err(translate_core_error)?;
    let ticket: Ticket = persistence
        .create_ticket(&new_ticket, &codes.ticket_code(), now)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    info!(
        ticket_id = ticket.ticket_id,
        code = %ticket.code,
        actor = %actor.id,
        "Walk-in ticket opened"
    );
    Ok(TicketInfo::from(&ticket))
}

/// Retrieves a ticket and the appointment that produced it.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the ticket does not exist.
pub fn get_ticket(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    ticket_id: i64,
) -> Result<TicketDetailResponse, ApiError> {
    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    let appointment: Option<Appointment> = persistence
        .find_appointment_by_ticket(ticket_id)
        .map_err(|e| translate_persistence_error(e, "Appointment"))?;

    Ok(TicketDetailResponse {
        elapsed_minutes: ticket.elapsed_minutes(clock.now()),
        ticket: TicketInfo::from(&ticket),
        appointment_id: appointment.as_ref().map(|a| a.appointment_id),
        appointment_code: appointment.map(|a| a.code),
    })
}

/// Edits a ticket's pricing, worker and notes; the final price is recomputed.
///
/// # Errors
///
/// Returns an error if the ticket does not exist, an amount is malformed,
/// or the new worker is missing or inactive.
pub fn update_ticket(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    ticket_id: i64,
    request: &UpdateTicketRequest,
    actor: &AuthenticatedActor,
) -> Result<TicketInfo, ApiError> {
    AuthorizationService::authorize_front_desk(actor)?;
    let current: Ticket = load_ticket(persistence, ticket_id)?;

    if let Some(Some(worker_id)) = request.worker_id {
        check_references(
            persistence,
            References {
                worker_id: Some(worker_id),
                ..References::default()
            },
        )?;
    }

    let changes: TicketChanges = TicketChanges {
        service_price: request
            .service_price
            .as_ref()
            .map(|price| parse_amount("service_price", price.as_deref()))
            .transpose()?,
        discount: request
            .discount
            .as_deref()
            .map(|d| parse_money("discount", d))
            .transpose()
            .map_err(translate_domain_error)?,
        worker_id: request.worker_id,
        notes: request.notes.clone(),
        payment_note: request.payment_note.clone(),
        contract: request.contract.clone(),
    };

    let updated: Ticket =
        prepare_ticket_update(&current, changes, clock.now()).map_err(translate_core_error)?;
    let saved: Ticket = persistence
        .save_ticket(&updated)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    info!(ticket_id, actor = %actor.id, "Ticket updated");
    Ok(TicketInfo::from(&saved))
}

/// Applies a status command and mirrors it onto the originating appointment.
fn run_ticket_command(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    ticket_id: i64,
    command: TicketCommand,
    actor: &AuthenticatedActor,
) -> Result<TicketInfo, ApiError> {
    AuthorizationService::authorize_front_desk(actor)?;
    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    let appointment: Option<Appointment> = persistence
        .find_appointment_by_ticket(ticket_id)
        .map_err(|e| translate_persistence_error(e, "Appointment"))?;

    let transition: TicketTransition = apply_ticket_command(
        &ticket,
        appointment.as_ref(),
        command,
        &actor.id,
        clock.now(),
    )
    .map_err(translate_core_error)?;
    let saved: Ticket = persistence
        .persist_ticket_transition(&transition)
        .map_err(|e| translate_persistence_error(e, RESOURCE))?;

    info!(
        ticket_id,
        code = %saved.code,
        status = %saved.status,
        mirrored = transition.mirror.is_some(),
        "Ticket status changed"
    );
    Ok(TicketInfo::from(&saved))
}

/// Completes an in-progress ticket; its appointment becomes concluded.
///
/// # Errors
///
/// Returns `ApiError::IllegalTransition` if the ticket is not in progress.
pub fn complete_ticket(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    ticket_id: i64,
    actor: &AuthenticatedActor,
) -> Result<TicketInfo, ApiError> {
    run_ticket_command(persistence, clock, ticket_id, TicketCommand::Complete, actor)
}

/// Cancels an in-progress ticket; its appointment becomes canceled.
///
/// # Errors
///
/// Returns `ApiError::IllegalTransition` if the ticket is not in progress.
pub fn cancel_ticket(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    ticket_id: i64,
    request: &CancelRequest,
    actor: &AuthenticatedActor,
) -> Result<TicketInfo, ApiError> {
    run_ticket_command(
        persistence,
        clock,
        ticket_id,
        TicketCommand::Cancel {
            reason: request.reason.clone(),
        },
        actor,
    )
}
