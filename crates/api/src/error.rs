// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tracing::error;
use washbay::CoreError;
use washbay_domain::{DomainError, format_date, format_time};
use washbay_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and represent
/// the API contract. The server maps each variant to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested slot is held by another active appointment.
    SchedulingConflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A status change is not permitted from the current status.
    IllegalTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the change was rejected.
        reason: String,
    },
    /// An appointment cannot be turned into a wash ticket.
    ConversionNotAllowed {
        /// The appointment code.
        code: String,
        /// Why the conversion was rejected.
        reason: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A unique value is already taken, or a record is still referenced.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// A stable machine-readable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidInput { .. } => "validation_error",
            Self::SchedulingConflict { .. } => "scheduling_conflict",
            Self::IllegalTransition { .. } => "illegal_transition",
            Self::ConversionNotAllowed { .. } => "conversion_not_allowed",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::SchedulingConflict { message } => write!(f, "Scheduling conflict: {message}"),
            Self::IllegalTransition { from, to, reason } => {
                write!(f, "Cannot change status from '{from}' to '{to}': {reason}")
            }
            Self::ConversionNotAllowed { code, reason } => {
                write!(f, "Appointment {code} cannot be converted to a ticket: {reason}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingRequiredField(field) => invalid(field, &err),
        DomainError::InvalidName(_) => invalid("name", &err),
        DomainError::InvalidPlate(_) => invalid("plate", &err),
        DomainError::InvalidPhone(_) => invalid("phone", &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::InvalidAmount { field, .. } => invalid(field, &err),
        DomainError::InvalidTaxId(_) => invalid("tax_id", &err),
        DomainError::InvalidYear(_) => invalid("year", &err),
        DomainError::InvalidDuration(_) => invalid("estimated_duration_minutes", &err),
        DomainError::DateParseError { .. } | DomainError::InvalidDateRange { .. } => {
            invalid("date", &err)
        }
        DomainError::TimeParseError { .. } | DomainError::OutsideBusinessHours { .. } => {
            invalid("time", &err)
        }
        DomainError::ScheduledInPast { .. } | DomainError::ScheduleOverflow { .. } => {
            invalid("scheduled_date", &err)
        }
        DomainError::InvalidTimeRange { .. } => invalid("ended_at", &err),
        DomainError::InvalidStatus { .. } => invalid("status", &err),
        DomainError::InvalidPriority(_) => invalid("priority", &err),
        DomainError::InvalidVehicleKind(_) => invalid("kind", &err),
        DomainError::InactiveReference { entity, .. } => invalid(&format!("{entity}_id"), &err),
        DomainError::SlotUnavailable {
            date,
            time,
            location,
        } => ApiError::SchedulingConflict {
            message: format!(
                "{} {} at '{location}' is already booked",
                format_date(date),
                format_time(time)
            ),
        },
        DomainError::IllegalTransition { from, to, reason } => {
            ApiError::IllegalTransition { from, to, reason }
        }
        DomainError::ConversionNotAllowed { code, reason } => {
            ApiError::ConversionNotAllowed { code, reason }
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTimezone(name) => ApiError::Internal {
            message: format!("Unknown business timezone '{name}'"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// # Arguments
///
/// * `err` - The persistence error
/// * `resource_type` - The kind of record being read or written, used when
///   the record does not exist
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        PersistenceError::SlotUnavailable(slot) => {
            translate_domain_error(DomainError::SlotUnavailable {
                date: slot.date,
                time: slot.time,
                location: slot.location,
            })
        }
        PersistenceError::Duplicate(message) => ApiError::Conflict {
            message: format!("{resource_type} already exists ({message})"),
        },
        PersistenceError::ReferenceViolation(message) => ApiError::Conflict {
            message: format!("{resource_type} is referenced by other records ({message})"),
        },
        other => {
            error!(error = %other, resource = resource_type, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
