// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identification and role-based authorization.
//!
//! The car wash front desk has no login screens. Every mutating request
//! names its actor and role, and the API trusts that pair after checking
//! it is well formed.

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Manager role: maintains reference data (customers, vehicles, workers,
    /// bases, wash types, equipment types, materials) and may do everything
    /// an attendant does.
    Manager,
    /// Attendant role: books and edits appointments, runs their lifecycle
    /// and operates wash tickets.
    Attendant,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Attendant => "attendant",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "attendant" => Ok(Self::Attendant),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: '{s}'. Must be 'manager' or 'attendant'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Builds an authenticated actor from the identity a request carries.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor
/// * `actor_role` - The role name, `manager` or `attendant`
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if the id is blank or the
/// role is unknown.
pub fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, AuthError> {
    let id: &str = actor_id.trim();
    if id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("actor_id is required"),
        });
    }
    let role: Role = actor_role.parse()?;
    Ok(AuthenticatedActor::new(id.to_string(), role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may change reference data.
    ///
    /// Only Manager actors may create, update, deactivate or delete
    /// customers, vehicles, workers and catalog entries.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The attempted action, reported on refusal
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Manager role.
    pub fn authorize_reference_write(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Manager => Ok(()),
            Role::Attendant => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Manager"),
            }),
        }
    }

    /// Checks if an actor may operate appointments and tickets.
    ///
    /// Both roles may.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub const fn authorize_front_desk(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Ok(())
    }
}
