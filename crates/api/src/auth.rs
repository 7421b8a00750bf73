// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and the authorization policy seam.
//!
//! Authentication happens outside this crate. Callers hand in an
//! `AuthenticatedActor` and a `RotaPolicy`; every handler asks the policy
//! before touching the engine.

use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Organisation administrator.
    Admin,
    /// Team manager: edits and publishes rotas.
    Manager,
    /// Staff member: reads rotas.
    Staff,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: '{s}'. Must be 'admin', 'manager' or 'staff'"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user id recorded in audit fields.
    pub id: String,
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Something an actor may ask to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotaAction<'a> {
    ViewPresets,
    /// Read a team's week or a single day of it.
    ViewTeamRota { team_id: &'a str },
    /// Read one staff member's week.
    ViewStaffRota { staff_id: &'a str },
    /// Create, update, delete or copy assignments.
    EditAssignments,
    /// Set, reset or flag a team's week status.
    ManageWeekStatus { team_id: &'a str },
}

impl RotaAction<'_> {
    /// Short name used in error messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ViewPresets => "view_presets",
            Self::ViewTeamRota { .. } => "view_team_rota",
            Self::ViewStaffRota { .. } => "view_staff_rota",
            Self::EditAssignments => "edit_assignments",
            Self::ManageWeekStatus { .. } => "manage_week_status",
        }
    }
}

/// Decides whether an actor may perform an action.
///
/// The engine has no opinion on authorization; deployments plug in their
/// own policy here.
pub trait RotaPolicy {
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor may not perform
    /// `action`.
    fn authorize(&self, actor: &AuthenticatedActor, action: RotaAction<'_>)
    -> Result<(), AuthError>;
}

/// Default policy based on role alone.
///
/// Admins and managers may do everything. Staff may read presets, team
/// rotas and their own rota.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleBasedPolicy;

impl RotaPolicy for RoleBasedPolicy {
    fn authorize(
        &self,
        actor: &AuthenticatedActor,
        action: RotaAction<'_>,
    ) -> Result<(), AuthError> {
        match (actor.role, action) {
            (Role::Admin | Role::Manager, _)
            | (Role::Staff, RotaAction::ViewPresets | RotaAction::ViewTeamRota { .. }) => Ok(()),
            (Role::Staff, RotaAction::ViewStaffRota { staff_id }) if staff_id == actor.id => {
                Ok(())
            }
            (Role::Staff, RotaAction::ViewStaffRota { .. }) => Err(AuthError::Unauthorized {
                action: action.name().to_string(),
                required_role: String::from("Manager (or the staff member themselves)"),
            }),
            (Role::Staff, _) => Err(AuthError::Unauthorized {
                action: action.name().to_string(),
                required_role: String::from("Manager"),
            }),
        }
    }
}
