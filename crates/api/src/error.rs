// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rota::{CoreError, StoreError};
use rota_domain::DomainError;

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
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed { reason: String },
    /// The actor does not have permission.
    Unauthorized {
        action: String,
        required_role: String,
    },
    /// A rota rule was violated.
    DomainRuleViolation { rule: String, message: String },
    /// Invalid input was provided.
    InvalidInput { field: String, message: String },
    /// A requested resource was not found.
    ResourceNotFound {
        resource_type: String,
        message: String,
    },
    /// The backing store failed. The request may be retried.
    StoreUnavailable { operation: String, message: String },
    /// An internal error occurred.
    Internal { message: String },
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
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StoreUnavailable { operation, message } => {
                write!(f, "Store unavailable during {operation}: {message}")
            }
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

/// Translates a domain error into an API error.
///
/// Custom shift time failures break the custom-shift rule; everything else
/// is a bad field. Field names match the JSON request fields.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match &err {
        DomainError::InvalidShiftTime { .. } => {
            return ApiError::DomainRuleViolation {
                rule: String::from("custom_shift_times"),
                message,
            };
        }
        DomainError::InvalidDayIndex { .. } => "dayIndex",
        DomainError::MissingField(field) => field,
        DomainError::InvalidShiftType(_) => "shiftType",
        DomainError::InvalidStatus(_) => "status",
        DomainError::InvalidWeekId { .. } => "weekId",
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates an engine error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain) => translate_domain_error(domain),
        CoreError::NotFound { resource, key } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("No {resource} with id '{key}'"),
        },
        CoreError::StoreUnavailable {
            operation, message, ..
        } => ApiError::StoreUnavailable {
            operation: operation.to_string(),
            message,
        },
        CoreError::TransitionFailed {
            operation,
            week_id,
            team_id,
            source,
            ..
        } => match source {
            StoreError::NotFound { resource, key } => ApiError::ResourceNotFound {
                resource_type: resource.to_string(),
                message: key,
            },
            StoreError::Unavailable { message, .. } => ApiError::StoreUnavailable {
                operation: format!("{operation} week status ({week_id}, {team_id})"),
                message,
            },
        },
    }
}
