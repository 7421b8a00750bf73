// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use rota_domain::{DomainError, PublicationStatus};
use thiserror::Error;

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input failed validation. Nothing was written.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },
    #[error("Store unavailable during {operation} ({key}): {message}")]
    StoreUnavailable {
        operation: &'static str,
        key: String,
        message: String,
    },
    /// A store call failed while changing a week's publication state.
    #[error("Failed to {operation} week status for week {week_id}, team {team_id}: {source}")]
    TransitionFailed {
        operation: &'static str,
        week_id: String,
        team_id: String,
        /// Target status, if the transition had one.
        status: Option<PublicationStatus>,
        source: StoreError,
    },
}

/// Error kinds, flattened for callers that map errors to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidDayIndex,
    InvalidShiftTime,
    InvalidShiftType,
    InvalidStatus,
    InvalidWeekId,
    MissingField,
    NotFound,
    StoreUnavailable,
}

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DomainViolation(err) => match err {
                DomainError::InvalidDayIndex { .. } => ErrorKind::InvalidDayIndex,
                DomainError::InvalidShiftTime { .. } => ErrorKind::InvalidShiftTime,
                DomainError::InvalidShiftType(_) => ErrorKind::InvalidShiftType,
                DomainError::InvalidStatus(_) => ErrorKind::InvalidStatus,
                DomainError::InvalidWeekId { .. } => ErrorKind::InvalidWeekId,
                DomainError::MissingField(_) => ErrorKind::MissingField,
            },
            Self::NotFound { .. }
            | Self::TransitionFailed {
                source: StoreError::NotFound { .. },
                ..
            } => ErrorKind::NotFound,
            Self::StoreUnavailable { .. }
            | Self::TransitionFailed {
                source: StoreError::Unavailable { .. },
                ..
            } => ErrorKind::StoreUnavailable,
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { resource, key } => Self::NotFound { resource, key },
            StoreError::Unavailable {
                operation,
                key,
                message,
            } => Self::StoreUnavailable {
                operation,
                key,
                message,
            },
        }
    }
}
