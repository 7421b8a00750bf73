// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Day index is outside the range 0-6.
    InvalidDayIndex {
        /// The rejected day index.
        day_index: i64,
    },
    /// A custom shift time is missing or not a valid `HH:MM` value.
    InvalidShiftTime {
        /// The field that failed validation.
        field: &'static str,
        /// Description of the failure.
        reason: String,
    },
    /// Shift type is not one of the preset identifiers or `custom`.
    InvalidShiftType(String),
    /// Publication status is not `draft` or `published`.
    InvalidStatus(String),
    /// Week identifier is empty or cannot be interpreted as an ISO week.
    InvalidWeekId {
        /// The rejected week identifier.
        week_id: String,
        /// Description of the failure.
        reason: String,
    },
    /// A required field was empty.
    MissingField(&'static str),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDayIndex { day_index } => {
                write!(f, "Invalid day index: {day_index}. Must be between 0 and 6")
            }
            Self::InvalidShiftTime { field, reason } => {
                write!(f, "Invalid shift time for '{field}': {reason}")
            }
            Self::InvalidShiftType(value) => {
                write!(
                    f,
                    "Invalid shift type '{value}'. Must be one of normal, am, pm, late, longday, custom"
                )
            }
            Self::InvalidStatus(value) => {
                write!(
                    f,
                    "Invalid status '{value}'. Must be 'draft' or 'published'"
                )
            }
            Self::InvalidWeekId { week_id, reason } => {
                write!(f, "Invalid week id '{week_id}': {reason}")
            }
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
        }
    }
}

impl std::error::Error for DomainError {}
