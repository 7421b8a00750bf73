// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence contracts the engine runs against.
//!
//! Stores are single-record atomic. The engine never assumes a transaction
//! spans more than one call.

use rota_domain::{Assignment, AssignmentFields, PublicationStatus, WeekId, WeekStatus};
use thiserror::Error;

/// Errors reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },
    /// The backing store failed. `operation` and `key` identify the call.
    #[error("Store unavailable during {operation} ({key}): {message}")]
    Unavailable {
        operation: &'static str,
        key: String,
        message: String,
    },
}

impl StoreError {
    /// Not-found error for an assignment id.
    #[must_use]
    pub fn assignment_not_found(id: &str) -> Self {
        Self::NotFound {
            resource: "Assignment",
            key: id.to_string(),
        }
    }
}

/// Storage of assignment records.
pub trait AssignmentStore {
    /// Lists every assignment of a week in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be read.
    fn list_assignments_for_week(&mut self, week_id: &WeekId)
    -> Result<Vec<Assignment>, StoreError>;

    /// Fetches one assignment. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be read.
    fn get_assignment(&mut self, id: &str) -> Result<Option<Assignment>, StoreError>;

    /// Creates an assignment, assigning its id and all four audit fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the write fails.
    fn create_assignment(
        &mut self,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, StoreError>;

    /// Replaces the caller-controlled fields of an assignment.
    ///
    /// Stamps `updated_at` and `updated_by_id`; creation fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no assignment has `id`.
    fn update_assignment(
        &mut self,
        id: &str,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, StoreError>;

    /// Deletes an assignment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no assignment has `id`.
    fn delete_assignment(&mut self, id: &str) -> Result<(), StoreError>;
}

/// The caller-controlled part of a week status record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekStatusUpdate {
    pub week_id: WeekId,
    pub team_id: String,
    pub org_id: String,
    pub status: PublicationStatus,
    pub has_changes: bool,
}

/// Storage of week status records keyed by `(week_id, team_id)`.
pub trait WeekStatusStore {
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be read.
    fn get_week_status(
        &mut self,
        week_id: &WeekId,
        team_id: &str,
    ) -> Result<Option<WeekStatus>, StoreError>;

    /// Creates or replaces the record, stamping `last_modified`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the write fails.
    fn put_week_status(
        &mut self,
        update: &WeekStatusUpdate,
        actor_id: &str,
    ) -> Result<WeekStatus, StoreError>;

    /// Deletes the record, returning whether one existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the write fails.
    fn delete_week_status(&mut self, week_id: &WeekId, team_id: &str) -> Result<bool, StoreError>;
}
