// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the rota engine.
//!
//! `Persistence` implements both store contracts of the `rota` crate on top
//! of Diesel. Schema changes are embedded migrations applied on open.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every call its own shared-cache
//! in-memory database, so tests never see each other's rows.

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

use diesel::SqliteConnection;
use rota::{AssignmentStore, StoreError, WeekStatusStore, WeekStatusUpdate};
use rota_domain::{Assignment, AssignmentFields, WeekId, WeekStatus};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for assignments and week statuses.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_rota_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// Lists a week's assignments in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments_for_week(
        &mut self,
        week_id: &WeekId,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments_for_week(&mut self.conn, week_id)
    }

    /// Fetches one assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_assignment(
        &mut self,
        assignment_id: &str,
    ) -> Result<Option<Assignment>, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, assignment_id)
    }

    /// Inserts an assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_assignment(
        &mut self,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, PersistenceError> {
        mutations::assignments::create_assignment(&mut self.conn, fields, actor_id)
    }

    /// Updates an assignment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the assignment does not exist.
    pub fn update_assignment(
        &mut self,
        assignment_id: &str,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, PersistenceError> {
        mutations::assignments::update_assignment(&mut self.conn, assignment_id, fields, actor_id)
    }

    /// Deletes an assignment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the assignment does not exist.
    pub fn delete_assignment(&mut self, assignment_id: &str) -> Result<(), PersistenceError> {
        mutations::assignments::delete_assignment(&mut self.conn, assignment_id)
    }

    // ========================================================================
    // Week Status
    // ========================================================================

    /// Fetches a week status record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_week_status(
        &mut self,
        week_id: &WeekId,
        team_id: &str,
    ) -> Result<Option<WeekStatus>, PersistenceError> {
        queries::week_status::get_week_status(&mut self.conn, week_id, team_id)
    }

    /// Creates or replaces a week status record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_week_status(
        &mut self,
        update: &WeekStatusUpdate,
        actor_id: &str,
    ) -> Result<WeekStatus, PersistenceError> {
        mutations::week_status::put_week_status(&mut self.conn, update, actor_id)
    }

    /// Deletes a week status record.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_week_status(
        &mut self,
        week_id: &WeekId,
        team_id: &str,
    ) -> Result<bool, PersistenceError> {
        mutations::week_status::delete_week_status(&mut self.conn, week_id, team_id)
    }
}

const ASSIGNMENT: &str = "Assignment";
const WEEK_STATUS: &str = "WeekStatus";

impl AssignmentStore for Persistence {
    fn list_assignments_for_week(
        &mut self,
        week_id: &WeekId,
    ) -> Result<Vec<Assignment>, StoreError> {
        Self::list_assignments_for_week(self, week_id).map_err(|e| {
            e.into_store_error(ASSIGNMENT, "list_assignments_for_week", week_id.as_str())
        })
    }

    fn get_assignment(&mut self, id: &str) -> Result<Option<Assignment>, StoreError> {
        Self::get_assignment(self, id)
            .map_err(|e| e.into_store_error(ASSIGNMENT, "get_assignment", id))
    }

    fn create_assignment(
        &mut self,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, StoreError> {
        Self::create_assignment(self, fields, actor_id)
            .map_err(|e| e.into_store_error(ASSIGNMENT, "create_assignment", &fields.staff_id))
    }

    fn update_assignment(
        &mut self,
        id: &str,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, StoreError> {
        Self::update_assignment(self, id, fields, actor_id)
            .map_err(|e| e.into_store_error(ASSIGNMENT, "update_assignment", id))
    }

    fn delete_assignment(&mut self, id: &str) -> Result<(), StoreError> {
        Self::delete_assignment(self, id)
            .map_err(|e| e.into_store_error(ASSIGNMENT, "delete_assignment", id))
    }
}

impl WeekStatusStore for Persistence {
    fn get_week_status(
        &mut self,
        week_id: &WeekId,
        team_id: &str,
    ) -> Result<Option<WeekStatus>, StoreError> {
        Self::get_week_status(self, week_id, team_id).map_err(|e| {
            e.into_store_error(WEEK_STATUS, "get_week_status", &format!("{week_id}/{team_id}"))
        })
    }

    fn put_week_status(
        &mut self,
        update: &WeekStatusUpdate,
        actor_id: &str,
    ) -> Result<WeekStatus, StoreError> {
        Self::put_week_status(self, update, actor_id).map_err(|e| {
            e.into_store_error(
                WEEK_STATUS,
                "put_week_status",
                &format!("{}/{}", update.week_id, update.team_id),
            )
        })
    }

    fn delete_week_status(&mut self, week_id: &WeekId, team_id: &str) -> Result<bool, StoreError> {
        Self::delete_week_status(self, week_id, team_id).map_err(|e| {
            e.into_store_error(
                WEEK_STATUS,
                "delete_week_status",
                &format!("{week_id}/{team_id}"),
            )
        })
    }
}
