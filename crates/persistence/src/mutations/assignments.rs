// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::{Assignment, AssignmentFields};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{AssignmentChangeset, AssignmentRow, NewAssignmentRow, format_timestamp};
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// Generates an opaque assignment id.
fn generate_assignment_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Inserts an assignment, stamping all four audit fields.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `fields` - Validated assignment fields
/// * `actor_id` - The user creating the assignment
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_assignment(
    conn: &mut SqliteConnection,
    fields: &AssignmentFields,
    actor_id: &str,
) -> Result<Assignment, PersistenceError> {
    let assignment_id: String = generate_assignment_id();
    let now: String = format_timestamp(OffsetDateTime::now_utc())?;

    let row: AssignmentRow = diesel::insert_into(assignments::table)
        .values(NewAssignmentRow::new(&assignment_id, fields, actor_id, &now))
        .returning(AssignmentRow::as_returning())
        .get_result(conn)?;

    info!(
        assignment_id = %assignment_id,
        seq = row.seq,
        staff_id = %fields.staff_id,
        week_id = %fields.week_id,
        "Inserted assignment"
    );
    row.into_domain()
}

/// Replaces the caller-controlled columns of an assignment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row has `assignment_id`, or an
/// error if the update fails.
pub fn update_assignment(
    conn: &mut SqliteConnection,
    assignment_id: &str,
    fields: &AssignmentFields,
    actor_id: &str,
) -> Result<Assignment, PersistenceError> {
    let now: String = format_timestamp(OffsetDateTime::now_utc())?;

    let row: AssignmentRow = diesel::update(
        assignments::table.filter(assignments::assignment_id.eq(assignment_id)),
    )
    .set(AssignmentChangeset::new(fields, actor_id, &now))
    .returning(AssignmentRow::as_returning())
    .get_result(conn)
    .optional()?
    .ok_or_else(|| PersistenceError::NotFound(format!("assignment {assignment_id}")))?;

    info!(assignment_id, "Updated assignment row");
    row.into_domain()
}

/// Deletes an assignment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row has `assignment_id`.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(assignments::table.filter(assignments::assignment_id.eq(assignment_id)))
            .execute(conn)?;

    if deleted == 0 {
        debug!(assignment_id, "No assignment row to delete");
        return Err(PersistenceError::NotFound(format!(
            "assignment {assignment_id}"
        )));
    }
    info!(assignment_id, "Deleted assignment row");
    Ok(())
}
