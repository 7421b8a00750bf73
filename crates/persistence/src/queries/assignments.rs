// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::{Assignment, WeekId};
use tracing::{debug, warn};

use crate::data_models::AssignmentRow;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// Lists a week's assignments in insertion order.
///
/// Rows that no longer map to a valid assignment (for example a day index
/// outside 0-6 written by an older client) are skipped and logged.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assignments_for_week(
    conn: &mut SqliteConnection,
    week_id: &WeekId,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::week_id.eq(week_id.as_str()))
        .order(assignments::seq.asc())
        .select(AssignmentRow::as_select())
        .load(conn)?;

    debug!(%week_id, rows = rows.len(), "Loaded assignments for week");

    Ok(rows
        .into_iter()
        .filter_map(|row| match row.into_domain() {
            Ok(assignment) => Some(assignment),
            Err(err) => {
                warn!(%week_id, error = %err, "Skipping malformed assignment row");
                None
            }
        })
        .collect())
}

/// Fetches one assignment by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if no assignment has `assignment_id`.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: &str,
) -> Result<Option<Assignment>, PersistenceError> {
    assignments::table
        .filter(assignments::assignment_id.eq(assignment_id))
        .select(AssignmentRow::as_select())
        .first(conn)
        .optional()?
        .map(AssignmentRow::into_domain)
        .transpose()
}
