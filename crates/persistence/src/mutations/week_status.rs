// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota::WeekStatusUpdate;
use rota_domain::{WeekId, WeekStatus};
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{WeekStatusRow, format_timestamp};
use crate::diesel_schema::week_statuses;
use crate::error::PersistenceError;

/// Creates or replaces the status record for a week and team.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn put_week_status(
    conn: &mut SqliteConnection,
    update: &WeekStatusUpdate,
    actor_id: &str,
) -> Result<WeekStatus, PersistenceError> {
    let now: String = format_timestamp(OffsetDateTime::now_utc())?;
    let row: WeekStatusRow = WeekStatusRow::from_update(update, actor_id, now);

    diesel::replace_into(week_statuses::table)
        .values(&row)
        .execute(conn)?;

    info!(
        week_id = %update.week_id,
        team_id = %update.team_id,
        status = %update.status,
        has_changes = update.has_changes,
        "Stored week status"
    );
    row.into_domain()
}

/// Deletes the status record, returning whether one existed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_week_status(
    conn: &mut SqliteConnection,
    week_id: &WeekId,
    team_id: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(week_statuses::table.find((week_id.as_str(), team_id)))
        .execute(conn)?;
    info!(%week_id, team_id, existed = deleted > 0, "Deleted week status");
    Ok(deleted > 0)
}
