// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_domain::{WeekId, WeekStatus};

use crate::data_models::WeekStatusRow;
use crate::diesel_schema::week_statuses;
use crate::error::PersistenceError;

/// Fetches the status record for a week and team.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn get_week_status(
    conn: &mut SqliteConnection,
    week_id: &WeekId,
    team_id: &str,
) -> Result<Option<WeekStatus>, PersistenceError> {
    week_statuses::table
        .find((week_id.as_str(), team_id))
        .select(WeekStatusRow::as_select())
        .first(conn)
        .optional()?
        .map(WeekStatusRow::into_domain)
        .transpose()
}
