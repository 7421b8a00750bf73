// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their mapping to domain values.
//!
//! Timestamps are stored as RFC 3339 text. This module is the only place
//! they are formatted or parsed.

use diesel::prelude::*;
use rota::WeekStatusUpdate;
use rota_domain::{
    Assignment, AssignmentFields, DayIndex, PublicationStatus, ShiftTime, ShiftType, WeekId,
    WeekStatus,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{assignments, week_statuses};
use crate::error::PersistenceError;

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(timestamp.format(&Rfc3339)?)
}

fn parse_timestamp(
    table: &'static str,
    key: &str,
    value: &str,
) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| PersistenceError::MalformedRow {
        table,
        key: key.to_string(),
        reason: format!("invalid timestamp '{value}': {e}"),
    })
}

/// A stored assignment.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssignmentRow {
    /// Insertion sequence; defines list order.
    pub seq: i64,
    pub assignment_id: String,
    pub staff_id: String,
    pub week_id: String,
    pub day_index: i32,
    pub location_id: Option<String>,
    pub custom_location: Option<String>,
    pub shift_type: Option<String>,
    pub custom_start_time: Option<String>,
    pub custom_end_time: Option<String>,
    pub notes: Option<String>,
    pub created_by_id: String,
    pub updated_by_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AssignmentRow {
    /// Maps the row to a domain assignment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::MalformedRow` if any column fails domain
    /// validation, such as a day index outside 0-6.
    pub fn into_domain(self) -> Result<Assignment, PersistenceError> {
        let key: String = self.assignment_id.clone();
        let malformed = |reason: String| PersistenceError::MalformedRow {
            table: "assignments",
            key: key.clone(),
            reason,
        };

        let week_id: WeekId = WeekId::new(&self.week_id).map_err(|e| malformed(e.to_string()))?;
        let day_index: DayIndex =
            DayIndex::new(i64::from(self.day_index)).map_err(|e| malformed(e.to_string()))?;
        let shift_type: Option<ShiftType> = self
            .shift_type
            .as_deref()
            .map(str::parse::<ShiftType>)
            .transpose()
            .map_err(|e| malformed(e.to_string()))?;
        let custom_start_time: Option<ShiftTime> = self
            .custom_start_time
            .as_deref()
            .map(|t| ShiftTime::parse("customStartTime", t))
            .transpose()
            .map_err(|e| malformed(e.to_string()))?;
        let custom_end_time: Option<ShiftTime> = self
            .custom_end_time
            .as_deref()
            .map(|t| ShiftTime::parse("customEndTime", t))
            .transpose()
            .map_err(|e| malformed(e.to_string()))?;

        Ok(Assignment {
            created_at: parse_timestamp("assignments", &key, &self.created_at)?,
            updated_at: parse_timestamp("assignments", &key, &self.updated_at)?,
            id: self.assignment_id,
            staff_id: self.staff_id,
            week_id,
            day_index,
            location_id: self.location_id,
            custom_location: self.custom_location,
            shift_type,
            custom_start_time,
            custom_end_time,
            notes: self.notes,
            created_by_id: self.created_by_id,
            updated_by_id: self.updated_by_id,
        })
    }
}

/// Insert form of an assignment.
#[derive(Debug, Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignmentRow<'a> {
    pub assignment_id: &'a str,
    pub staff_id: &'a str,
    pub week_id: &'a str,
    pub day_index: i32,
    pub location_id: Option<&'a str>,
    pub custom_location: Option<&'a str>,
    pub shift_type: Option<&'static str>,
    pub custom_start_time: Option<String>,
    pub custom_end_time: Option<String>,
    pub notes: Option<&'a str>,
    pub created_by_id: &'a str,
    pub updated_by_id: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

impl<'a> NewAssignmentRow<'a> {
    pub fn new(
        assignment_id: &'a str,
        fields: &'a AssignmentFields,
        actor_id: &'a str,
        now: &'a str,
    ) -> Self {
        Self {
            assignment_id,
            staff_id: &fields.staff_id,
            week_id: fields.week_id.as_str(),
            day_index: i32::from(fields.day_index.value()),
            location_id: fields.location_id.as_deref(),
            custom_location: fields.custom_location.as_deref(),
            shift_type: fields.shift_type.map(|s| s.as_str()),
            custom_start_time: fields.custom_start_time.map(|t| t.to_string()),
            custom_end_time: fields.custom_end_time.map(|t| t.to_string()),
            notes: fields.notes.as_deref(),
            created_by_id: actor_id,
            updated_by_id: actor_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update form of an assignment. Creation columns are never touched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = assignments, treat_none_as_null = true)]
pub struct AssignmentChangeset<'a> {
    pub staff_id: &'a str,
    pub week_id: &'a str,
    pub day_index: i32,
    pub location_id: Option<&'a str>,
    pub custom_location: Option<&'a str>,
    pub shift_type: Option<&'static str>,
    pub custom_start_time: Option<String>,
    pub custom_end_time: Option<String>,
    pub notes: Option<&'a str>,
    pub updated_by_id: &'a str,
    pub updated_at: &'a str,
}

impl<'a> AssignmentChangeset<'a> {
    pub fn new(fields: &'a AssignmentFields, actor_id: &'a str, now: &'a str) -> Self {
        Self {
            staff_id: &fields.staff_id,
            week_id: fields.week_id.as_str(),
            day_index: i32::from(fields.day_index.value()),
            location_id: fields.location_id.as_deref(),
            custom_location: fields.custom_location.as_deref(),
            shift_type: fields.shift_type.map(|s| s.as_str()),
            custom_start_time: fields.custom_start_time.map(|t| t.to_string()),
            custom_end_time: fields.custom_end_time.map(|t| t.to_string()),
            notes: fields.notes.as_deref(),
            updated_by_id: actor_id,
            updated_at: now,
        }
    }
}

/// A stored week status.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = week_statuses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WeekStatusRow {
    pub week_id: String,
    pub team_id: String,
    pub org_id: String,
    pub status: String,
    pub has_changes: i32,
    pub last_modified: String,
    pub last_modified_by_id: String,
}

impl WeekStatusRow {
    pub fn from_update(update: &WeekStatusUpdate, actor_id: &str, now: String) -> Self {
        Self {
            week_id: update.week_id.to_string(),
            team_id: update.team_id.clone(),
            org_id: update.org_id.clone(),
            status: update.status.as_str().to_string(),
            has_changes: i32::from(update.has_changes),
            last_modified: now,
            last_modified_by_id: actor_id.to_string(),
        }
    }

    /// Maps the row to a domain week status.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::MalformedRow` if the status or timestamp
    /// is not valid.
    pub fn into_domain(self) -> Result<WeekStatus, PersistenceError> {
        let key: String = format!("{}/{}", self.week_id, self.team_id);
        let malformed = |reason: String| PersistenceError::MalformedRow {
            table: "week_statuses",
            key: key.clone(),
            reason,
        };

        let week_id: WeekId = WeekId::new(&self.week_id).map_err(|e| malformed(e.to_string()))?;
        let status: PublicationStatus = self
            .status
            .parse()
            .map_err(|e: rota_domain::DomainError| malformed(e.to_string()))?;

        Ok(WeekStatus {
            last_modified: parse_timestamp("week_statuses", &key, &self.last_modified)?,
            week_id,
            team_id: self.team_id,
            org_id: self.org_id,
            status,
            has_changes: self.has_changes != 0,
            last_modified_by_id: self.last_modified_by_id,
        })
    }
}
