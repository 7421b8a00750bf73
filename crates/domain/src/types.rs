// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::shift::{ShiftTime, ShiftType};
use crate::week::{DayIndex, WeekId};
use std::collections::HashMap;
use time::{Date, OffsetDateTime};

/// One unit of work for one staff member on one day of one week.
///
/// The audit fields are stamped by the store; callers never set them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Opaque identifier assigned by the store.
    pub id: String,
    pub staff_id: String,
    pub week_id: WeekId,
    pub day_index: DayIndex,
    pub location_id: Option<String>,
    /// Free-text location used when no catalogued location applies.
    pub custom_location: Option<String>,
    /// `None` means no shift has been chosen yet.
    pub shift_type: Option<ShiftType>,
    pub custom_start_time: Option<ShiftTime>,
    pub custom_end_time: Option<ShiftTime>,
    pub notes: Option<String>,
    pub created_by_id: String,
    pub updated_by_id: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Assignment {
    /// Returns the caller-controlled fields of this assignment.
    #[must_use]
    pub fn fields(&self) -> AssignmentFields {
        AssignmentFields {
            staff_id: self.staff_id.clone(),
            week_id: self.week_id.clone(),
            day_index: self.day_index,
            location_id: self.location_id.clone(),
            custom_location: self.custom_location.clone(),
            shift_type: self.shift_type,
            custom_start_time: self.custom_start_time,
            custom_end_time: self.custom_end_time,
            notes: self.notes.clone(),
        }
    }

    /// The time range this assignment covers.
    ///
    /// Presets take their range from the catalogue. Custom shifts use the
    /// record's own times and have no range if either is missing.
    #[must_use]
    pub fn shift_range(&self) -> Option<(ShiftTime, ShiftTime)> {
        match self.shift_type? {
            ShiftType::Custom => Some((self.custom_start_time?, self.custom_end_time?)),
            preset => preset.preset().time_range(),
        }
    }

    /// Scheduled length of this shift in minutes, if it has a time range.
    #[must_use]
    pub fn shift_minutes(&self) -> Option<u32> {
        self.shift_range()
            .map(|(start, end)| start.minutes_until(end))
    }
}

/// Validated, caller-controlled assignment fields.
///
/// Produced by `validate_assignment_input` and handed to the store on create
/// and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentFields {
    pub staff_id: String,
    pub week_id: WeekId,
    pub day_index: DayIndex,
    pub location_id: Option<String>,
    pub custom_location: Option<String>,
    pub shift_type: Option<ShiftType>,
    /// Always `None` unless `shift_type` is custom.
    pub custom_start_time: Option<ShiftTime>,
    /// Always `None` unless `shift_type` is custom.
    pub custom_end_time: Option<ShiftTime>,
    pub notes: Option<String>,
}

/// Unvalidated assignment data as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentInput {
    pub staff_id: String,
    pub week_id: String,
    pub day_index: i64,
    pub location_id: Option<String>,
    pub custom_location: Option<String>,
    pub shift_type: Option<String>,
    pub custom_start_time: Option<String>,
    pub custom_end_time: Option<String>,
    pub notes: Option<String>,
}

impl From<&Assignment> for AssignmentInput {
    fn from(assignment: &Assignment) -> Self {
        Self {
            staff_id: assignment.staff_id.clone(),
            week_id: assignment.week_id.to_string(),
            day_index: i64::from(assignment.day_index.value()),
            location_id: assignment.location_id.clone(),
            custom_location: assignment.custom_location.clone(),
            shift_type: assignment.shift_type.map(|s| s.as_str().to_string()),
            custom_start_time: assignment.custom_start_time.map(|t| t.to_string()),
            custom_end_time: assignment.custom_end_time.map(|t| t.to_string()),
            notes: assignment.notes.clone(),
        }
    }
}

/// A partial update to an assignment.
///
/// Outer `None` leaves a field untouched. For nullable fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentPatch {
    pub staff_id: Option<String>,
    pub week_id: Option<String>,
    pub day_index: Option<i64>,
    pub location_id: Option<Option<String>>,
    pub custom_location: Option<Option<String>>,
    pub shift_type: Option<Option<String>>,
    pub custom_start_time: Option<Option<String>>,
    pub custom_end_time: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl AssignmentPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlays this patch on an existing input, returning the merged input.
    #[must_use]
    pub fn merge_into(&self, mut base: AssignmentInput) -> AssignmentInput {
        if let Some(staff_id) = &self.staff_id {
            base.staff_id.clone_from(staff_id);
        }
        if let Some(week_id) = &self.week_id {
            base.week_id.clone_from(week_id);
        }
        if let Some(day_index) = self.day_index {
            base.day_index = day_index;
        }
        if let Some(location_id) = &self.location_id {
            base.location_id.clone_from(location_id);
        }
        if let Some(custom_location) = &self.custom_location {
            base.custom_location.clone_from(custom_location);
        }
        if let Some(shift_type) = &self.shift_type {
            base.shift_type.clone_from(shift_type);
        }
        if let Some(start) = &self.custom_start_time {
            base.custom_start_time.clone_from(start);
        }
        if let Some(end) = &self.custom_end_time {
            base.custom_end_time.clone_from(end);
        }
        if let Some(notes) = &self.notes {
            base.notes.clone_from(notes);
        }
        base
    }
}

/// A user from the organisation's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: Option<String>,
    pub role: String,
    /// Address used for rota notifications.
    pub email: Option<String>,
}

impl User {
    /// Returns `"First Last"`, trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A hospital location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Locations of one organisation keyed by location id.
pub type LocationCatalogue = HashMap<String, Location>;

/// Membership of a user in a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMembership {
    pub user_id: String,
    pub team_id: String,
    pub org_id: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl TeamMembership {
    /// Whether the membership covers `date`. Open-ended bounds always match.
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        self.start_date.is_none_or(|start| start <= date)
            && self.end_date.is_none_or(|end| date <= end)
    }
}
