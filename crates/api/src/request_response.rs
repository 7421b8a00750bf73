// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! JSON field names are camelCase. Timestamps are rendered as RFC 3339
//! strings and calendar dates as `YYYY-MM-DD`.

use rota::{DayView, LocationGroup, MyRota, ResolvedEntry, RotaDay, WeekRow, WeekView};
use rota_domain::{
    Assignment, AssignmentInput, AssignmentPatch, EffectiveStatus, Location, LocationCatalogue,
    ShiftPreset, TeamMembership, User, WeekId, WeekStatus,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::ApiError;

/// Distinguishes an absent field from an explicit `null`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, ApiError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format date: {e}"),
        })
}

/// Parses a `YYYY-MM-DD` date supplied in `field`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the value is not a calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
        }
    })
}

// ============================================================================
// Shift presets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPresetResponse {
    pub id: String,
    pub name: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: String,
}

impl From<&ShiftPreset> for ShiftPresetResponse {
    fn from(preset: &ShiftPreset) -> Self {
        Self {
            id: preset.id.as_str().to_string(),
            name: preset.name.to_string(),
            start_time: preset.start_time.map(|t| t.to_string()),
            end_time: preset.end_time.map(|t| t.to_string()),
            description: preset.description.to_string(),
        }
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// API request to create an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub staff_id: String,
    pub week_id: String,
    pub day_index: i64,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub custom_location: Option<String>,
    #[serde(default)]
    pub shift_type: Option<String>,
    #[serde(default)]
    pub custom_start_time: Option<String>,
    #[serde(default)]
    pub custom_end_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateAssignmentRequest> for AssignmentInput {
    fn from(request: CreateAssignmentRequest) -> Self {
        Self {
            staff_id: request.staff_id,
            week_id: request.week_id,
            day_index: request.day_index,
            location_id: request.location_id,
            custom_location: request.custom_location,
            shift_type: request.shift_type,
            custom_start_time: request.custom_start_time,
            custom_end_time: request.custom_end_time,
            notes: request.notes,
        }
    }
}

/// API request to update an assignment.
///
/// Omitted fields are left unchanged. For nullable fields an explicit
/// `null` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_index: Option<i64>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub location_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_location: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub shift_type: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_start_time: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_end_time: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

impl From<UpdateAssignmentRequest> for AssignmentPatch {
    fn from(request: UpdateAssignmentRequest) -> Self {
        Self {
            staff_id: request.staff_id,
            week_id: request.week_id,
            day_index: request.day_index,
            location_id: request.location_id,
            custom_location: request.custom_location,
            shift_type: request.shift_type,
            custom_start_time: request.custom_start_time,
            custom_end_time: request.custom_end_time,
            notes: request.notes,
        }
    }
}

/// A stored assignment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: String,
    pub staff_id: String,
    pub week_id: String,
    pub day_index: u8,
    pub location_id: Option<String>,
    pub custom_location: Option<String>,
    pub shift_type: Option<String>,
    pub custom_start_time: Option<String>,
    pub custom_end_time: Option<String>,
    pub notes: Option<String>,
    /// Display label for the shift, e.g. `8:30am - 5pm`.
    pub shift_label: String,
    pub created_by_id: String,
    pub updated_by_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<&Assignment> for AssignmentResponse {
    type Error = ApiError;

    fn try_from(assignment: &Assignment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: assignment.id.clone(),
            staff_id: assignment.staff_id.clone(),
            week_id: assignment.week_id.to_string(),
            day_index: assignment.day_index.value(),
            location_id: assignment.location_id.clone(),
            custom_location: assignment.custom_location.clone(),
            shift_type: assignment.shift_type.map(|s| s.as_str().to_string()),
            custom_start_time: assignment.custom_start_time.map(|t| t.to_string()),
            custom_end_time: assignment.custom_end_time.map(|t| t.to_string()),
            notes: assignment.notes.clone(),
            shift_label: rota::resolve_shift_label(assignment),
            created_by_id: assignment.created_by_id.clone(),
            updated_by_id: assignment.updated_by_id.clone(),
            created_at: format_timestamp(assignment.created_at)?,
            updated_at: format_timestamp(assignment.updated_at)?,
        })
    }
}

// ============================================================================
// Multi-record operations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Outcome for one id of a multi-record operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemResponse {
    pub id: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub deleted: usize,
    pub failed: usize,
    pub results: Vec<BulkItemResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyWeekRequest {
    pub to_week_id: String,
    /// Only copy these staff members' assignments.
    #[serde(default)]
    pub staff_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyItemResponse {
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AssignmentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyWeekResponse {
    pub from_week_id: String,
    pub to_week_id: String,
    pub copied: usize,
    pub failed: usize,
    pub results: Vec<CopyItemResponse>,
}

// ============================================================================
// Directory data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            job_title: dto.job_title,
            role: dto.role,
            email: dto.email,
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            job_title: user.job_title.clone(),
            role: user.role.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Builds a location catalogue keyed by id. Later duplicates win.
#[must_use]
pub fn location_catalogue(locations: Vec<LocationDto>) -> LocationCatalogue {
    locations
        .into_iter()
        .map(|dto| {
            (
                dto.id.clone(),
                Location {
                    id: dto.id,
                    name: dto.name,
                    description: dto.description,
                },
            )
        })
        .collect()
}

/// A user's membership of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDto {
    pub user_id: String,
    pub team_id: String,
    pub org_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl TryFrom<MembershipDto> for TeamMembership {
    type Error = ApiError;

    fn try_from(dto: MembershipDto) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: dto
                .start_date
                .as_deref()
                .map(|d| parse_date("startDate", d))
                .transpose()?,
            end_date: dto
                .end_date
                .as_deref()
                .map(|d| parse_date("endDate", d))
                .transpose()?,
            user_id: dto.user_id,
            team_id: dto.team_id,
            org_id: dto.org_id,
        })
    }
}

// ============================================================================
// Views
// ============================================================================

/// Directory data for a team view.
///
/// When `memberships` is given, `users` is treated as the organisation's
/// users and narrowed to the team roster; with `rosterDate` only
/// memberships active on that date count. Otherwise `users` is the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamViewRequest {
    pub users: Vec<UserDto>,
    #[serde(default)]
    pub memberships: Option<Vec<MembershipDto>>,
    #[serde(default)]
    pub locations: Vec<LocationDto>,
    #[serde(default)]
    pub roster_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub assignment_id: String,
    pub shift_type: Option<String>,
    pub shift_label: String,
    pub location_name: Option<String>,
    pub custom_location: Option<String>,
    pub notes: Option<String>,
}

impl From<&ResolvedEntry> for EntryResponse {
    fn from(entry: &ResolvedEntry) -> Self {
        Self {
            assignment_id: entry.assignment_id.clone(),
            shift_type: entry.shift_type.map(|s| s.as_str().to_string()),
            shift_label: entry.shift_label.clone(),
            location_name: entry.location_name.clone(),
            custom_location: entry.custom_location.clone(),
            notes: entry.notes.clone(),
        }
    }
}

/// One non-empty `(staffId, dayIndex)` cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellResponse {
    pub staff_id: String,
    pub day_index: u8,
    pub assignments: Vec<AssignmentResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRowResponse {
    pub user: UserDto,
    /// Seven entries, Monday first.
    pub days: Vec<Vec<EntryResponse>>,
}

impl From<&WeekRow> for WeekRowResponse {
    fn from(row: &WeekRow) -> Self {
        Self {
            user: UserDto::from(&row.user),
            days: row
                .days
                .iter()
                .map(|day| day.iter().map(EntryResponse::from).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekViewResponse {
    pub week_id: String,
    pub team_id: String,
    pub cell_index: Vec<CellResponse>,
    pub users_with_assignments: Vec<UserDto>,
    pub rows: Vec<WeekRowResponse>,
}

impl TryFrom<&WeekView> for WeekViewResponse {
    type Error = ApiError;

    fn try_from(view: &WeekView) -> Result<Self, Self::Error> {
        let cell_index: Vec<CellResponse> = view
            .cell_index
            .iter()
            .map(|(key, assignments)| {
                Ok(CellResponse {
                    staff_id: key.staff_id.clone(),
                    day_index: key.day_index.value(),
                    assignments: assignments
                        .iter()
                        .map(AssignmentResponse::try_from)
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<_, ApiError>>()?;

        Ok(Self {
            week_id: view.week_id.to_string(),
            team_id: view.team_id.clone(),
            cell_index,
            users_with_assignments: view.users_with_assignments.iter().map(UserDto::from).collect(),
            rows: view.rows.iter().map(WeekRowResponse::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffEntryResponse {
    pub user: UserDto,
    pub entry: EntryResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGroupResponse {
    pub location: String,
    pub staff: Vec<StaffEntryResponse>,
}

impl From<&LocationGroup> for LocationGroupResponse {
    fn from(group: &LocationGroup) -> Self {
        Self {
            location: group.location.clone(),
            staff: group
                .staff
                .iter()
                .map(|(user, entry)| StaffEntryResponse {
                    user: UserDto::from(user),
                    entry: EntryResponse::from(entry),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayViewResponse {
    pub week_id: String,
    pub team_id: String,
    pub day_index: u8,
    /// Calendar date, when the week id is in `YYYY-Www` form.
    pub date: Option<String>,
    pub groups: Vec<LocationGroupResponse>,
}

impl DayViewResponse {
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the date cannot be formatted.
    pub fn new(week_id: &WeekId, team_id: &str, view: &DayView) -> Result<Self, ApiError> {
        let date: Option<String> = week_id
            .date_of(view.day_index)
            .ok()
            .map(format_date)
            .transpose()?;
        Ok(Self {
            week_id: week_id.to_string(),
            team_id: team_id.to_string(),
            day_index: view.day_index.value(),
            date,
            groups: view.groups.iter().map(LocationGroupResponse::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRotaRequest {
    #[serde(default)]
    pub locations: Vec<LocationDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotaDayResponse {
    pub day_index: u8,
    pub date: Option<String>,
    pub entries: Vec<EntryResponse>,
}

impl TryFrom<&RotaDay> for RotaDayResponse {
    type Error = ApiError;

    fn try_from(day: &RotaDay) -> Result<Self, Self::Error> {
        Ok(Self {
            day_index: day.day_index.value(),
            date: day.date.map(format_date).transpose()?,
            entries: day.entries.iter().map(EntryResponse::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRotaResponse {
    pub week_id: String,
    pub staff_id: String,
    pub days: Vec<RotaDayResponse>,
    pub total_minutes: u32,
}

impl TryFrom<&MyRota> for MyRotaResponse {
    type Error = ApiError;

    fn try_from(rota: &MyRota) -> Result<Self, Self::Error> {
        Ok(Self {
            week_id: rota.week_id.to_string(),
            staff_id: rota.staff_id.clone(),
            days: rota
                .days
                .iter()
                .map(RotaDayResponse::try_from)
                .collect::<Result<_, _>>()?,
            total_minutes: rota.total_minutes,
        })
    }
}

// ============================================================================
// Week status
// ============================================================================

/// The effective status of a team's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStatusResponse {
    pub week_id: String,
    pub team_id: String,
    pub org_id: Option<String>,
    pub status: String,
    pub has_changes: bool,
    /// False when no record exists and the draft state is implicit.
    pub explicit: bool,
    pub last_modified: Option<String>,
    pub last_modified_by_id: Option<String>,
}

impl WeekStatusResponse {
    /// Builds the response for an optional stored record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the timestamp cannot be formatted.
    pub fn new(
        week_id: &WeekId,
        team_id: &str,
        record: Option<&WeekStatus>,
    ) -> Result<Self, ApiError> {
        let effective: EffectiveStatus = EffectiveStatus::of(record);
        Ok(Self {
            week_id: week_id.to_string(),
            team_id: team_id.to_string(),
            org_id: record.map(|r| r.org_id.clone()),
            status: effective.status.as_str().to_string(),
            has_changes: effective.has_changes,
            explicit: effective.explicit,
            last_modified: record
                .map(|r| format_timestamp(r.last_modified))
                .transpose()?,
            last_modified_by_id: record.map(|r| r.last_modified_by_id.clone()),
        })
    }
}

/// API request to set a week's status.
///
/// `teamName`, `actorName` and `roster` only shape the notification sent
/// on publish; without a roster nobody is notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWeekStatusRequest {
    pub org_id: String,
    pub status: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub actor_name: Option<String>,
    #[serde(default)]
    pub roster: Vec<UserDto>,
}

/// What happened to the notification triggered by a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub kind: String,
    pub recipient_count: usize,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWeekStatusResponse {
    pub status: WeekStatusResponse,
    pub previous_status: String,
    pub notification: Option<NotificationResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkChangedResponse {
    /// Whether the week is now flagged as changed.
    pub marked: bool,
    pub status: WeekStatusResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetWeekStatusResponse {
    pub existed: bool,
    pub status: WeekStatusResponse,
}
