// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived views over flat assignment records.
//!
//! Everything here is pure except `list_week_view`, `list_day_view` and
//! `my_rota`, which fetch the week from the store and then delegate to the
//! pure builders.

use crate::error::CoreError;
use crate::store::AssignmentStore;
use rota_domain::{
    Assignment, DAYS_PER_WEEK, DayIndex, LocationCatalogue, ShiftType, TeamMembership, User,
    WeekId,
};
use std::collections::{BTreeMap, HashSet};
use time::Date;
use tracing::debug;

/// Label shown for a custom shift whose times are missing.
pub const CUSTOM_HOURS_LABEL: &str = "Custom hours";

/// Grouping key of the cell index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub staff_id: String,
    pub day_index: DayIndex,
}

/// Assignments grouped by `(staff_id, day_index)`.
///
/// Within a cell, assignments keep the order they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellIndex {
    cells: BTreeMap<CellKey, Vec<Assignment>>,
}

impl CellIndex {
    /// The assignments in one cell, empty if the cell has none.
    #[must_use]
    pub fn get(&self, staff_id: &str, day_index: DayIndex) -> &[Assignment] {
        self.cells
            .get(&CellKey {
                staff_id: staff_id.to_string(),
                day_index,
            })
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the staff member has at least one assignment in any cell.
    #[must_use]
    pub fn has_assignments(&self, staff_id: &str) -> bool {
        self.cells
            .iter()
            .any(|(key, cell)| key.staff_id == staff_id && !cell.is_empty())
    }

    /// Cells in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &[Assignment])> {
        self.cells.iter().map(|(key, cell)| (key, cell.as_slice()))
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total number of assignments across all cells.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

/// Groups assignments into cells.
///
/// Every input assignment lands in exactly one cell.
#[must_use]
pub fn build_cell_index<I>(assignments: I) -> CellIndex
where
    I: IntoIterator<Item = Assignment>,
{
    let mut cells: BTreeMap<CellKey, Vec<Assignment>> = BTreeMap::new();
    for assignment in assignments {
        cells
            .entry(CellKey {
                staff_id: assignment.staff_id.clone(),
                day_index: assignment.day_index,
            })
            .or_default()
            .push(assignment);
    }
    CellIndex { cells }
}

/// The shift text shown for an assignment.
///
/// No shift yields an empty string. Presets use their catalogue description.
/// Custom shifts render as `"1:00pm - 9:00pm"`, or `"Custom hours"` when a
/// time is missing.
#[must_use]
pub fn resolve_shift_label(assignment: &Assignment) -> String {
    match assignment.shift_type {
        None => String::new(),
        Some(ShiftType::Custom) => match (assignment.custom_start_time, assignment.custom_end_time)
        {
            (Some(start), Some(end)) => {
                format!("{} - {}", start.to_twelve_hour(), end.to_twelve_hour())
            }
            _ => CUSTOM_HOURS_LABEL.to_string(),
        },
        Some(preset) => preset.preset().description.to_string(),
    }
}

/// The catalogue name of an assignment's location.
///
/// Only `location_id` is consulted; `custom_location` is surfaced separately
/// by the views.
#[must_use]
pub fn resolve_location_name<'a>(
    assignment: &Assignment,
    locations: &'a LocationCatalogue,
) -> Option<&'a str> {
    assignment
        .location_id
        .as_ref()
        .and_then(|id| locations.get(id))
        .map(|location| location.name.as_str())
}

/// Keeps users that have at least one assignment, in input order.
#[must_use]
pub fn filter_users_with_assignments(users: &[User], index: &CellIndex) -> Vec<User> {
    users
        .iter()
        .filter(|user| index.has_assignments(&user.id))
        .cloned()
        .collect()
}

/// Users who are members of `team_id`, in `users` order.
///
/// Membership start and end dates are ignored; see `build_team_roster_on`.
#[must_use]
pub fn build_team_roster(team_id: &str, memberships: &[TeamMembership], users: &[User]) -> Vec<User> {
    let member_ids: HashSet<&str> = memberships
        .iter()
        .filter(|m| m.team_id == team_id)
        .map(|m| m.user_id.as_str())
        .collect();
    roster_from(&member_ids, users)
}

/// Users whose membership of `team_id` covers `date`, in `users` order.
#[must_use]
pub fn build_team_roster_on(
    team_id: &str,
    memberships: &[TeamMembership],
    users: &[User],
    date: Date,
) -> Vec<User> {
    let member_ids: HashSet<&str> = memberships
        .iter()
        .filter(|m| m.team_id == team_id && m.is_active_on(date))
        .map(|m| m.user_id.as_str())
        .collect();
    roster_from(&member_ids, users)
}

fn roster_from(member_ids: &HashSet<&str>, users: &[User]) -> Vec<User> {
    users
        .iter()
        .filter(|user| member_ids.contains(user.id.as_str()))
        .cloned()
        .collect()
}

/// One assignment as displayed in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub assignment_id: String,
    pub shift_type: Option<ShiftType>,
    pub shift_label: String,
    pub location_name: Option<String>,
    pub custom_location: Option<String>,
    pub notes: Option<String>,
}

impl ResolvedEntry {
    #[must_use]
    pub fn resolve(assignment: &Assignment, locations: &LocationCatalogue) -> Self {
        Self {
            assignment_id: assignment.id.clone(),
            shift_type: assignment.shift_type,
            shift_label: resolve_shift_label(assignment),
            location_name: resolve_location_name(assignment, locations).map(str::to_string),
            custom_location: assignment.custom_location.clone(),
            notes: assignment.notes.clone(),
        }
    }

    /// The location to show: the catalogue name, else the free-text one.
    #[must_use]
    pub fn display_location(&self) -> Option<&str> {
        self.location_name
            .as_deref()
            .or(self.custom_location.as_deref())
    }
}

/// One user's line of the week grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub user: User,
    /// Seven entries, Monday first. Each holds that day's cell.
    pub days: Vec<Vec<ResolvedEntry>>,
}

/// A team's week: the raw cell index, the users to show and their rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
    pub week_id: WeekId,
    pub team_id: String,
    pub cell_index: CellIndex,
    pub users_with_assignments: Vec<User>,
    pub rows: Vec<WeekRow>,
}

/// Builds the week view from already-fetched assignments.
///
/// `users` is the roster to consider; only those with assignments appear.
/// Assignments for staff outside the roster are left out of the cell index.
#[must_use]
pub fn assemble_week_view(
    week_id: &WeekId,
    team_id: &str,
    assignments: Vec<Assignment>,
    users: &[User],
    locations: &LocationCatalogue,
) -> WeekView {
    let cell_index: CellIndex = build_cell_index(on_roster(assignments, users));
    let users_with_assignments: Vec<User> = filter_users_with_assignments(users, &cell_index);

    let rows: Vec<WeekRow> = users_with_assignments
        .iter()
        .map(|user| WeekRow {
            user: user.clone(),
            days: DayIndex::all()
                .map(|day| {
                    cell_index
                        .get(&user.id, day)
                        .iter()
                        .map(|a| ResolvedEntry::resolve(a, locations))
                        .collect()
                })
                .collect(),
        })
        .collect();

    WeekView {
        week_id: week_id.clone(),
        team_id: team_id.to_string(),
        cell_index,
        users_with_assignments,
        rows,
    }
}

/// Fetches a week and builds the team's view of it.
///
/// # Arguments
///
/// * `store` - The assignment store
/// * `week_id` - The week to show
/// * `team_id` - The team the roster belongs to
/// * `users` - The team roster, in display order
/// * `locations` - The organisation's location catalogue
///
/// # Errors
///
/// Returns an error if the store is unavailable.
pub fn list_week_view<S>(
    store: &mut S,
    week_id: &WeekId,
    team_id: &str,
    users: &[User],
    locations: &LocationCatalogue,
) -> Result<WeekView, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    let assignments: Vec<Assignment> = store.list_assignments_for_week(week_id)?;
    debug!(%week_id, team_id, count = assignments.len(), "Building week view");
    Ok(assemble_week_view(
        week_id,
        team_id,
        assignments,
        users,
        locations,
    ))
}

fn on_roster(assignments: Vec<Assignment>, users: &[User]) -> Vec<Assignment> {
    let roster: HashSet<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assignments
        .into_iter()
        .filter(|a| roster.contains(a.staff_id.as_str()))
        .collect()
}

/// One day of a personal rota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotaDay {
    pub day_index: DayIndex,
    /// Calendar date, when the week id is in `YYYY-Www` form.
    pub date: Option<Date>,
    pub entries: Vec<ResolvedEntry>,
}

/// A staff member's seven days with the total scheduled time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyRota {
    pub week_id: WeekId,
    pub staff_id: String,
    pub days: Vec<RotaDay>,
    /// Sum of shift lengths. Assignments without a time range add nothing.
    pub total_minutes: u32,
}

/// Fetches one staff member's week.
///
/// # Errors
///
/// Returns an error if the store is unavailable.
pub fn my_rota<S>(
    store: &mut S,
    week_id: &WeekId,
    staff_id: &str,
    locations: &LocationCatalogue,
) -> Result<MyRota, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    let mine: Vec<Assignment> = store
        .list_assignments_for_week(week_id)?
        .into_iter()
        .filter(|a| a.staff_id == staff_id)
        .collect();

    let total_minutes: u32 = total_minutes(mine.iter().filter_map(Assignment::shift_minutes));
    let index: CellIndex = build_cell_index(mine);

    let mut days: Vec<RotaDay> = Vec::with_capacity(usize::from(DAYS_PER_WEEK));
    for day in DayIndex::all() {
        days.push(RotaDay {
            day_index: day,
            date: week_id.date_of(day).ok(),
            entries: index
                .get(staff_id, day)
                .iter()
                .map(|a| ResolvedEntry::resolve(a, locations))
                .collect(),
        });
    }

    Ok(MyRota {
        week_id: week_id.clone(),
        staff_id: staff_id.to_string(),
        days,
        total_minutes,
    })
}

/// Sums shift lengths, saturating at `u32::MAX`.
#[must_use]
pub fn total_minutes<I>(minutes: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    minutes.into_iter().fold(0, u32::saturating_add)
}

/// Label of the group holding entries with no location.
pub const UNASSIGNED_LOCATION: &str = "Unassigned";

/// Who works at one location on a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationGroup {
    pub location: String,
    pub staff: Vec<(User, ResolvedEntry)>,
}

/// Everyone working on one day, grouped by location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub day_index: DayIndex,
    /// Groups in order of first appearance, following `users` order.
    pub groups: Vec<LocationGroup>,
}

/// Lists who works on `day_index`, grouped by display location.
#[must_use]
pub fn day_view(
    index: &CellIndex,
    day_index: DayIndex,
    users: &[User],
    locations: &LocationCatalogue,
) -> DayView {
    let mut groups: Vec<LocationGroup> = Vec::new();
    for user in users {
        for assignment in index.get(&user.id, day_index) {
            let entry: ResolvedEntry = ResolvedEntry::resolve(assignment, locations);
            let location: String = entry
                .display_location()
                .unwrap_or(UNASSIGNED_LOCATION)
                .to_string();
            match groups.iter_mut().find(|g| g.location == location) {
                Some(group) => group.staff.push((user.clone(), entry)),
                None => groups.push(LocationGroup {
                    location,
                    staff: vec![(user.clone(), entry)],
                }),
            }
        }
    }
    DayView { day_index, groups }
}

/// Fetches a week and lists who on the roster works on `day_index`.
///
/// # Errors
///
/// Returns an error if the store is unavailable.
pub fn list_day_view<S>(
    store: &mut S,
    week_id: &WeekId,
    day_index: DayIndex,
    users: &[User],
    locations: &LocationCatalogue,
) -> Result<DayView, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    let assignments: Vec<Assignment> = store.list_assignments_for_week(week_id)?;
    debug!(%week_id, %day_index, count = assignments.len(), "Building day view");
    let index: CellIndex = build_cell_index(on_roster(assignments, users));
    Ok(day_view(&index, day_index, users, locations))
}
