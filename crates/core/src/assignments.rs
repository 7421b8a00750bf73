// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::{AssignmentStore, StoreError};
use rota_domain::{
    Assignment, AssignmentFields, AssignmentInput, AssignmentPatch, DayIndex, DomainError,
    ShiftType, WeekId, check_optional_time, validate_assignment_input,
};
use tracing::{debug, info, warn};

/// Outcome of one item in a multi-record operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItem<T> {
    /// The id the item was addressed by.
    pub id: String,
    pub result: Result<T, CoreError>,
}

/// Per-item results of a multi-record operation.
///
/// Items are independent: an earlier success is never rolled back because a
/// later item failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome<T> {
    pub items: Vec<BulkItem<T>>,
}

impl<T> BulkOutcome<T> {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.result.is_ok()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for BulkOutcome<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Validates and creates an assignment.
///
/// # Arguments
///
/// * `store` - The assignment store
/// * `input` - Caller-supplied assignment data
/// * `actor_id` - The user performing the change
///
/// # Errors
///
/// Returns an error if:
/// - The input fails validation (nothing is written)
/// - The store is unavailable
pub fn create_assignment<S>(
    store: &mut S,
    input: &AssignmentInput,
    actor_id: &str,
) -> Result<Assignment, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    let fields: AssignmentFields = validate_assignment_input(input)?;
    let assignment: Assignment = store.create_assignment(&fields, actor_id)?;
    info!(
        assignment_id = %assignment.id,
        staff_id = %assignment.staff_id,
        week_id = %assignment.week_id,
        day_index = %assignment.day_index,
        actor_id,
        "Created assignment"
    );
    Ok(assignment)
}

/// Fetches one assignment.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if no assignment has `id`.
pub fn get_assignment<S>(store: &mut S, id: &str) -> Result<Assignment, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    debug!(assignment_id = id, "Fetching assignment");
    store
        .get_assignment(id)?
        .ok_or_else(|| StoreError::assignment_not_found(id).into())
}

/// Applies a partial update to an assignment.
///
/// Fields present in the patch are checked before the store is touched. The
/// patch is then merged over the stored record and the result is validated
/// as a whole, so switching a custom shift back to a preset clears its
/// custom times.
///
/// # Arguments
///
/// * `store` - The assignment store
/// * `id` - The assignment to update
/// * `patch` - Fields to change
/// * `actor_id` - The user performing the change
///
/// # Errors
///
/// Returns an error if:
/// - A patched field is invalid, or the merged record is invalid
/// - No assignment has `id`
/// - The store is unavailable
pub fn update_assignment<S>(
    store: &mut S,
    id: &str,
    patch: &AssignmentPatch,
    actor_id: &str,
) -> Result<Assignment, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    precheck_patch(patch)?;

    let existing: Assignment = get_assignment(store, id)?;
    let merged: AssignmentInput = patch.merge_into(AssignmentInput::from(&existing));
    let fields: AssignmentFields = validate_assignment_input(&merged)?;

    let updated: Assignment = store.update_assignment(id, &fields, actor_id)?;
    info!(assignment_id = id, actor_id, "Updated assignment");
    Ok(updated)
}

/// Deletes one assignment.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if no assignment has `id`, or
/// `CoreError::StoreUnavailable` if the store fails.
pub fn delete_assignment<S>(store: &mut S, id: &str) -> Result<(), CoreError>
where
    S: AssignmentStore + ?Sized,
{
    store.delete_assignment(id)?;
    info!(assignment_id = id, "Deleted assignment");
    Ok(())
}

/// Deletes each id in turn, collecting per-id results.
#[must_use]
pub fn delete_assignments<S>(store: &mut S, ids: &[String]) -> BulkOutcome<()>
where
    S: AssignmentStore + ?Sized,
{
    let items: Vec<BulkItem<()>> = ids
        .iter()
        .map(|id| BulkItem {
            id: id.clone(),
            result: delete_assignment(store, id),
        })
        .collect();
    let outcome = BulkOutcome { items };
    log_partial_failure("delete_assignments", &outcome);
    outcome
}

/// Deletes every assignment of a week at one catalogued location.
///
/// Used when a location is removed. Assignments that only carry a
/// `custom_location` are left alone.
///
/// # Errors
///
/// Returns an error only if the week cannot be listed. Individual delete
/// failures are reported in the outcome.
pub fn delete_assignments_for_location<S>(
    store: &mut S,
    week_id: &WeekId,
    location_id: &str,
) -> Result<BulkOutcome<()>, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    let ids: Vec<String> = store
        .list_assignments_for_week(week_id)?
        .into_iter()
        .filter(|a| a.location_id.as_deref() == Some(location_id))
        .map(|a| a.id)
        .collect();
    debug!(%week_id, location_id, count = ids.len(), "Deleting assignments for location");
    Ok(delete_assignments(store, &ids))
}

/// Re-creates the assignments of one week in another.
///
/// Each copy keeps its staff member, day, location, shift and notes and is
/// stamped as created by `actor_id`. With `staff_filter`, only those staff
/// members' assignments are copied. Results are keyed by source id.
///
/// # Errors
///
/// Returns an error if the two weeks are the same or the source week cannot
/// be listed.
pub fn copy_week<S>(
    store: &mut S,
    from: &WeekId,
    to: &WeekId,
    actor_id: &str,
    staff_filter: Option<&[String]>,
) -> Result<BulkOutcome<Assignment>, CoreError>
where
    S: AssignmentStore + ?Sized,
{
    if from == to {
        return Err(DomainError::InvalidWeekId {
            week_id: to.to_string(),
            reason: String::from("cannot copy a week onto itself"),
        }
        .into());
    }

    let sources: Vec<Assignment> = store.list_assignments_for_week(from)?;
    let mut items: Vec<BulkItem<Assignment>> = Vec::with_capacity(sources.len());
    for source in sources
        .iter()
        .filter(|a| staff_filter.is_none_or(|staff| staff.contains(&a.staff_id)))
    {
        let mut fields: AssignmentFields = source.fields();
        fields.week_id = to.clone();
        let result = store
            .create_assignment(&fields, actor_id)
            .map_err(CoreError::from);
        items.push(BulkItem {
            id: source.id.clone(),
            result,
        });
    }

    let outcome = BulkOutcome { items };
    info!(
        from = %from,
        to = %to,
        copied = outcome.succeeded(),
        failed = outcome.failed(),
        actor_id,
        "Copied week"
    );
    log_partial_failure("copy_week", &outcome);
    Ok(outcome)
}

fn precheck_patch(patch: &AssignmentPatch) -> Result<(), DomainError> {
    if let Some(staff_id) = &patch.staff_id
        && staff_id.trim().is_empty()
    {
        return Err(DomainError::MissingField("staffId"));
    }
    if let Some(week_id) = &patch.week_id {
        WeekId::new(week_id)?;
    }
    if let Some(day_index) = patch.day_index {
        DayIndex::new(day_index)?;
    }
    if let Some(Some(shift_type)) = &patch.shift_type
        && !shift_type.trim().is_empty()
    {
        shift_type.trim().parse::<ShiftType>()?;
    }
    if let Some(start) = &patch.custom_start_time {
        check_optional_time("customStartTime", start.as_ref())?;
    }
    if let Some(end) = &patch.custom_end_time {
        check_optional_time("customEndTime", end.as_ref())?;
    }
    Ok(())
}

fn log_partial_failure<T>(operation: &'static str, outcome: &BulkOutcome<T>) {
    for item in &outcome.items {
        if let Err(err) = &item.result {
            warn!(operation, id = %item.id, error = %err, "Item failed");
        }
    }
}
