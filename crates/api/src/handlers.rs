// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Every handler checks the caller's policy first, then validates path
//! parameters, then calls the engine. Engine errors are translated into
//! `ApiError`.

use rota::{
    AssignmentStore, BulkOutcome, CoreError, DayView, MyRota, StatusTransition, WeekStatusStore,
    WeekView, build_team_roster, build_team_roster_on,
};
use rota_domain::{
    Assignment, DayIndex, LocationCatalogue, SHIFT_PRESETS, TeamMembership, User, WeekId,
    WeekStatus,
};
use rota_notify::{
    DispatchOutcome, NotificationContext, NotificationDispatcher, NotificationKind, compose,
    dispatch,
};
use tracing::{debug, warn};

use crate::auth::{AuthenticatedActor, RotaAction, RotaPolicy};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AssignmentResponse, BulkDeleteRequest, BulkDeleteResponse, BulkItemResponse,
    CopyItemResponse, CopyWeekRequest, CopyWeekResponse, CreateAssignmentRequest,
    DayViewResponse, MarkChangedResponse, MyRotaRequest, MyRotaResponse, NotificationResponse,
    ResetWeekStatusResponse, SetWeekStatusRequest, SetWeekStatusResponse, ShiftPresetResponse,
    TeamViewRequest, UpdateAssignmentRequest, WeekStatusResponse, WeekViewResponse,
    location_catalogue, parse_date,
};

fn parse_week_id(value: &str) -> Result<WeekId, ApiError> {
    WeekId::new(value).map_err(translate_domain_error)
}

fn bulk_delete_response(outcome: &BulkOutcome<()>) -> BulkDeleteResponse {
    BulkDeleteResponse {
        deleted: outcome.succeeded(),
        failed: outcome.failed(),
        results: outcome
            .items
            .iter()
            .map(|item| BulkItemResponse {
                id: item.id.clone(),
                ok: item.result.is_ok(),
                error: item.result.as_ref().err().map(CoreError::to_string),
            })
            .collect(),
    }
}

/// Narrows the request's users to the team roster and builds the location
/// catalogue.
fn resolve_directory(
    team_id: &str,
    request: TeamViewRequest,
) -> Result<(Vec<User>, LocationCatalogue), ApiError> {
    let users: Vec<User> = request.users.into_iter().map(User::from).collect();
    let locations: LocationCatalogue = location_catalogue(request.locations);

    let Some(memberships) = request.memberships else {
        return Ok((users, locations));
    };
    let memberships: Vec<TeamMembership> = memberships
        .into_iter()
        .map(TeamMembership::try_from)
        .collect::<Result<_, _>>()?;

    let roster: Vec<User> = match request.roster_date.as_deref() {
        Some(date) => {
            build_team_roster_on(team_id, &memberships, &users, parse_date("rosterDate", date)?)
        }
        None => build_team_roster(team_id, &memberships, &users),
    };
    Ok((roster, locations))
}

/// Lists the shift preset catalogue.
///
/// # Errors
///
/// Returns an error if the actor is not authorized.
pub fn list_shift_presets(
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
) -> Result<Vec<ShiftPresetResponse>, ApiError> {
    policy.authorize(actor, RotaAction::ViewPresets)?;
    Ok(SHIFT_PRESETS.iter().map(ShiftPresetResponse::from).collect())
}

/// Creates an assignment.
///
/// # Arguments
///
/// * `store` - The assignment store
/// * `policy` - The caller-supplied authorization policy
/// * `actor` - The authenticated actor, recorded as creator
/// * `request` - The assignment to create
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - The request fails validation
/// - The store is unavailable
pub fn create_assignment<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    request: CreateAssignmentRequest,
) -> Result<AssignmentResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    let created: Assignment = rota::create_assignment(store, &request.into(), &actor.id)
        .map_err(translate_core_error)?;
    AssignmentResponse::try_from(&created)
}

/// Fetches one assignment.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the assignment does not
/// exist or the store is unavailable.
pub fn get_assignment<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    id: &str,
) -> Result<AssignmentResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    let assignment: Assignment = rota::get_assignment(store, id).map_err(translate_core_error)?;
    AssignmentResponse::try_from(&assignment)
}

/// Applies a partial update to an assignment.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - A patched field or the merged record is invalid
/// - The assignment does not exist
/// - The store is unavailable
pub fn update_assignment<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    id: &str,
    request: UpdateAssignmentRequest,
) -> Result<AssignmentResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    let updated: Assignment = rota::update_assignment(store, id, &request.into(), &actor.id)
        .map_err(translate_core_error)?;
    AssignmentResponse::try_from(&updated)
}

/// Deletes an assignment.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the assignment does not
/// exist or the store is unavailable.
pub fn delete_assignment<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    id: &str,
) -> Result<(), ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    rota::delete_assignment(store, id).map_err(translate_core_error)
}

/// Deletes several assignments, reporting each id separately.
///
/// # Errors
///
/// Returns an error only if the actor is not authorized.
pub fn bulk_delete_assignments<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    request: &BulkDeleteRequest,
) -> Result<BulkDeleteResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    let outcome: BulkOutcome<()> = rota::delete_assignments(store, &request.ids);
    Ok(bulk_delete_response(&outcome))
}

/// Deletes every assignment of a week at one location.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the week id is invalid
/// or the week cannot be listed.
pub fn delete_location_assignments<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    location_id: &str,
) -> Result<BulkDeleteResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    let week_id: WeekId = parse_week_id(week_id)?;
    let outcome: BulkOutcome<()> =
        rota::delete_assignments_for_location(store, &week_id, location_id)
            .map_err(translate_core_error)?;
    Ok(bulk_delete_response(&outcome))
}

/// Copies a week's assignments into another week.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - Either week id is invalid, or both are the same week
/// - The source week cannot be listed
pub fn copy_week<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    from_week_id: &str,
    request: &CopyWeekRequest,
) -> Result<CopyWeekResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::EditAssignments)?;
    let from: WeekId = parse_week_id(from_week_id)?;
    let to: WeekId = parse_week_id(&request.to_week_id)?;

    let outcome: BulkOutcome<Assignment> =
        rota::copy_week(store, &from, &to, &actor.id, request.staff_ids.as_deref())
            .map_err(translate_core_error)?;

    let results: Vec<CopyItemResponse> = outcome
        .items
        .iter()
        .map(|item| match &item.result {
            Ok(copy) => Ok(CopyItemResponse {
                source_id: item.id.clone(),
                assignment: Some(AssignmentResponse::try_from(copy)?),
                error: None,
            }),
            Err(e) => Ok(CopyItemResponse {
                source_id: item.id.clone(),
                assignment: None,
                error: Some(e.to_string()),
            }),
        })
        .collect::<Result<_, ApiError>>()?;

    Ok(CopyWeekResponse {
        from_week_id: from.to_string(),
        to_week_id: to.to_string(),
        copied: outcome.succeeded(),
        failed: outcome.failed(),
        results,
    })
}

/// Builds a team's week view.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - The week id or a membership date is invalid
/// - The store is unavailable
pub fn week_view<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    team_id: &str,
    request: TeamViewRequest,
) -> Result<WeekViewResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ViewTeamRota { team_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;
    let (roster, locations) = resolve_directory(team_id, request)?;

    let view: WeekView = rota::list_week_view(store, &week_id, team_id, &roster, &locations)
        .map_err(translate_core_error)?;
    debug!(%week_id, team_id, rows = view.rows.len(), "Built week view");
    WeekViewResponse::try_from(&view)
}

/// Lists who works on one day of a team's week, grouped by location.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - The week id, day index or a membership date is invalid
/// - The store is unavailable
pub fn day_view<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    team_id: &str,
    day_index: i64,
    request: TeamViewRequest,
) -> Result<DayViewResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ViewTeamRota { team_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;
    let day_index: DayIndex = DayIndex::new(day_index).map_err(translate_domain_error)?;
    let (roster, locations) = resolve_directory(team_id, request)?;

    let view: DayView = rota::list_day_view(store, &week_id, day_index, &roster, &locations)
        .map_err(translate_core_error)?;
    DayViewResponse::new(&week_id, team_id, &view)
}

/// Fetches one staff member's week.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the week id is invalid
/// or the store is unavailable.
pub fn my_rota<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    staff_id: &str,
    request: MyRotaRequest,
) -> Result<MyRotaResponse, ApiError>
where
    S: AssignmentStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ViewStaffRota { staff_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;
    let locations: LocationCatalogue = location_catalogue(request.locations);

    let rota: MyRota =
        rota::my_rota(store, &week_id, staff_id, &locations).map_err(translate_core_error)?;
    MyRotaResponse::try_from(&rota)
}

/// Returns a team's effective week status.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the week id is invalid
/// or the store is unavailable.
pub fn get_week_status<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    team_id: &str,
) -> Result<WeekStatusResponse, ApiError>
where
    S: WeekStatusStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ViewTeamRota { team_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;
    let record: Option<WeekStatus> =
        rota::get_week_status(store, &week_id, team_id).map_err(translate_core_error)?;
    WeekStatusResponse::new(&week_id, team_id, record.as_ref())
}

/// Sets a team's week status and sends the notification it triggers.
///
/// A notification that cannot be delivered is reported in the response;
/// the status change itself stands.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - The week id or status is invalid
/// - The store is unavailable
pub fn set_week_status<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    dispatcher: &dyn NotificationDispatcher,
    actor: &AuthenticatedActor,
    week_id: &str,
    team_id: &str,
    request: SetWeekStatusRequest,
) -> Result<SetWeekStatusResponse, ApiError>
where
    S: WeekStatusStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ManageWeekStatus { team_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;

    let transition: StatusTransition = rota::set_week_status(
        store,
        &week_id,
        team_id,
        &request.org_id,
        &request.status,
        &actor.id,
    )
    .map_err(translate_core_error)?;

    let status: WeekStatusResponse =
        WeekStatusResponse::new(&week_id, team_id, Some(&transition.week_status))?;
    let notification: Option<NotificationResponse> = transition
        .notification
        .map(|kind| send_notification(dispatcher, kind, &week_id, team_id, actor, request));

    Ok(SetWeekStatusResponse {
        status,
        previous_status: transition.previous.status.as_str().to_string(),
        notification,
    })
}

fn send_notification(
    dispatcher: &dyn NotificationDispatcher,
    kind: NotificationKind,
    week_id: &WeekId,
    team_id: &str,
    actor: &AuthenticatedActor,
    request: SetWeekStatusRequest,
) -> NotificationResponse {
    let undelivered = |recipient_count: usize, error: Option<String>| NotificationResponse {
        kind: kind.as_str().to_string(),
        recipient_count,
        delivered: false,
        error,
    };

    let (year, week_number) = match week_id.iso_week() {
        Ok(parts) => parts,
        Err(e) => {
            warn!(%week_id, team_id, error = %e, "Week id has no ISO week, notification skipped");
            return undelivered(0, Some(e.to_string()));
        }
    };

    let context = NotificationContext {
        actor_name: request.actor_name.unwrap_or_else(|| actor.id.clone()),
        team_name: request.team_name.unwrap_or_else(|| team_id.to_string()),
        week_number,
        year,
    };
    let roster: Vec<User> = request.roster.into_iter().map(User::from).collect();
    let notification = compose(kind, &context, &roster);

    match dispatch(dispatcher, &notification) {
        Ok(DispatchOutcome::Sent { recipient_count }) => NotificationResponse {
            kind: kind.as_str().to_string(),
            recipient_count,
            delivered: true,
            error: None,
        },
        Ok(DispatchOutcome::NoRecipients) => undelivered(0, None),
        Err(e) => {
            warn!(%week_id, team_id, %kind, error = %e, "Notification delivery failed");
            undelivered(notification.recipients.len(), Some(e.to_string()))
        }
    }
}

/// Resets a team's week to an implicit draft.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the week id is invalid
/// or the store is unavailable.
pub fn reset_week_status<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    team_id: &str,
) -> Result<ResetWeekStatusResponse, ApiError>
where
    S: WeekStatusStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ManageWeekStatus { team_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;
    let existed: bool =
        rota::reset_week_status(store, &week_id, team_id).map_err(translate_core_error)?;
    Ok(ResetWeekStatusResponse {
        existed,
        status: WeekStatusResponse::new(&week_id, team_id, None)?,
    })
}

/// Flags a published week as changed since publication.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the week id is invalid
/// or the store is unavailable.
pub fn mark_changed<S>(
    store: &mut S,
    policy: &dyn RotaPolicy,
    actor: &AuthenticatedActor,
    week_id: &str,
    team_id: &str,
) -> Result<MarkChangedResponse, ApiError>
where
    S: WeekStatusStore + ?Sized,
{
    policy.authorize(actor, RotaAction::ManageWeekStatus { team_id })?;
    let week_id: WeekId = parse_week_id(week_id)?;

    let record: Option<WeekStatus> = match rota::mark_changed(store, &week_id, team_id, &actor.id)
        .map_err(translate_core_error)?
    {
        Some(record) => Some(record),
        None => rota::get_week_status(store, &week_id, team_id).map_err(translate_core_error)?,
    };

    Ok(MarkChangedResponse {
        marked: record.as_ref().is_some_and(|r| r.has_changes),
        status: WeekStatusResponse::new(&week_id, team_id, record.as_ref())?,
    })
}
