// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Draft/published lifecycle of a team's week.
//!
//! A week with no record is an implicit draft. `set_week_status` writes
//! draft or published; `mark_changed` raises the `has_changes` flag on a
//! published week; `reset_week_status` deletes the record again.
//!
//! Every explicit set clears `has_changes`.

use crate::error::CoreError;
use crate::store::{StoreError, WeekStatusStore, WeekStatusUpdate};
use rota_domain::{EffectiveStatus, PublicationStatus, WeekId, WeekStatus};
use rota_notify::NotificationKind;
use tracing::{debug, info};

/// Result of an explicit status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// The record as stored.
    pub week_status: WeekStatus,
    /// The effective status before the change.
    pub previous: EffectiveStatus,
    /// The notification the caller should send, if any.
    pub notification: Option<NotificationKind>,
}

/// Which notification a transition from `previous` to `next` calls for.
///
/// Publishing a draft announces the rota; publishing an already-published
/// week announces updates. Setting draft is silent.
#[must_use]
pub const fn notification_for(
    previous: &EffectiveStatus,
    next: PublicationStatus,
) -> Option<NotificationKind> {
    match next {
        PublicationStatus::Draft => None,
        PublicationStatus::Published if previous.is_published() => {
            Some(NotificationKind::UpdatesToRota)
        }
        PublicationStatus::Published => Some(NotificationKind::PublishedRota),
    }
}

/// Sets a week's publication status.
///
/// The status string is parsed before the store is touched. The record is
/// created or replaced, and `has_changes` is cleared.
///
/// # Arguments
///
/// * `store` - The week status store
/// * `week_id` - The week
/// * `team_id` - The team whose rota this is
/// * `org_id` - The owning organisation
/// * `status` - `"draft"` or `"published"`
/// * `actor_id` - The user performing the change
///
/// # Errors
///
/// Returns an error if:
/// - `status` is not exactly `"draft"` or `"published"`
/// - A store call fails (the error names the week, team and status)
pub fn set_week_status<S>(
    store: &mut S,
    week_id: &WeekId,
    team_id: &str,
    org_id: &str,
    status: &str,
    actor_id: &str,
) -> Result<StatusTransition, CoreError>
where
    S: WeekStatusStore + ?Sized,
{
    let status: PublicationStatus = status.parse()?;
    let fail = |source: StoreError| transition_failed("set", week_id, team_id, Some(status), source);

    let existing: Option<WeekStatus> = store.get_week_status(week_id, team_id).map_err(fail)?;
    let previous: EffectiveStatus = EffectiveStatus::of(existing.as_ref());

    let update = WeekStatusUpdate {
        week_id: week_id.clone(),
        team_id: team_id.to_string(),
        org_id: org_id.to_string(),
        status,
        has_changes: false,
    };
    let week_status: WeekStatus = store.put_week_status(&update, actor_id).map_err(fail)?;
    let notification: Option<NotificationKind> = notification_for(&previous, status);

    info!(
        %week_id,
        team_id,
        from = %previous.status,
        to = %status,
        notification = notification.map(|n| n.as_str()),
        actor_id,
        "Set week status"
    );

    Ok(StatusTransition {
        week_status,
        previous,
        notification,
    })
}

/// Fetches the stored record, if any.
///
/// # Errors
///
/// Returns `CoreError::StoreUnavailable` if the store fails.
pub fn get_week_status<S>(
    store: &mut S,
    week_id: &WeekId,
    team_id: &str,
) -> Result<Option<WeekStatus>, CoreError>
where
    S: WeekStatusStore + ?Sized,
{
    debug!(%week_id, team_id, "Fetching week status");
    Ok(store.get_week_status(week_id, team_id)?)
}

/// The status the week is treated as having. An absent record is an
/// unchanged draft.
///
/// # Errors
///
/// Returns `CoreError::StoreUnavailable` if the store fails.
pub fn effective_week_status<S>(
    store: &mut S,
    week_id: &WeekId,
    team_id: &str,
) -> Result<EffectiveStatus, CoreError>
where
    S: WeekStatusStore + ?Sized,
{
    let record: Option<WeekStatus> = get_week_status(store, week_id, team_id)?;
    Ok(EffectiveStatus::of(record.as_ref()))
}

/// Deletes the record so the week reverts to an implicit draft.
///
/// Returns whether a record existed; resetting an absent record succeeds.
///
/// # Errors
///
/// Returns `CoreError::TransitionFailed` if the store fails.
pub fn reset_week_status<S>(
    store: &mut S,
    week_id: &WeekId,
    team_id: &str,
) -> Result<bool, CoreError>
where
    S: WeekStatusStore + ?Sized,
{
    let existed: bool = store
        .delete_week_status(week_id, team_id)
        .map_err(|source| transition_failed("reset", week_id, team_id, None, source))?;
    info!(%week_id, team_id, existed, "Reset week status");
    Ok(existed)
}

/// Flags a published week as edited since publication.
///
/// Call after a successful assignment mutation. Draft and absent weeks are
/// left untouched and `None` is returned; otherwise the current record is
/// returned.
///
/// # Errors
///
/// Returns `CoreError::TransitionFailed` if the store fails.
pub fn mark_changed<S>(
    store: &mut S,
    week_id: &WeekId,
    team_id: &str,
    actor_id: &str,
) -> Result<Option<WeekStatus>, CoreError>
where
    S: WeekStatusStore + ?Sized,
{
    let fail = |source: StoreError| {
        transition_failed(
            "mark changes on",
            week_id,
            team_id,
            Some(PublicationStatus::Published),
            source,
        )
    };

    let Some(existing) = store.get_week_status(week_id, team_id).map_err(fail)? else {
        debug!(%week_id, team_id, "No status record, nothing to mark");
        return Ok(None);
    };

    match existing.status {
        PublicationStatus::Draft => {
            debug!(%week_id, team_id, "Week is a draft, nothing to mark");
            Ok(None)
        }
        PublicationStatus::Published if existing.has_changes => Ok(Some(existing)),
        PublicationStatus::Published => {
            let update = WeekStatusUpdate {
                week_id: existing.week_id,
                team_id: existing.team_id,
                org_id: existing.org_id,
                status: PublicationStatus::Published,
                has_changes: true,
            };
            let updated: WeekStatus = store.put_week_status(&update, actor_id).map_err(fail)?;
            info!(%week_id, team_id, actor_id, "Marked published week as changed");
            Ok(Some(updated))
        }
    }
}

fn transition_failed(
    operation: &'static str,
    week_id: &WeekId,
    team_id: &str,
    status: Option<PublicationStatus>,
    source: StoreError,
) -> CoreError {
    CoreError::TransitionFailed {
        operation,
        week_id: week_id.to_string(),
        team_id: team_id.to_string(),
        status,
        source,
    }
}
