// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the rota engine.
//!
//! Handlers take a store, the caller's `RotaPolicy` and the authenticated
//! actor, and speak in serializable request/response DTOs. Transport
//! concerns such as HTTP status codes live in the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, Role, RoleBasedPolicy, RotaAction, RotaPolicy};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    bulk_delete_assignments, copy_week, create_assignment, day_view, delete_assignment,
    delete_location_assignments, get_assignment, get_week_status, list_shift_presets,
    mark_changed, my_rota, reset_week_status, set_week_status, update_assignment, week_view,
};
pub use request_response::{
    AssignmentResponse, BulkDeleteRequest, BulkDeleteResponse, BulkItemResponse,
    CellResponse, CopyItemResponse, CopyWeekRequest, CopyWeekResponse, CreateAssignmentRequest,
    DayViewResponse, EntryResponse, LocationDto, LocationGroupResponse, MarkChangedResponse,
    MembershipDto, MyRotaRequest, MyRotaResponse, NotificationResponse, ResetWeekStatusResponse,
    RotaDayResponse, SetWeekStatusRequest, SetWeekStatusResponse, ShiftPresetResponse,
    StaffEntryResponse, TeamViewRequest, UpdateAssignmentRequest, UserDto, WeekRowResponse,
    WeekStatusResponse, WeekViewResponse, format_date, location_catalogue, parse_date,
};
