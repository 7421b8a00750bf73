// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The weekly rota engine.
//!
//! Commands validate against the domain model and delegate persistence to an
//! `AssignmentStore` or `WeekStatusStore`. Views are derived from flat
//! assignment lists. Nothing here authorizes callers; that is decided before
//! an operation is invoked.

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

mod assignments;
mod error;
mod lifecycle;
mod store;
mod view;

#[cfg(test)]
mod tests;

pub use assignments::{
    BulkItem, BulkOutcome, copy_week, create_assignment, delete_assignment, delete_assignments,
    delete_assignments_for_location, get_assignment, update_assignment,
};
pub use error::{CoreError, ErrorKind};
pub use lifecycle::{
    StatusTransition, effective_week_status, get_week_status, mark_changed, notification_for,
    reset_week_status, set_week_status,
};
pub use store::{AssignmentStore, StoreError, WeekStatusStore, WeekStatusUpdate};
pub use view::{
    CUSTOM_HOURS_LABEL, CellIndex, CellKey, DayView, LocationGroup, MyRota, ResolvedEntry,
    RotaDay, UNASSIGNED_LOCATION, WeekRow, WeekView, assemble_week_view, build_cell_index,
    build_team_roster, build_team_roster_on, day_view, filter_users_with_assignments,
    list_day_view, list_week_view, my_rota, resolve_location_name, resolve_shift_label,
};
