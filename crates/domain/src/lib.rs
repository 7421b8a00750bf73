// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod shift;
mod types;
mod validation;
mod week;
mod week_status;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use shift::{SHIFT_PRESETS, ShiftPreset, ShiftTime, ShiftType, shift_preset};
pub use types::{
    Assignment, AssignmentFields, AssignmentInput, AssignmentPatch, Location, LocationCatalogue,
    TeamMembership, User,
};
pub use validation::{check_optional_time, validate_assignment_input, validate_custom_times};
pub use week::{DAYS_PER_WEEK, DayIndex, WeekId};
pub use week_status::{EffectiveStatus, PublicationStatus, WeekStatus};
