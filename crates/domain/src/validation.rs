// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::shift::{ShiftTime, ShiftType};
use crate::types::{AssignmentFields, AssignmentInput};
use crate::week::{DayIndex, WeekId};

/// Validates caller-supplied assignment data.
///
/// Blank optional strings are treated as absent. Custom times are only kept
/// when the shift type is `custom`; for any other shift a supplied time must
/// still be well formed and is then discarded.
///
/// # Arguments
///
/// * `input` - The unvalidated assignment data
///
/// # Errors
///
/// Returns an error if:
/// - The staff id is empty
/// - The week id is empty
/// - The day index is outside 0-6
/// - The shift type is not a known preset or `custom`
/// - The shift is custom and either time is missing
/// - A supplied custom time is not `HH:MM`
pub fn validate_assignment_input(input: &AssignmentInput) -> Result<AssignmentFields, DomainError> {
    let staff_id: &str = input.staff_id.trim();
    if staff_id.is_empty() {
        return Err(DomainError::MissingField("staffId"));
    }

    let week_id: WeekId = WeekId::new(&input.week_id)?;
    let day_index: DayIndex = DayIndex::new(input.day_index)?;

    let shift_type: Option<ShiftType> = non_blank(input.shift_type.as_ref())
        .map(|s| s.parse::<ShiftType>())
        .transpose()?;

    let (custom_start_time, custom_end_time) = match shift_type {
        Some(ShiftType::Custom) => {
            let (start, end) = validate_custom_times(
                input.custom_start_time.as_deref(),
                input.custom_end_time.as_deref(),
            )?;
            (Some(start), Some(end))
        }
        _ => {
            check_optional_time("customStartTime", input.custom_start_time.as_ref())?;
            check_optional_time("customEndTime", input.custom_end_time.as_ref())?;
            (None, None)
        }
    };

    Ok(AssignmentFields {
        staff_id: staff_id.to_string(),
        week_id,
        day_index,
        location_id: non_blank(input.location_id.as_ref()).map(str::to_string),
        custom_location: non_blank(input.custom_location.as_ref()).map(str::to_string),
        shift_type,
        custom_start_time,
        custom_end_time,
        notes: non_blank(input.notes.as_ref()).map(str::to_string),
    })
}

/// Validates the start and end times of a custom shift.
///
/// Both must be present and parse as `HH:MM`. The end may be earlier than
/// the start; such a shift runs overnight.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTime` naming the first offending field.
pub fn validate_custom_times(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(ShiftTime, ShiftTime), DomainError> {
    let start: ShiftTime = parse_required_time("customStartTime", start)?;
    let end: ShiftTime = parse_required_time("customEndTime", end)?;
    Ok((start, end))
}

fn parse_required_time(field: &'static str, value: Option<&str>) -> Result<ShiftTime, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Err(DomainError::InvalidShiftTime {
            field,
            reason: String::from("required for custom shifts"),
        }),
        Some(value) => ShiftTime::parse(field, value),
    }
}

/// Checks the format of a custom time that may be absent or blank.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTime` if a non-blank value is not `HH:MM`.
pub fn check_optional_time(field: &'static str, value: Option<&String>) -> Result<(), DomainError> {
    if let Some(value) = non_blank(value) {
        ShiftTime::parse(field, value)?;
    }
    Ok(())
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}
