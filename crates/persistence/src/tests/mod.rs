// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod assignment_tests;
mod engine_tests;

use crate::Persistence;
use rota_domain::{AssignmentFields, AssignmentInput, WeekId, validate_assignment_input};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn fields(staff_id: &str, week_id: &str, day_index: i64, shift_type: &str) -> AssignmentFields {
    validate_assignment_input(&AssignmentInput {
        staff_id: staff_id.to_string(),
        week_id: week_id.to_string(),
        day_index,
        shift_type: Some(shift_type.to_string()),
        ..AssignmentInput::default()
    })
    .unwrap()
}

pub fn week(id: &str) -> WeekId {
    WeekId::new(id).unwrap()
}
