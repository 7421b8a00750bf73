// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    assignments (seq) {
        seq -> BigInt,
        assignment_id -> Text,
        staff_id -> Text,
        week_id -> Text,
        day_index -> Integer,
        location_id -> Nullable<Text>,
        custom_location -> Nullable<Text>,
        shift_type -> Nullable<Text>,
        custom_start_time -> Nullable<Text>,
        custom_end_time -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_by_id -> Text,
        updated_by_id -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    week_statuses (week_id, team_id) {
        week_id -> Text,
        team_id -> Text,
        org_id -> Text,
        status -> Text,
        has_changes -> Integer,
        last_modified -> Text,
        last_modified_by_id -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(assignments, week_statuses);
