// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, fields, week};
use crate::PersistenceError;
use crate::diesel_schema::assignments;
use diesel::prelude::*;
use rota::{AssignmentStore, StoreError};
use rota_domain::{AssignmentInput, ShiftType, validate_assignment_input};

#[test]
fn test_create_assignment_round_trips_all_fields() {
    let mut persistence = create_test_persistence();
    let data = validate_assignment_input(&AssignmentInput {
        staff_id: String::from("s1"),
        week_id: String::from("2024-W15"),
        day_index: 4,
        location_id: Some(String::from("loc-disp")),
        custom_location: Some(String::from("Outpatients")),
        shift_type: Some(String::from("custom")),
        custom_start_time: Some(String::from("20:00")),
        custom_end_time: Some(String::from("08:00")),
        notes: Some(String::from("night cover")),
    })
    .unwrap();

    let created = persistence.create_assignment(&data, "mgr-1").unwrap();
    let fetched = persistence.get_assignment(&created.id).unwrap().unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.fields(), data);
    assert_eq!(fetched.created_by_id, "mgr-1");
    assert_eq!(fetched.updated_by_id, "mgr-1");
    assert_eq!(fetched.created_at, fetched.updated_at);
    assert_eq!(fetched.id.len(), 16);
}

#[test]
fn test_list_assignments_in_insertion_order() {
    let mut persistence = create_test_persistence();
    let ids: Vec<String> = [("s2", 3), ("s1", 0), ("s3", 6)]
        .iter()
        .map(|(staff, day)| {
            persistence
                .create_assignment(&fields(staff, "2024-W15", *day, "normal"), "mgr-1")
                .unwrap()
                .id
        })
        .collect();
    persistence
        .create_assignment(&fields("s1", "2024-W16", 0, "normal"), "mgr-1")
        .unwrap();

    let listed = persistence.list_assignments_for_week(&week("2024-W15")).unwrap();

    let listed_ids: Vec<String> = listed.into_iter().map(|a| a.id).collect();
    assert_eq!(listed_ids, ids);
}

#[test]
fn test_update_keeps_creation_fields() {
    let mut persistence = create_test_persistence();
    let created = persistence
        .create_assignment(&fields("s1", "2024-W15", 0, "am"), "mgr-1")
        .unwrap();

    let updated = persistence
        .update_assignment(&created.id, &fields("s1", "2024-W15", 1, "pm"), "mgr-2")
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.day_index.value(), 1);
    assert_eq!(updated.shift_type, Some(ShiftType::Pm));
    assert_eq!(updated.created_by_id, "mgr-1");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_by_id, "mgr-2");
    assert!(updated.updated_at >= created.updated_at);
}

#[test]
fn test_update_clears_nullable_columns() {
    let mut persistence = create_test_persistence();
    let mut with_notes = fields("s1", "2024-W15", 0, "am");
    with_notes.notes = Some(String::from("bring keys"));
    let created = persistence.create_assignment(&with_notes, "mgr-1").unwrap();

    let updated = persistence
        .update_assignment(&created.id, &fields("s1", "2024-W15", 0, "am"), "mgr-1")
        .unwrap();

    assert_eq!(updated.notes, None);
}

#[test]
fn test_update_missing_assignment_is_not_found() {
    let mut persistence = create_test_persistence();

    let err = AssignmentStore::update_assignment(
        &mut persistence,
        "missing",
        &fields("s1", "2024-W15", 0, "am"),
        "mgr-1",
    )
    .unwrap_err();

    assert_eq!(
        err,
        StoreError::NotFound {
            resource: "Assignment",
            key: String::from("missing"),
        }
    );
}

#[test]
fn test_delete_assignment_twice() {
    let mut persistence = create_test_persistence();
    let created = persistence
        .create_assignment(&fields("s1", "2024-W15", 0, "am"), "mgr-1")
        .unwrap();

    persistence.delete_assignment(&created.id).unwrap();

    assert!(matches!(
        persistence.delete_assignment(&created.id),
        Err(PersistenceError::NotFound(_))
    ));
    assert_eq!(persistence.get_assignment(&created.id).unwrap(), None);
}

#[test]
fn test_malformed_rows_are_skipped_in_listing() {
    let mut persistence = create_test_persistence();
    let good = persistence
        .create_assignment(&fields("s1", "2024-W15", 0, "am"), "mgr-1")
        .unwrap();
    let bad = persistence
        .create_assignment(&fields("s2", "2024-W15", 1, "am"), "mgr-1")
        .unwrap();

    diesel::update(assignments::table.filter(assignments::assignment_id.eq(&bad.id)))
        .set(assignments::day_index.eq(9))
        .execute(&mut persistence.conn)
        .unwrap();

    let listed = persistence.list_assignments_for_week(&week("2024-W15")).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, good.id);

    let err = AssignmentStore::get_assignment(&mut persistence, &bad.id).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { operation: "get_assignment", .. }));
}
