// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_request, create_test_manager, create_test_persistence};
use crate::{
    ApiError, BulkDeleteRequest, CopyWeekRequest, CreateAssignmentRequest, RoleBasedPolicy,
    UpdateAssignmentRequest, bulk_delete_assignments, copy_week, create_assignment,
    delete_assignment, delete_location_assignments, get_assignment, update_assignment,
};

#[test]
fn test_create_assignment_returns_stamped_record() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();

    let created = create_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        create_request("s1", 2, "am"),
    )
    .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.staff_id, "s1");
    assert_eq!(created.week_id, "2024-W15");
    assert_eq!(created.day_index, 2);
    assert_eq!(created.shift_type.as_deref(), Some("am"));
    assert_eq!(created.shift_label, "8:30am - 12pm");
    assert_eq!(created.created_by_id, "mgr-1");
    assert_eq!(created.updated_by_id, "mgr-1");
    assert_eq!(created.created_at, created.updated_at);

    let fetched = get_assignment(&mut persistence, &RoleBasedPolicy, &manager, &created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn test_create_custom_assignment_renders_twelve_hour_label() {
    let mut persistence = create_test_persistence();
    let request = CreateAssignmentRequest {
        custom_start_time: Some(String::from("13:00")),
        custom_end_time: Some(String::from("21:00")),
        ..create_request("s1", 0, "custom")
    };

    let created =
        create_assignment(&mut persistence, &RoleBasedPolicy, &create_test_manager(), request)
            .unwrap();
    assert_eq!(created.custom_start_time.as_deref(), Some("13:00"));
    assert_eq!(created.shift_label, "1:00pm - 9:00pm");
}

#[test]
fn test_malformed_custom_time_on_preset_is_rule_violation() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();
    let created =
        create_assignment(&mut persistence, &RoleBasedPolicy, &manager, create_request("s1", 0, "am"))
            .unwrap();

    let patch = UpdateAssignmentRequest {
        custom_start_time: Some(Some(String::from("99:99"))),
        ..UpdateAssignmentRequest::default()
    };
    let err = update_assignment(&mut persistence, &RoleBasedPolicy, &manager, &created.id, patch)
        .unwrap_err();

    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "custom_shift_times"));
    let fetched = get_assignment(&mut persistence, &RoleBasedPolicy, &manager, &created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn test_invalid_day_index_is_invalid_input() {
    let mut persistence = create_test_persistence();
    let err = create_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &create_test_manager(),
        create_request("s1", 7, "am"),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "dayIndex"));
}

#[test]
fn test_custom_shift_without_times_is_rule_violation() {
    let mut persistence = create_test_persistence();
    let err = create_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &create_test_manager(),
        create_request("s1", 0, "custom"),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn test_update_clears_field_with_explicit_null() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();
    let created = create_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        CreateAssignmentRequest {
            notes: Some(String::from("cover for sickness")),
            location_id: Some(String::from("loc-disp")),
            ..create_request("s1", 0, "normal")
        },
    )
    .unwrap();

    let request: UpdateAssignmentRequest =
        serde_json::from_str(r#"{"notes": null, "shiftType": "late"}"#).unwrap();
    let updated = update_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &create_test_manager(),
        &created.id,
        request,
    )
    .unwrap();

    assert_eq!(updated.notes, None);
    assert_eq!(updated.location_id.as_deref(), Some("loc-disp"));
    assert_eq!(updated.shift_type.as_deref(), Some("late"));
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn test_update_missing_assignment_is_not_found() {
    let mut persistence = create_test_persistence();
    let err = update_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &create_test_manager(),
        "missing",
        UpdateAssignmentRequest {
            day_index: Some(1),
            ..UpdateAssignmentRequest::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_delete_twice_is_not_found() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();
    let created = create_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        create_request("s1", 0, "am"),
    )
    .unwrap();

    delete_assignment(&mut persistence, &RoleBasedPolicy, &manager, &created.id).unwrap();
    let err =
        delete_assignment(&mut persistence, &RoleBasedPolicy, &manager, &created.id).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_bulk_delete_reports_each_id() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();
    let first = create_assignment(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        create_request("s1", 0, "am"),
    )
    .unwrap();

    let response = bulk_delete_assignments(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        &BulkDeleteRequest {
            ids: vec![first.id.clone(), String::from("missing")],
        },
    )
    .unwrap();

    assert_eq!(response.deleted, 1);
    assert_eq!(response.failed, 1);
    assert!(response.results[0].ok);
    assert!(!response.results[1].ok);
    assert!(response.results[1].error.is_some());
}

#[test]
fn test_delete_location_assignments_only_touches_that_location() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();
    for (staff, location) in [("s1", "loc-disp"), ("s2", "loc-ward"), ("s3", "loc-disp")] {
        create_assignment(
            &mut persistence,
            &RoleBasedPolicy,
            &manager,
            CreateAssignmentRequest {
                location_id: Some(location.to_string()),
                ..create_request(staff, 0, "am")
            },
        )
        .unwrap();
    }

    let response = delete_location_assignments(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        "2024-W15",
        "loc-disp",
    )
    .unwrap();
    assert_eq!(response.deleted, 2);

    let remaining = rota::AssignmentStore::list_assignments_for_week(
        &mut persistence,
        &rota_domain::WeekId::new("2024-W15").unwrap(),
    )
    .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].staff_id, "s2");
}

#[test]
fn test_copy_week_with_staff_filter() {
    let mut persistence = create_test_persistence();
    let manager = create_test_manager();
    create_assignment(&mut persistence, &RoleBasedPolicy, &manager, create_request("s1", 0, "am"))
        .unwrap();
    create_assignment(&mut persistence, &RoleBasedPolicy, &manager, create_request("s2", 1, "pm"))
        .unwrap();

    let response = copy_week(
        &mut persistence,
        &RoleBasedPolicy,
        &manager,
        "2024-W15",
        &CopyWeekRequest {
            to_week_id: String::from("2024-W16"),
            staff_ids: Some(vec![String::from("s2")]),
        },
    )
    .unwrap();

    assert_eq!(response.copied, 1);
    assert_eq!(response.failed, 0);
    let copy = response.results[0].assignment.as_ref().unwrap();
    assert_eq!(copy.week_id, "2024-W16");
    assert_eq!(copy.staff_id, "s2");
    assert_eq!(copy.day_index, 1);
}

#[test]
fn test_copy_week_onto_itself_is_invalid_input() {
    let mut persistence = create_test_persistence();
    let err = copy_week(
        &mut persistence,
        &RoleBasedPolicy,
        &create_test_manager(),
        "2024-W15",
        &CopyWeekRequest {
            to_week_id: String::from("2024-W15"),
            staff_ids: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "weekId"));
}
