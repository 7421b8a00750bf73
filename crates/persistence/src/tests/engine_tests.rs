// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The engine's operations running against the SQLite store.

use super::{create_test_persistence, week};
use rota::{
    ErrorKind, copy_week, create_assignment, delete_assignment, effective_week_status,
    mark_changed, reset_week_status, set_week_status, update_assignment,
};
use rota_domain::{AssignmentInput, AssignmentPatch, PublicationStatus};
use rota_notify::NotificationKind;

fn input(staff_id: &str, day_index: i64) -> AssignmentInput {
    AssignmentInput {
        staff_id: staff_id.to_string(),
        week_id: String::from("2024-W15"),
        day_index,
        shift_type: Some(String::from("longday")),
        ..AssignmentInput::default()
    }
}

#[test]
fn test_assignment_lifecycle_through_engine() {
    let mut persistence = create_test_persistence();

    let created = create_assignment(&mut persistence, &input("s1", 0), "mgr-1").unwrap();
    let patch = AssignmentPatch {
        day_index: Some(5),
        ..AssignmentPatch::default()
    };
    let updated = update_assignment(&mut persistence, &created.id, &patch, "mgr-1").unwrap();
    assert_eq!(updated.day_index.value(), 5);

    delete_assignment(&mut persistence, &created.id).unwrap();
    let err = delete_assignment(&mut persistence, &created.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_copy_week_through_engine() {
    let mut persistence = create_test_persistence();
    create_assignment(&mut persistence, &input("s1", 0), "mgr-1").unwrap();
    create_assignment(&mut persistence, &input("s2", 1), "mgr-1").unwrap();

    let outcome = copy_week(
        &mut persistence,
        &week("2024-W15"),
        &week("2024-W16"),
        "mgr-2",
        None,
    )
    .unwrap();

    assert_eq!(outcome.succeeded(), 2);
    assert_eq!(
        persistence
            .list_assignments_for_week(&week("2024-W16"))
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_publication_lifecycle_through_engine() {
    let mut persistence = create_test_persistence();
    let w = week("2024-W15");

    let first = set_week_status(&mut persistence, &w, "team-a", "org-1", "published", "mgr-1")
        .unwrap();
    assert_eq!(first.notification, Some(NotificationKind::PublishedRota));

    mark_changed(&mut persistence, &w, "team-a", "mgr-1").unwrap();
    assert!(effective_week_status(&mut persistence, &w, "team-a")
        .unwrap()
        .needs_republish());

    let second = set_week_status(&mut persistence, &w, "team-a", "org-1", "published", "mgr-1")
        .unwrap();
    assert_eq!(second.notification, Some(NotificationKind::UpdatesToRota));
    assert!(!second.week_status.has_changes);

    assert!(reset_week_status(&mut persistence, &w, "team-a").unwrap());
    let effective = effective_week_status(&mut persistence, &w, "team-a").unwrap();
    assert_eq!(effective.status, PublicationStatus::Draft);
    assert!(!effective.explicit);
}
