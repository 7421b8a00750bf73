// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{MemoryStore, custom_input, input, locations, membership, user, week};
use crate::{
    UNASSIGNED_LOCATION, build_cell_index, build_team_roster, build_team_roster_on,
    create_assignment, day_view, filter_users_with_assignments, list_day_view, list_week_view,
    my_rota, resolve_location_name, resolve_shift_label, view::total_minutes,
};
use rota_domain::{Assignment, AssignmentInput, DayIndex, TeamMembership};
use time::macros::date;

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let rows = [
        AssignmentInput {
            location_id: Some(String::from("loc-disp")),
            ..input("s1", "2024-W15", 0, "am")
        },
        AssignmentInput {
            custom_location: Some(String::from("Outpatients")),
            ..input("s1", "2024-W15", 0, "pm")
        },
        AssignmentInput {
            location_id: Some(String::from("loc-ward")),
            ..input("s3", "2024-W15", 0, "longday")
        },
        custom_input("s3", 2, "13:00", "21:00"),
        input("s1", "2024-W16", 0, "normal"),
    ];
    for row in &rows {
        create_assignment(&mut store, row, "mgr-1").unwrap();
    }
    store
}

fn assignment(store: &MemoryStore, id: &str) -> Assignment {
    store.assignments.iter().find(|a| a.id == id).unwrap().clone()
}

#[test]
fn test_cell_index_places_every_assignment_once() {
    let store = seeded_store();
    let index = build_cell_index(store.assignments.clone());

    assert_eq!(index.assignment_count(), store.assignments.len());
    for a in &store.assignments {
        let cell = index.get(&a.staff_id, a.day_index);
        assert_eq!(cell.iter().filter(|c| c.id == a.id).count(), 1);
    }
}

#[test]
fn test_cell_index_keeps_input_order_within_cell() {
    let store = seeded_store();
    let mut reversed = store.assignments.clone();
    reversed.reverse();

    let forward = build_cell_index(store.assignments.clone());
    let backward = build_cell_index(reversed);
    let monday = DayIndex::new(0).unwrap();

    let ids = |cell: &[Assignment]| cell.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(forward.get("s1", monday)), vec!["a1", "a2", "a5"]);
    assert_eq!(ids(backward.get("s1", monday)), vec!["a5", "a2", "a1"]);
    assert!(forward.get("s2", monday).is_empty());
}

#[test]
fn test_shift_labels() {
    let store = seeded_store();

    assert_eq!(resolve_shift_label(&assignment(&store, "a1")), "8:30am - 12pm");
    assert_eq!(resolve_shift_label(&assignment(&store, "a4")), "1:00pm - 9:00pm");

    let mut no_times = assignment(&store, "a4");
    no_times.custom_end_time = None;
    assert_eq!(resolve_shift_label(&no_times), "Custom hours");

    let mut no_shift = assignment(&store, "a1");
    no_shift.shift_type = None;
    assert_eq!(resolve_shift_label(&no_shift), "");
}

#[test]
fn test_location_name_ignores_custom_location() {
    let store = seeded_store();
    let catalogue = locations();

    assert_eq!(
        resolve_location_name(&assignment(&store, "a1"), &catalogue),
        Some("Dispensary")
    );
    assert_eq!(resolve_location_name(&assignment(&store, "a2"), &catalogue), None);

    let mut unknown = assignment(&store, "a1");
    unknown.location_id = Some(String::from("loc-gone"));
    assert_eq!(resolve_location_name(&unknown, &catalogue), None);
}

#[test]
fn test_filter_users_with_assignments_preserves_order() {
    let store = seeded_store();
    let index = build_cell_index(store.assignments.clone());
    let users = vec![user("s3", "Cara", "Doe"), user("s2", "Ben", "Roe"), user("s1", "Ann", "Poe")];

    let shown = filter_users_with_assignments(&users, &index);

    let ids: Vec<&str> = shown.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["s3", "s1"]);
}

#[test]
fn test_team_roster_filters_and_preserves_order() {
    let users = vec![user("u1", "A", "A"), user("u2", "B", "B"), user("u3", "C", "C")];
    let memberships = vec![
        membership("u3", "team-a"),
        membership("u1", "team-a"),
        membership("u2", "team-b"),
    ];

    let roster = build_team_roster("team-a", &memberships, &users);

    let ids: Vec<&str> = roster.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u3"]);
    assert!(build_team_roster("team-z", &memberships, &users).is_empty());
}

#[test]
fn test_team_roster_on_date_honours_bounds() {
    let users = vec![user("u1", "A", "A"), user("u2", "B", "B")];
    let memberships = vec![
        TeamMembership {
            end_date: Some(date!(2024 - 03 - 31)),
            ..membership("u1", "team-a")
        },
        TeamMembership {
            start_date: Some(date!(2024 - 04 - 01)),
            ..membership("u2", "team-a")
        },
    ];

    let march = build_team_roster_on("team-a", &memberships, &users, date!(2024 - 03 - 31));
    let april = build_team_roster_on("team-a", &memberships, &users, date!(2024 - 04 - 01));

    assert_eq!(march.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["u1"]);
    assert_eq!(april.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["u2"]);
    assert_eq!(build_team_roster("team-a", &memberships, &users).len(), 2);
}

#[test]
fn test_list_week_view_builds_rows() {
    let mut store = seeded_store();
    let users = vec![user("s1", "Ann", "Poe"), user("s2", "Ben", "Roe"), user("s3", "Cara", "Doe")];

    let view = list_week_view(&mut store, &week("2024-W15"), "team-a", &users, &locations()).unwrap();

    assert_eq!(view.cell_index.assignment_count(), 4);
    assert_eq!(view.users_with_assignments.len(), 2);
    assert_eq!(view.rows.len(), 2);

    let ann = &view.rows[0];
    assert_eq!(ann.user.id, "s1");
    assert_eq!(ann.days.len(), 7);
    assert_eq!(ann.days[0].len(), 2);
    assert_eq!(ann.days[0][0].location_name.as_deref(), Some("Dispensary"));
    assert_eq!(ann.days[0][1].location_name, None);
    assert_eq!(ann.days[0][1].custom_location.as_deref(), Some("Outpatients"));
    assert!(ann.days[1].is_empty());

    let cara = &view.rows[1];
    assert_eq!(cara.days[2][0].shift_label, "1:00pm - 9:00pm");
}

#[test]
fn test_list_week_view_leaves_out_staff_off_the_roster() {
    let mut store = seeded_store();
    let roster = vec![user("s1", "Ann", "Poe")];

    let view = list_week_view(&mut store, &week("2024-W15"), "team-a", &roster, &locations()).unwrap();

    let staff: Vec<&str> = view.cell_index.iter().map(|(key, _)| key.staff_id.as_str()).collect();
    assert_eq!(staff, vec!["s1"]);
    assert_eq!(view.cell_index.assignment_count(), 2);
    assert!(!view.cell_index.has_assignments("s3"));
    assert_eq!(view.rows.len(), 1);
}

#[test]
fn test_list_week_view_empty_roster_has_empty_index() {
    let mut store = seeded_store();

    let view = list_week_view(&mut store, &week("2024-W15"), "team-a", &[], &locations()).unwrap();

    assert!(view.cell_index.is_empty());
    assert!(view.rows.is_empty());
}

#[test]
fn test_list_day_view_fetches_the_week() {
    let mut store = seeded_store();
    let users = vec![user("s1", "Ann", "Poe")];

    let monday = list_day_view(
        &mut store,
        &week("2024-W15"),
        DayIndex::new(0).unwrap(),
        &users,
        &locations(),
    )
    .unwrap();

    let names: Vec<&str> = monday.groups.iter().map(|g| g.location.as_str()).collect();
    assert_eq!(names, vec!["Dispensary", "Outpatients"]);
    assert!(monday.groups.iter().all(|g| g.staff.iter().all(|(u, _)| u.id == "s1")));
}

#[test]
fn test_list_day_view_store_unavailable() {
    let mut store = seeded_store();
    store.fail_reads = true;

    let err = list_day_view(
        &mut store,
        &week("2024-W15"),
        DayIndex::new(0).unwrap(),
        &[],
        &locations(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), crate::ErrorKind::StoreUnavailable);
}

#[test]
fn test_total_minutes_saturates() {
    assert_eq!(total_minutes([690, 480]), 1170);
    assert_eq!(total_minutes([u32::MAX - 10, 480, 60]), u32::MAX);
    assert_eq!(total_minutes(std::iter::empty()), 0);
}

#[test]
fn test_my_rota_totals_minutes() {
    let mut store = seeded_store();

    let rota = my_rota(&mut store, &week("2024-W15"), "s3", &locations()).unwrap();

    assert_eq!(rota.days.len(), 7);
    assert_eq!(rota.days[0].date, Some(date!(2024 - 04 - 08)));
    assert_eq!(rota.days[0].entries[0].shift_label, "8:30am - 8pm");
    assert_eq!(rota.days[2].entries.len(), 1);
    // longday 690 + custom 13:00-21:00 480
    assert_eq!(rota.total_minutes, 1170);
}

#[test]
fn test_my_rota_without_iso_week_has_no_dates() {
    let mut store = MemoryStore::new();
    create_assignment(&mut store, &input("s1", "spring-rota", 0, "am"), "mgr-1").unwrap();

    let rota = my_rota(&mut store, &week("spring-rota"), "s1", &locations()).unwrap();

    assert!(rota.days.iter().all(|d| d.date.is_none()));
    assert_eq!(rota.total_minutes, 210);
}

#[test]
fn test_day_view_groups_by_location() {
    let store = seeded_store();
    let week_assignments: Vec<Assignment> = store
        .assignments
        .iter()
        .filter(|a| a.week_id.as_str() == "2024-W15")
        .cloned()
        .collect();
    let index = build_cell_index(week_assignments);
    let users = vec![user("s1", "Ann", "Poe"), user("s3", "Cara", "Doe")];

    let monday = day_view(&index, DayIndex::new(0).unwrap(), &users, &locations());
    let names: Vec<&str> = monday.groups.iter().map(|g| g.location.as_str()).collect();
    assert_eq!(names, vec!["Dispensary", "Outpatients", "Ward 7"]);

    let wednesday = day_view(&index, DayIndex::new(2).unwrap(), &users, &locations());
    assert_eq!(wednesday.groups.len(), 1);
    assert_eq!(wednesday.groups[0].location, UNASSIGNED_LOCATION);
    assert_eq!(wednesday.groups[0].staff[0].0.id, "s3");
}

#[test]
fn test_list_week_view_store_unavailable() {
    let mut store = seeded_store();
    store.fail_reads = true;

    let err = list_week_view(&mut store, &week("2024-W15"), "team-a", &[], &locations()).unwrap_err();

    assert_eq!(err.kind(), crate::ErrorKind::StoreUnavailable);
}
