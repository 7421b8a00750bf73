// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentStore, StoreError, WeekStatusStore, WeekStatusUpdate};
use rota_domain::{
    Assignment, AssignmentFields, AssignmentInput, Location, LocationCatalogue, TeamMembership,
    User, WeekId, WeekStatus,
};
use time::{Duration, OffsetDateTime};

/// In-memory store with switchable failures and a call counter.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub assignments: Vec<Assignment>,
    pub statuses: Vec<WeekStatus>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Ids whose delete fails with `Unavailable`.
    pub fail_delete_ids: Vec<String>,
    pub calls: usize,
    next_id: u64,
    clock: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> OffsetDateTime {
        self.clock += 1;
        OffsetDateTime::UNIX_EPOCH + Duration::seconds(self.clock)
    }

    fn unavailable(operation: &'static str, key: &str) -> StoreError {
        StoreError::Unavailable {
            operation,
            key: key.to_string(),
            message: String::from("backend offline"),
        }
    }

    fn read(&mut self, operation: &'static str, key: &str) -> Result<(), StoreError> {
        self.calls += 1;
        if self.fail_reads {
            return Err(Self::unavailable(operation, key));
        }
        Ok(())
    }

    fn write(&mut self, operation: &'static str, key: &str) -> Result<(), StoreError> {
        self.calls += 1;
        if self.fail_writes {
            return Err(Self::unavailable(operation, key));
        }
        Ok(())
    }
}

impl AssignmentStore for MemoryStore {
    fn list_assignments_for_week(
        &mut self,
        week_id: &WeekId,
    ) -> Result<Vec<Assignment>, StoreError> {
        self.read("list_assignments_for_week", week_id.as_str())?;
        Ok(self
            .assignments
            .iter()
            .filter(|a| &a.week_id == week_id)
            .cloned()
            .collect())
    }

    fn get_assignment(&mut self, id: &str) -> Result<Option<Assignment>, StoreError> {
        self.read("get_assignment", id)?;
        Ok(self.assignments.iter().find(|a| a.id == id).cloned())
    }

    fn create_assignment(
        &mut self,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, StoreError> {
        self.write("create_assignment", &fields.staff_id)?;
        self.next_id += 1;
        let now = self.tick();
        let assignment = Assignment {
            id: format!("a{}", self.next_id),
            staff_id: fields.staff_id.clone(),
            week_id: fields.week_id.clone(),
            day_index: fields.day_index,
            location_id: fields.location_id.clone(),
            custom_location: fields.custom_location.clone(),
            shift_type: fields.shift_type,
            custom_start_time: fields.custom_start_time,
            custom_end_time: fields.custom_end_time,
            notes: fields.notes.clone(),
            created_by_id: actor_id.to_string(),
            updated_by_id: actor_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn update_assignment(
        &mut self,
        id: &str,
        fields: &AssignmentFields,
        actor_id: &str,
    ) -> Result<Assignment, StoreError> {
        self.write("update_assignment", id)?;
        let now = self.tick();
        let existing = self
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::assignment_not_found(id))?;
        existing.staff_id.clone_from(&fields.staff_id);
        existing.week_id = fields.week_id.clone();
        existing.day_index = fields.day_index;
        existing.location_id.clone_from(&fields.location_id);
        existing.custom_location.clone_from(&fields.custom_location);
        existing.shift_type = fields.shift_type;
        existing.custom_start_time = fields.custom_start_time;
        existing.custom_end_time = fields.custom_end_time;
        existing.notes.clone_from(&fields.notes);
        existing.updated_by_id = actor_id.to_string();
        existing.updated_at = now;
        Ok(existing.clone())
    }

    fn delete_assignment(&mut self, id: &str) -> Result<(), StoreError> {
        self.write("delete_assignment", id)?;
        if self.fail_delete_ids.iter().any(|f| f == id) {
            return Err(Self::unavailable("delete_assignment", id));
        }
        let before = self.assignments.len();
        self.assignments.retain(|a| a.id != id);
        if self.assignments.len() == before {
            return Err(StoreError::assignment_not_found(id));
        }
        Ok(())
    }
}

impl WeekStatusStore for MemoryStore {
    fn get_week_status(
        &mut self,
        week_id: &WeekId,
        team_id: &str,
    ) -> Result<Option<WeekStatus>, StoreError> {
        self.read("get_week_status", week_id.as_str())?;
        Ok(self
            .statuses
            .iter()
            .find(|s| &s.week_id == week_id && s.team_id == team_id)
            .cloned())
    }

    fn put_week_status(
        &mut self,
        update: &WeekStatusUpdate,
        actor_id: &str,
    ) -> Result<WeekStatus, StoreError> {
        self.write("put_week_status", update.week_id.as_str())?;
        let record = WeekStatus {
            week_id: update.week_id.clone(),
            team_id: update.team_id.clone(),
            org_id: update.org_id.clone(),
            status: update.status,
            has_changes: update.has_changes,
            last_modified: self.tick(),
            last_modified_by_id: actor_id.to_string(),
        };
        self.statuses
            .retain(|s| !(s.week_id == update.week_id && s.team_id == update.team_id));
        self.statuses.push(record.clone());
        Ok(record)
    }

    fn delete_week_status(&mut self, week_id: &WeekId, team_id: &str) -> Result<bool, StoreError> {
        self.write("delete_week_status", week_id.as_str())?;
        let before = self.statuses.len();
        self.statuses
            .retain(|s| !(&s.week_id == week_id && s.team_id == team_id));
        Ok(self.statuses.len() != before)
    }
}

pub fn week(id: &str) -> WeekId {
    WeekId::new(id).unwrap()
}

pub fn input(staff_id: &str, week_id: &str, day_index: i64, shift_type: &str) -> AssignmentInput {
    AssignmentInput {
        staff_id: staff_id.to_string(),
        week_id: week_id.to_string(),
        day_index,
        shift_type: Some(shift_type.to_string()),
        ..AssignmentInput::default()
    }
}

pub fn custom_input(staff_id: &str, day_index: i64, start: &str, end: &str) -> AssignmentInput {
    AssignmentInput {
        custom_start_time: Some(start.to_string()),
        custom_end_time: Some(end.to_string()),
        ..input(staff_id, "2024-W15", day_index, "custom")
    }
}

pub fn user(id: &str, first: &str, last: &str) -> User {
    User {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        job_title: None,
        role: String::from("staff"),
        email: None,
    }
}

pub fn membership(user_id: &str, team_id: &str) -> TeamMembership {
    TeamMembership {
        user_id: user_id.to_string(),
        team_id: team_id.to_string(),
        org_id: String::from("org-1"),
        start_date: None,
        end_date: None,
    }
}

pub fn locations() -> LocationCatalogue {
    let mut catalogue = LocationCatalogue::new();
    for (id, name) in [("loc-disp", "Dispensary"), ("loc-ward", "Ward 7")] {
        catalogue.insert(
            id.to_string(),
            Location {
                id: id.to_string(),
                name: name.to_string(),
                description: None,
            },
        );
    }
    catalogue
}
