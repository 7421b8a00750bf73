// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rota_notify::{NotificationDispatcher, NotifyError};
use rota_persistence::Persistence;

use crate::{AuthenticatedActor, CreateAssignmentRequest, LocationDto, Role, UserDto};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_test_manager() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("mgr-1"), Role::Manager)
}

pub fn create_test_staff(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(id.to_string(), Role::Staff)
}

pub fn create_request(staff_id: &str, day_index: i64, shift_type: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        staff_id: staff_id.to_string(),
        week_id: String::from("2024-W15"),
        day_index,
        shift_type: Some(shift_type.to_string()),
        ..CreateAssignmentRequest::default()
    }
}

pub fn user_dto(id: &str, first_name: &str, email: Option<&str>) -> UserDto {
    UserDto {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: String::from("Tester"),
        job_title: Some(String::from("Pharmacist")),
        role: String::from("staff"),
        email: email.map(str::to_string),
    }
}

pub fn location_dtos() -> Vec<LocationDto> {
    vec![
        LocationDto {
            id: String::from("loc-disp"),
            name: String::from("Dispensary"),
            description: None,
        },
        LocationDto {
            id: String::from("loc-ward"),
            name: String::from("Ward 7"),
            description: Some(String::from("Medical ward")),
        },
    ]
}

/// Dispatcher that refuses every message.
pub struct FailingDispatcher;

impl NotificationDispatcher for FailingDispatcher {
    fn send(&self, _recipients: &[String], _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::DeliveryFailed {
            reason: String::from("mail relay offline"),
        })
    }
}
