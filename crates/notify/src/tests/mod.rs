// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use rota_domain::User;

pub fn user(id: &str, email: Option<&str>) -> User {
    User {
        id: id.to_string(),
        first_name: String::from("Test"),
        last_name: id.to_string(),
        job_title: None,
        role: String::from("staff"),
        email: email.map(str::to_string),
    }
}

pub fn context() -> crate::NotificationContext {
    crate::NotificationContext {
        actor_name: String::from("Alex Moore"),
        team_name: String::from("Dispensary"),
        week_number: 15,
        year: 2024,
    }
}
