// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidDayIndex { day_index: 7 };
    assert_eq!(
        format!("{err}"),
        "Invalid day index: 7. Must be between 0 and 6"
    );

    let err: DomainError = DomainError::InvalidShiftTime {
        field: "customStartTime",
        reason: String::from("required for custom shifts"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid shift time for 'customStartTime': required for custom shifts"
    );

    let err: DomainError = DomainError::InvalidStatus(String::from("archived"));
    assert_eq!(
        format!("{err}"),
        "Invalid status 'archived'. Must be 'draft' or 'published'"
    );

    let err: DomainError = DomainError::InvalidWeekId {
        week_id: String::from(""),
        reason: String::from("week id cannot be empty"),
    };
    assert_eq!(format!("{err}"), "Invalid week id '': week id cannot be empty");

    let err: DomainError = DomainError::MissingField("staffId");
    assert_eq!(format!("{err}"), "Missing required field: staffId");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidShiftType(String::from("night")));
    assert!(err.to_string().contains("night"));
}
