// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar week identifiers and day offsets.
//!
//! A `WeekId` is accepted on write as any non-empty string. The ISO helpers
//! (`iso_week`, `days`, `date_of`) are only meaningful for the `YYYY-Www`
//! format and report `InvalidWeekId` otherwise.

use crate::error::DomainError;
use time::{Date, Duration, Weekday};

/// Number of days in a rota week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Day offset within a week, 0 (Monday) to 6 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayIndex(u8);

impl DayIndex {
    /// Creates a day index, rejecting values outside 0-6.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDayIndex` if `value` is not in `0..=6`.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v < DAYS_PER_WEEK)
            .map(Self)
            .ok_or(DomainError::InvalidDayIndex { day_index: value })
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All seven days, Monday first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..DAYS_PER_WEEK).map(Self)
    }

    /// The weekday this offset falls on.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for DayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a calendar week, conventionally `YYYY-Www` (e.g. `2024-W15`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekId(String);

impl WeekId {
    /// Creates a week identifier from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekId` if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidWeekId {
                week_id: value.to_string(),
                reason: String::from("week id cannot be empty"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the ISO week containing `date`.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        let (year, week, _) = date.to_iso_week_date();
        Self(format!("{year}-W{week:02}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the identifier as an ISO `(year, week)` pair.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekId` if the identifier is not in
    /// `YYYY-Www` form or names a week the year does not have.
    pub fn iso_week(&self) -> Result<(i32, u8), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidWeekId {
            week_id: self.0.clone(),
            reason: reason.to_string(),
        };

        let (year_part, week_part) = self
            .0
            .split_once("-W")
            .ok_or_else(|| invalid("expected YYYY-Www"))?;
        let year: i32 = year_part
            .parse()
            .map_err(|_| invalid("year is not a number"))?;
        let week: u8 = week_part
            .parse()
            .map_err(|_| invalid("week is not a number"))?;

        Date::from_iso_week_date(year, week, Weekday::Monday)
            .map_err(|e| invalid(&e.to_string()))?;

        Ok((year, week))
    }

    /// Returns the Monday this week starts on.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekId` if the identifier is not an ISO week.
    pub fn monday(&self) -> Result<Date, DomainError> {
        let (year, week) = self.iso_week()?;
        Date::from_iso_week_date(year, week, Weekday::Monday).map_err(|e| {
            DomainError::InvalidWeekId {
                week_id: self.0.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// Returns the calendar date of `day` within this week.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekId` if the identifier is not an ISO
    /// week or the date falls outside the supported range.
    pub fn date_of(&self, day: DayIndex) -> Result<Date, DomainError> {
        self.monday()?
            .checked_add(Duration::days(i64::from(day.value())))
            .ok_or_else(|| DomainError::InvalidWeekId {
                week_id: self.0.clone(),
                reason: String::from("date out of range"),
            })
    }

    /// Returns the seven dates of this week, Monday first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekId` if the identifier is not an ISO week.
    pub fn days(&self) -> Result<Vec<Date>, DomainError> {
        DayIndex::all().map(|day| self.date_of(day)).collect()
    }
}

impl std::fmt::Display for WeekId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
