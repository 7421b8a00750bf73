// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift presets and wall-clock shift times.
//!
//! The preset catalogue is a closed, static table. Custom shifts carry their
//! own start and end times on the assignment record.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Time;
use time::macros::{format_description, time};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftTime(Time);

impl ShiftTime {
    /// Wraps a `time::Time`, discarding seconds.
    #[must_use]
    pub const fn new(time: Time) -> Self {
        Self(time)
    }

    /// Parses a 24-hour `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShiftTime` if the value is not a valid
    /// two-digit hour and minute pair.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, DomainError> {
        Time::parse(value.trim(), format_description!("[hour]:[minute]"))
            .map(Self)
            .map_err(|e| DomainError::InvalidShiftTime {
                field,
                reason: format!("'{value}' is not a valid HH:MM time ({e})"),
            })
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.0.hour()
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes_of_day(self) -> u32 {
        self.0.hour() as u32 * 60 + self.0.minute() as u32
    }

    /// Length in minutes of a shift running from `self` to `end`.
    ///
    /// An end earlier than the start is an overnight shift and wraps past
    /// midnight.
    #[must_use]
    pub const fn minutes_until(self, end: Self) -> u32 {
        let start: u32 = self.minutes_of_day();
        let end: u32 = end.minutes_of_day();
        if end >= start {
            end - start
        } else {
            MINUTES_PER_DAY - start + end
        }
    }

    /// Formats the time in 12-hour form, e.g. `8:30am` or `12:00pm`.
    #[must_use]
    pub fn to_twelve_hour(self) -> String {
        let hour: u8 = self.hour();
        let suffix: &str = if hour < 12 { "am" } else { "pm" };
        let display_hour: u8 = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{display_hour}:{:02}{suffix}", self.minute())
    }
}

impl std::fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Identifier of a shift preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Normal,
    Am,
    Pm,
    Late,
    LongDay,
    /// Times are supplied on the assignment itself.
    Custom,
}

impl ShiftType {
    /// Returns the stable string key used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Am => "am",
            Self::Pm => "pm",
            Self::Late => "late",
            Self::LongDay => "longday",
            Self::Custom => "custom",
        }
    }

    /// Returns the catalogue entry for this shift type.
    #[must_use]
    pub fn preset(&self) -> &'static ShiftPreset {
        match self {
            Self::Normal => &SHIFT_PRESETS[0],
            Self::Am => &SHIFT_PRESETS[1],
            Self::Pm => &SHIFT_PRESETS[2],
            Self::Late => &SHIFT_PRESETS[3],
            Self::LongDay => &SHIFT_PRESETS[4],
            Self::Custom => &SHIFT_PRESETS[5],
        }
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl FromStr for ShiftType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            "late" => Ok(Self::Late),
            "longday" => Ok(Self::LongDay),
            "custom" => Ok(Self::Custom),
            _ => Err(DomainError::InvalidShiftType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, fixed time-range shift template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPreset {
    pub id: ShiftType,
    /// Display label.
    pub name: &'static str,
    /// `None` only for the custom preset.
    pub start_time: Option<ShiftTime>,
    /// `None` only for the custom preset.
    pub end_time: Option<ShiftTime>,
    /// Human-readable time range shown on the rota.
    pub description: &'static str,
}

impl ShiftPreset {
    /// Returns the preset's time range, if it has one.
    #[must_use]
    pub const fn time_range(&self) -> Option<(ShiftTime, ShiftTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// The shift preset catalogue, in display order.
pub static SHIFT_PRESETS: [ShiftPreset; 6] = [
    ShiftPreset {
        id: ShiftType::Normal,
        name: "Normal",
        start_time: Some(ShiftTime::new(time!(8:30))),
        end_time: Some(ShiftTime::new(time!(17:00))),
        description: "8:30am - 5pm",
    },
    ShiftPreset {
        id: ShiftType::Am,
        name: "AM",
        start_time: Some(ShiftTime::new(time!(8:30))),
        end_time: Some(ShiftTime::new(time!(12:00))),
        description: "8:30am - 12pm",
    },
    ShiftPreset {
        id: ShiftType::Pm,
        name: "PM",
        start_time: Some(ShiftTime::new(time!(12:00))),
        end_time: Some(ShiftTime::new(time!(17:00))),
        description: "12pm - 5pm",
    },
    ShiftPreset {
        id: ShiftType::Late,
        name: "Late",
        start_time: Some(ShiftTime::new(time!(12:00))),
        end_time: Some(ShiftTime::new(time!(20:00))),
        description: "12pm - 8pm",
    },
    ShiftPreset {
        id: ShiftType::LongDay,
        name: "Long Day",
        start_time: Some(ShiftTime::new(time!(8:30))),
        end_time: Some(ShiftTime::new(time!(20:00))),
        description: "8:30am - 8pm",
    },
    ShiftPreset {
        id: ShiftType::Custom,
        name: "Custom",
        start_time: None,
        end_time: None,
        description: "Custom hours",
    },
];

/// Looks up a preset by its string key.
#[must_use]
pub fn shift_preset(id: &str) -> Option<&'static ShiftPreset> {
    SHIFT_PRESETS.iter().find(|preset| preset.id.as_str() == id)
}
