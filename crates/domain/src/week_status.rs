// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Publication state of a team's rota for one week.
//!
//! A missing `WeekStatus` record means the week is an implicit draft with no
//! pending changes. `EffectiveStatus::of` is the single place that applies
//! this convention.

use crate::error::DomainError;
use crate::week::WeekId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Publication state of a week's rota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    Draft,
    Published,
}

impl PublicationStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for PublicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stored publication record for a `(week_id, team_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekStatus {
    pub week_id: WeekId,
    pub team_id: String,
    /// Owning organisation, denormalized for querying.
    pub org_id: String,
    pub status: PublicationStatus,
    /// True when the rota was edited after it was last published.
    pub has_changes: bool,
    pub last_modified: OffsetDateTime,
    pub last_modified_by_id: String,
}

/// The status a week is treated as having, whether or not a record exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveStatus {
    pub status: PublicationStatus,
    pub has_changes: bool,
    /// False when no record exists and the draft state is implicit.
    pub explicit: bool,
}

impl EffectiveStatus {
    /// Resolves the effective status from an optional stored record.
    #[must_use]
    pub const fn of(record: Option<&WeekStatus>) -> Self {
        match record {
            Some(record) => Self {
                status: record.status,
                has_changes: record.has_changes,
                explicit: true,
            },
            None => Self {
                status: PublicationStatus::Draft,
                has_changes: false,
                explicit: false,
            },
        }
    }

    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self.status, PublicationStatus::Published)
    }

    /// Whether staff should be prompted to republish.
    #[must_use]
    pub const fn needs_republish(&self) -> bool {
        self.is_published() && self.has_changes
    }
}
