// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rota notifications.
//!
//! The engine never sends anything itself. A lifecycle transition reports
//! which `NotificationKind` applies, and the caller renders the message,
//! picks recipients from the team roster and hands it to a
//! `NotificationDispatcher`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dispatch;

#[cfg(test)]
mod tests;

use rota_domain::User;
use serde::{Deserialize, Serialize};

pub use dispatch::{
    DispatchOutcome, NotificationDispatcher, NotifyError, RecordingDispatcher, SentMessage,
    TracingDispatcher, dispatch,
};

/// The event a notification template is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A week's rota was published for the first time.
    PublishedRota,
    /// An already-published rota was republished after changes.
    UpdatesToRota,
}

impl NotificationKind {
    /// Returns the template key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PublishedRota => "published_rota",
            Self::UpdatesToRota => "updates_to_rota",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values substituted into a notification template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContext {
    /// Display name of the person who published.
    pub actor_name: String,
    pub team_name: String,
    pub week_number: u8,
    pub year: i32,
}

/// A rendered subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// A rendered message together with the addresses it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Renders the template for `kind`.
#[must_use]
pub fn render(kind: NotificationKind, context: &NotificationContext) -> Message {
    let NotificationContext {
        actor_name,
        team_name,
        week_number,
        year,
    } = context;

    match kind {
        NotificationKind::PublishedRota => Message {
            subject: format!("Rota published: {team_name}, week {week_number} {year}"),
            body: format!(
                "{actor_name} has published the {team_name} rota for week {week_number} of {year}.\n\nPlease check your shifts."
            ),
        },
        NotificationKind::UpdatesToRota => Message {
            subject: format!("Rota updated: {team_name}, week {week_number} {year}"),
            body: format!(
                "{actor_name} has made changes to the {team_name} rota for week {week_number} of {year}.\n\nPlease review your shifts."
            ),
        },
    }
}

/// Collects the notification addresses of a roster.
///
/// Users without an email are skipped. Addresses keep roster order and are
/// de-duplicated case-insensitively.
#[must_use]
pub fn recipients(roster: &[User]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    for email in roster
        .iter()
        .filter_map(|user| user.email.as_deref())
        .map(str::trim)
        .filter(|email| !email.is_empty())
    {
        let key: String = email.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(email.to_string());
        }
    }
    out
}

/// Renders `kind` and addresses it to every member of `roster` with an email.
#[must_use]
pub fn compose(
    kind: NotificationKind,
    context: &NotificationContext,
    roster: &[User],
) -> Notification {
    let Message { subject, body } = render(kind, context);
    Notification {
        kind,
        recipients: recipients(roster),
        subject,
        body,
    }
}
