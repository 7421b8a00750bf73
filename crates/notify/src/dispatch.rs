// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

use crate::Notification;

/// Errors reported by a notification dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The message could not be handed to the delivery service.
    #[error("Notification delivery failed: {reason}")]
    DeliveryFailed { reason: String },
}

/// Delivers rendered notifications, typically as email.
pub trait NotificationDispatcher {
    /// Sends one message to all `recipients`.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DeliveryFailed` if the message was not accepted.
    fn send(&self, recipients: &[String], subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Result of handing a notification to a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { recipient_count: usize },
    /// Nobody on the roster has an address; the dispatcher was not called.
    NoRecipients,
}

/// Sends a composed notification through `dispatcher`.
///
/// # Errors
///
/// Propagates the dispatcher's error.
pub fn dispatch(
    dispatcher: &dyn NotificationDispatcher,
    notification: &Notification,
) -> Result<DispatchOutcome, NotifyError> {
    if notification.recipients.is_empty() {
        debug!(kind = %notification.kind, "No recipients for notification, skipping");
        return Ok(DispatchOutcome::NoRecipients);
    }

    dispatcher.send(
        &notification.recipients,
        &notification.subject,
        &notification.body,
    )?;

    info!(
        kind = %notification.kind,
        recipient_count = notification.recipients.len(),
        "Notification dispatched"
    );
    Ok(DispatchOutcome::Sent {
        recipient_count: notification.recipients.len(),
    })
}

/// Dispatcher that writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
    fn send(&self, recipients: &[String], subject: &str, body: &str) -> Result<(), NotifyError> {
        info!(
            recipients = ?recipients,
            subject,
            body,
            "Notification (not delivered)"
        );
        Ok(())
    }
}

/// A message captured by `RecordingDispatcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Dispatcher that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn send(&self, recipients: &[String], subject: &str, body: &str) -> Result<(), NotifyError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|e| NotifyError::DeliveryFailed {
                reason: e.to_string(),
            })?;
        sent.push(SentMessage {
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
