//! Notifications raised for the host to display.
//!
//! The host subscribes by handing a sink to the pipeline; nothing here draws
//! anything.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    /// Informational.
    #[default]
    Default,
    /// Something went wrong.
    Destructive,
}

/// A transient message for the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Visual weight.
    pub variant: NotificationVariant,
}

impl Notification {
    /// The relay asks the recipient to confirm the address on first use.
    #[must_use]
    pub fn first_use() -> Self {
        Self {
            title: "Important for first use".into(),
            description: "The first submission through the relay sends a confirmation email. \
                          Check the inbox and spam folder after the first submission."
                .into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Submission accepted.
    #[must_use]
    pub fn submitted() -> Self {
        Self {
            title: "Thanks for your request!".into(),
            description: "We received your order and will get started on it.".into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Submission failed.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            title: "Something went wrong".into(),
            description: "Please try again later or get in touch with us.".into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Receives notifications.
pub trait NotificationSink: Send {
    /// Deliver one notification.
    fn notify(&mut self, notification: Notification);
}

/// Bounded in-memory sink for tests and hosts that poll.
pub struct InMemoryNotificationSink {
    notifications: VecDeque<Notification>,
    max_notifications: usize,
}

impl InMemoryNotificationSink {
    /// Create a sink keeping at most `max_notifications`, dropping the oldest.
    #[must_use]
    pub fn new(max_notifications: usize) -> Self {
        Self {
            notifications: VecDeque::with_capacity(max_notifications),
            max_notifications,
        }
    }

    /// Snapshot of stored notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.iter().cloned().collect()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn notify(&mut self, notification: Notification) {
        if self.max_notifications == 0 {
            return;
        }
        if self.notifications.len() >= self.max_notifications {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }
}

/// Sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&mut self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => {
                tracing::info!(title = %notification.title, "{}", notification.description);
            }
            NotificationVariant::Destructive => {
                tracing::warn!(title = %notification.title, "{}", notification.description);
            }
        }
    }
}

/// Forwards notifications to a tokio channel the host reads from.
#[cfg(feature = "tokio-runtime")]
pub struct ChannelNotificationSink {
    tx: tokio::sync::mpsc::UnboundedSender<Notification>,
}

#[cfg(feature = "tokio-runtime")]
impl ChannelNotificationSink {
    /// Create a sink and its receiving end.
    #[must_use]
    pub fn channel() -> (Self, tokio::sync::mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[cfg(feature = "tokio-runtime")]
impl NotificationSink for ChannelNotificationSink {
    fn notify(&mut self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}
