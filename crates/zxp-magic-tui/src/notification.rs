use std::pin::Pin;

use tokio::time::{Duration, Instant, Sleep, sleep_until};

/// How long a notification stays visible unless superseded.
pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub created_at: Instant,
    expires_at: Instant,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// Holds at most one notification. A newer entry replaces the current one
/// immediately and takes its expiry timer with it.
pub struct NotificationQueue {
    current: Option<Notification>,
    timer: Option<Pin<Box<Sleep>>>,
    lifetime: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl NotificationQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            timer: None,
            lifetime,
        }
    }

    pub fn publish(&mut self, kind: NotificationKind, text: impl Into<String>) {
        let created_at = Instant::now();
        // Drop the previous entry's timer so it can never clear this one.
        self.timer = None;
        self.current = Some(Notification {
            kind,
            text: text.into(),
            created_at,
            expires_at: created_at + self.lifetime,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.publish(NotificationKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.publish(NotificationKind::Error, text);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.timer = None;
        self.current = None;
    }

    /// Resolves when the current notification's timer fires, clearing it and
    /// returning the expired entry. Pending while nothing is shown.
    ///
    /// Cancel-safe: dropping the future keeps the timer armed.
    pub async fn expired(&mut self) -> Option<Notification> {
        let Some(deadline) = self.current.as_ref().map(Notification::expires_at) else {
            return std::future::pending().await;
        };
        let timer = self
            .timer
            .get_or_insert_with(|| Box::pin(sleep_until(deadline)));
        timer.as_mut().await;
        self.timer = None;
        self.current.take()
    }
}
