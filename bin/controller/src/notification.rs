//! Single-slot notification banner.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
        }
    }
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

/// Shows at most one notification at a time.
///
/// A new notification replaces the current one and restarts its timer.
/// Success notifications hide themselves after `auto_hide`; errors stay
/// until dismissed.
#[derive(Debug, Clone)]
pub struct NotificationPresenter {
    current: Option<Notification>,
    auto_hide: Duration,
}

impl NotificationPresenter {
    pub const fn new(auto_hide: Duration) -> Self {
        Self {
            current: None,
            auto_hide,
        }
    }

    pub fn notify(
        &mut self,
        title: impl Into<String>,
        kind: NotificationKind,
        message: impl Into<String>,
    ) {
        self.notify_at(title, kind, message, Instant::now());
    }

    pub fn notify_at(
        &mut self,
        title: impl Into<String>,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) {
        let notification = Notification {
            title: title.into(),
            message: message.into(),
            kind,
            shown_at: now,
        };
        debug!(title = %notification.title, kind = ?kind, "Showing notification");
        self.current = Some(notification);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Hide an expired success notification. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.current.as_ref().is_some_and(|n| {
            n.kind == NotificationKind::Success
                && now.saturating_duration_since(n.shown_at) >= self.auto_hide
        });

        if expired {
            debug!("Success notification expired");
            self.current = None;
        }
        expired
    }

    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
