//! Transient, dismissable user notifications.

use std::collections::VecDeque;
use std::fmt;

/// How prominently a notification is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// Something needs attention but nothing failed.
    Warning,
    /// An operation failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message waiting to be shown or dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Handle used to dismiss it.
    pub id: u64,
    /// Severity.
    pub severity: Severity,
    /// User-facing text.
    pub message: String,
    /// Whether a retry control should be offered next to it.
    pub retry: bool,
}

/// Queue of active notifications, oldest first.
#[derive(Debug)]
pub struct NotificationCenter {
    next_id: u64,
    capacity: usize,
    active: VecDeque<Notification>,
}

impl NotificationCenter {
    /// Keep at most `capacity` notifications; older ones drop off.
    pub fn new(capacity: usize) -> Self {
        Self {
            next_id: 1,
            capacity: capacity.max(1),
            active: VecDeque::new(),
        }
    }

    /// Queue a notification and return its id.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>, retry: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.active.len() == self.capacity {
            self.active.pop_front();
        }
        self.active.push_back(Notification {
            id,
            severity,
            message: message.into(),
            retry,
        });
        id
    }

    /// Remove a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    /// Remove and return every active notification.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.active.drain(..).collect()
    }

    /// Active notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    /// The newest notification, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.active.back()
    }

    /// Number of active notifications.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(8)
    }
}
