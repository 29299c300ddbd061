//! services/reader/src/adapters/notices.rs
//!
//! Keeps transient user notices until the presentation layer dismisses them.
//! It implements the `NotificationSink` port from the `core` crate.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use quran_browser_core::domain::Notice;
use quran_browser_core::ports::NotificationSink;
use tracing::warn;
use uuid::Uuid;

#[derive(Default)]
pub struct NoticeBoard {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn notices(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pending notices, oldest first.
    pub fn list(&self) -> Vec<Notice> {
        self.notices().clone()
    }

    /// Removes a notice. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut notices = self.notices();
        let before = notices.len();
        notices.retain(|notice| notice.id != id);
        notices.len() != before
    }
}

impl NotificationSink for NoticeBoard {
    fn notify(&self, message: &str) {
        warn!("User notice raised: {}", message);
        self.notices().push(Notice {
            id: Uuid::new_v4(),
            message: message.to_string(),
            raised_at: Utc::now(),
        });
    }
}
