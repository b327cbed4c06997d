//! User records as reported by the dashboard endpoints.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One row of `/dashboard/users/`: a user and their note activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub total_notes: u64,
    pub last_note_date: Option<DateTime<Utc>>,
}

impl UserSummary {
    /// True if username or email contains `needle`, which must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.username.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }

    /// Last-note column text in local time: `MM/DD/YYYY HH:MM`, or `No notes`.
    pub fn last_note_display(&self) -> String {
        match self.last_note_date {
            Some(at) => at.with_timezone(&Local).format("%m/%d/%Y %H:%M").to_string(),
            None => "No notes".to_string(),
        }
    }
}

/// One row of `/dashboard/notes-per-user/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserNoteCount {
    pub username: String,
    pub count: u64,
}
