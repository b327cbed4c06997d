//! Dashboard wire types and the view model built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pagination::{Page, TableState};
use super::user::{UserNoteCount, UserSummary};

/// Day ranges offered by the notes-per-day chart.
pub const DAY_RANGE_OPTIONS: [u32; 3] = [7, 30, 90];

/// Totals from `/dashboard/stats/`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total_users: u64,
    pub total_notes: u64,
}

/// Notes created on one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Everything one refresh cycle fetched, with the daily series already dense.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardData {
    pub stats: Stats,
    pub users: Vec<UserSummary>,
    pub notes_per_user: Vec<UserNoteCount>,
    pub daily_notes: Vec<DailyCount>,
    pub day_range: u32,
}

/// What the dashboard presents. Rebuilt wholesale from [`DashboardData`]
/// whenever the data or the table state changes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub stats: Stats,
    pub users: Page<UserSummary>,
    pub notes_per_user: Vec<UserNoteCount>,
    pub daily_notes: Vec<DailyCount>,
    pub day_range: u32,
}

impl DashboardData {
    /// Build the view model for the given table state.
    pub fn view(&self, table: &TableState) -> DashboardViewModel {
        DashboardViewModel {
            stats: self.stats,
            users: crate::services::table::view(
                &self.users,
                table.query(),
                table.page(),
                table.page_size(),
            ),
            notes_per_user: self.notes_per_user.clone(),
            daily_notes: self.daily_notes.clone(),
            day_range: self.day_range,
        }
    }
}
