//! Dashboard aggregation: concurrent fetches, gap-filling and table view.

use chrono::{Local, NaiveDate};
use tokio::sync::watch;

use crate::errors::ClientError;
use crate::models::dashboard::{DashboardData, DashboardViewModel};
use crate::models::pagination::TableState;
use crate::services::api::DashboardApi;
use crate::services::timeseries;

/// Cancellation scope tied to the lifetime of a view.
///
/// Cancelling the scope, or dropping it, abandons every refresh started
/// with one of its tokens.
#[derive(Debug)]
pub struct ViewScope {
    tx: watch::Sender<bool>,
}

/// Handle passed to a refresh so it can notice its view going away.
#[derive(Debug, Clone)]
pub struct ScopeToken {
    rx: watch::Receiver<bool>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl ScopeToken {
    pub fn is_cancelled(&self) -> bool {
        // A closed channel means the scope was dropped.
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the scope is cancelled or dropped.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // Err means the sender is gone, which counts as cancelled too.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Builds dashboard data from the four dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardAggregator {
    api: DashboardApi,
}

impl DashboardAggregator {
    pub fn new(api: DashboardApi) -> Self {
        Self { api }
    }

    /// Fetch everything for a `day_range`-day window ending at `today`.
    ///
    /// The four requests run concurrently and all of them settle before a
    /// result is produced. Any failure aborts the cycle: each one is logged
    /// and the first, in endpoint order, is returned.
    pub async fn fetch(&self, day_range: u32, today: NaiveDate) -> Result<DashboardData, ClientError> {
        if day_range == 0 {
            return Err(ClientError::Validation(
                "day range must be at least 1".to_string(),
            ));
        }

        tracing::info!(day_range, %today, "Refreshing dashboard");

        let (stats, users, notes_per_user, notes_per_day) = tokio::join!(
            self.api.fetch_stats(),
            self.api.fetch_users(),
            self.api.fetch_notes_per_user(),
            self.api.fetch_notes_per_day(day_range),
        );

        let (stats, users, notes_per_user, notes_per_day) =
            match (stats, users, notes_per_user, notes_per_day) {
                (Ok(s), Ok(u), Ok(npu), Ok(npd)) => (s, u, npu, npd),
                (s, u, npu, npd) => {
                    let failures: Vec<ClientError> =
                        [s.err(), u.err(), npu.err(), npd.err()].into_iter().flatten().collect();
                    for e in &failures {
                        tracing::error!(error = %e, "Dashboard fetch failed");
                    }
                    tracing::warn!(failed = failures.len(), "Dashboard refresh aborted");
                    return Err(failures
                        .into_iter()
                        .next()
                        .unwrap_or(ClientError::Cancelled));
                }
            };

        let daily_notes = timeseries::reconcile(day_range, &notes_per_day, today)?;

        tracing::debug!(
            users = users.len(),
            sparse_days = notes_per_day.len(),
            "Dashboard data assembled"
        );

        Ok(DashboardData {
            stats,
            users,
            notes_per_user,
            daily_notes,
            day_range,
        })
    }

    /// Like [`fetch`](Self::fetch), abandoned with [`ClientError::Cancelled`]
    /// as soon as `scope` is cancelled.
    pub async fn fetch_in(
        &self,
        scope: &ScopeToken,
        day_range: u32,
        today: NaiveDate,
    ) -> Result<DashboardData, ClientError> {
        if scope.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = scope.cancelled() => {
                tracing::debug!(day_range, "Dashboard refresh cancelled");
                Err(ClientError::Cancelled)
            }
            result = self.fetch(day_range, today) => result,
        }
    }

    /// Fetch for `day_range` days ending today and build the view model.
    pub async fn refresh(
        &self,
        day_range: u32,
        table: &TableState,
    ) -> Result<DashboardViewModel, ClientError> {
        let data = self.fetch(day_range, local_today()).await?;
        Ok(data.view(table))
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Interactive dashboard state: selected range, table state, last good data.
///
/// A failed refresh leaves the previous data (initially empty) in place.
#[derive(Debug)]
pub struct DashboardController {
    aggregator: DashboardAggregator,
    day_range: u32,
    table: TableState,
    data: DashboardData,
    today: fn() -> NaiveDate,
}

impl DashboardController {
    pub fn new(aggregator: DashboardAggregator, day_range: u32) -> Self {
        Self {
            aggregator,
            day_range,
            table: TableState::default(),
            data: DashboardData::default(),
            today: local_today,
        }
    }

    /// Replace the local-date clock that decides where the series ends.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn day_range(&self) -> u32 {
        self.day_range
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn view_model(&self) -> DashboardViewModel {
        self.data.view(&self.table)
    }

    /// Refetch everything for the current range.
    pub async fn refresh(&mut self) -> Result<DashboardViewModel, ClientError> {
        let data = self
            .aggregator
            .fetch(self.day_range, (self.today)())
            .await?;
        Ok(self.commit(data))
    }

    /// Refetch within `scope`; a cancelled refresh writes nothing.
    pub async fn refresh_in(&mut self, scope: &ScopeToken) -> Result<DashboardViewModel, ClientError> {
        let data = self
            .aggregator
            .fetch_in(scope, self.day_range, (self.today)())
            .await?;
        Ok(self.commit(data))
    }

    /// Select a new range. Refetches only when the range actually changes.
    ///
    /// The range is adopted only once its data has arrived, so after a failed
    /// change the controller still reports the previous range and selecting
    /// the new one again retries the fetch.
    pub async fn set_day_range(&mut self, day_range: u32) -> Result<DashboardViewModel, ClientError> {
        if day_range == self.day_range {
            return Ok(self.view_model());
        }
        let data = self
            .aggregator
            .fetch(day_range, (self.today)())
            .await?;
        Ok(self.commit(data))
    }

    fn commit(&mut self, data: DashboardData) -> DashboardViewModel {
        self.day_range = data.day_range;
        self.data = data;
        self.view_model()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> DashboardViewModel {
        self.table.set_query(query);
        self.view_model()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> DashboardViewModel {
        self.table.set_page_size(page_size);
        self.view_model()
    }

    pub fn set_page(&mut self, page: usize) -> DashboardViewModel {
        self.table.set_page(page);
        self.view_model()
    }
}
