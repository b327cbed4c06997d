//! Authenticated fetches against the dashboard endpoints.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::errors::ClientError;
use crate::models::dashboard::{DailyCount, Stats};
use crate::models::user::{UserNoteCount, UserSummary};
use crate::session::SessionStore;

pub const STATS_PATH: &str = "/dashboard/stats/";
pub const USERS_PATH: &str = "/dashboard/users/";
pub const NOTES_PER_USER_PATH: &str = "/dashboard/notes-per-user/";
pub const NOTES_PER_DAY_PATH: &str = "/dashboard/notes-per-day/";

/// HTTP client for the admin dashboard API.
///
/// Every request carries the session's current access credential as a
/// bearer token, read at send time. No retries, no timeout.
#[derive(Clone)]
pub struct DashboardApi {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for DashboardApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardApi")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DashboardApi {
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /dashboard/stats/
    pub async fn fetch_stats(&self) -> Result<Stats, ClientError> {
        self.get_json(STATS_PATH).await
    }

    /// GET /dashboard/users/
    pub async fn fetch_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        self.get_json(USERS_PATH).await
    }

    /// GET /dashboard/notes-per-user/
    pub async fn fetch_notes_per_user(&self) -> Result<Vec<UserNoteCount>, ClientError> {
        self.get_json(NOTES_PER_USER_PATH).await
    }

    /// GET /dashboard/notes-per-day/?days=N — sparse, only days with notes.
    pub async fn fetch_notes_per_day(&self, days: u32) -> Result<Vec<DailyCount>, ClientError> {
        self.get_json(&format!("{NOTES_PER_DAY_PATH}?days={days}")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let token = self
            .session
            .access_token()
            .ok_or(ClientError::MissingCredential)?;

        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                endpoint: path.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: path.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| ClientError::Transport {
            endpoint: path.to_string(),
            source: e,
        })?;

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}
