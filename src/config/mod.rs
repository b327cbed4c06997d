use std::env;
use std::path::PathBuf;

/// Default day range for the notes-per-day chart.
pub const DEFAULT_DAY_RANGE: u32 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub session_file: PathBuf,
    pub day_range: u32,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string())
                .trim_end_matches('/')
                .to_string(),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".notesdash/session.json")),
            day_range: env::var("DASHBOARD_DAY_RANGE")
                .unwrap_or_else(|_| DEFAULT_DAY_RANGE.to_string())
                .parse()
                .unwrap_or(DEFAULT_DAY_RANGE),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            login_path: "/login".to_string(),
            session_file: PathBuf::from(".notesdash/session.json"),
            day_range: DEFAULT_DAY_RANGE,
        }
    }
}
