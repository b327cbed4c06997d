//! Route protection: render guarded content or redirect to login.

use chrono::{DateTime, Utc};

use crate::services::auth::TokenGuard;

/// Result of rendering a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<T> {
    Render(T),
    Redirect { to: String },
}

impl<T> RouteOutcome<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn into_content(self) -> Option<T> {
        match self {
            Self::Render(content) => Some(content),
            Self::Redirect { .. } => None,
        }
    }
}

/// Wraps protected content behind the token guard.
///
/// The check runs on every render; there is no background expiry timer, so a
/// token that expires while a view is open is caught on the next render.
/// ```ignore
/// let outcome = protector.render(|| build_dashboard());
/// ```
#[derive(Debug, Clone)]
pub struct RouteProtector {
    guard: TokenGuard,
    login_path: String,
}

impl RouteProtector {
    pub fn new(guard: TokenGuard, login_path: impl Into<String>) -> Self {
        Self {
            guard,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Render `content` if the session is authenticated right now.
    pub fn render<T>(&self, content: impl FnOnce() -> T) -> RouteOutcome<T> {
        self.render_at(Utc::now(), content)
    }

    /// Render `content` if the session is authenticated at `now`.
    ///
    /// `content` is not invoked when redirecting.
    pub fn render_at<T>(&self, now: DateTime<Utc>, content: impl FnOnce() -> T) -> RouteOutcome<T> {
        if self.guard.check_at(now).is_authenticated() {
            RouteOutcome::Render(content())
        } else {
            tracing::info!(to = %self.login_path, "Unauthenticated, redirecting");
            RouteOutcome::Redirect {
                to: self.login_path.clone(),
            }
        }
    }
}
