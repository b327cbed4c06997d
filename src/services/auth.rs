//! Token guard: local expiry check of the stored access credential.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::SessionStore;

/// Claims carried by an access credential.
///
/// Only `exp` is interpreted. It is a JSON number in seconds since epoch and
/// may be fractional. Everything else the issuer put in the token is kept in
/// `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub exp: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Subject identity, when the issuer provides one.
    pub fn subject(&self) -> Option<&Value> {
        self.extra.get("sub").or_else(|| self.extra.get("user_id"))
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Authenticated(Claims),
    Missing,
    Malformed,
    Expired { exp: f64 },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Decode the claim set of `token` without verifying its signature.
///
/// Signature checks belong to the issuing server; the client only needs the
/// token's shape (three base64url segments, a JSON object header and a JSON
/// payload with `exp`) and its declared expiry. The header's `alg` is not
/// interpreted, so any signing algorithm is accepted.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    decode_segment::<Map<String, Value>>(header)?;
    decode_segment::<Claims>(payload)
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Classify `credential` at instant `now` (seconds since epoch).
///
/// A token expiring exactly at `now` is already expired.
pub fn evaluate(credential: Option<&str>, now: i64) -> AuthState {
    let Some(token) = credential else {
        return AuthState::Missing;
    };
    match decode_claims(token) {
        None => AuthState::Malformed,
        Some(claims) if claims.exp > now as f64 => AuthState::Authenticated(claims),
        Some(claims) => AuthState::Expired { exp: claims.exp },
    }
}

/// `evaluate(credential, now).is_authenticated()`.
pub fn is_authenticated_at(credential: Option<&str>, now: i64) -> bool {
    evaluate(credential, now).is_authenticated()
}

/// Decides whether the session holds a usable access credential.
#[derive(Clone)]
pub struct TokenGuard {
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for TokenGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGuard").finish_non_exhaustive()
    }
}

impl TokenGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Check the stored credential against the wall clock.
    pub fn is_authenticated(&self) -> bool {
        self.check_at(Utc::now()).is_authenticated()
    }

    /// Check the stored credential against `now`.
    pub fn check_at(&self, now: DateTime<Utc>) -> AuthState {
        let token = self.session.access_token();
        let state = evaluate(token.as_deref(), now.timestamp());
        match &state {
            AuthState::Authenticated(_) => tracing::debug!("Access credential valid"),
            AuthState::Missing => tracing::debug!("No access credential"),
            AuthState::Malformed => tracing::debug!("Access credential could not be decoded"),
            AuthState::Expired { exp } => {
                tracing::debug!(exp, now = now.timestamp(), "Access credential expired")
            }
        }
        state
    }
}
