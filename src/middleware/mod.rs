//! Render-time gates for protected routes.

pub mod auth;
