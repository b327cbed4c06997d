//! Wire types and view models of the admin dashboard.

pub mod dashboard;
pub mod pagination;
pub mod user;
