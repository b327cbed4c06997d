//! Client-side logic: guard, fetcher, reconciliation, table view, aggregation.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod table;
pub mod timeseries;
