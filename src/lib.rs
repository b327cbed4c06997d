pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;

pub use errors::ClientError;
