//! Franja catalog service
//!
//! HTTP front for the market price catalog: token-gated reads of a
//! market's price list and a small set of write operations, all backed
//! by stored procedures and plain statements on MySQL.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod state;

pub use api::{build_app, build_router};
pub use config::{Config, ConfigError, LogFormat};
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
