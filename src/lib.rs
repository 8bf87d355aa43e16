//! worldstore: persistence and REST layer for a multi-user virtual world.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod wire;

pub use client::{Client, ClientError};
pub use config::Config;
pub use error::{AppError, ConfigError, ErrorKind};
pub use routes::{app, common_routes, common_routes_with_ready, v1_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, run_migrations, Dialect};
