//! amapola-server: HTTP resource service for a product catalog and user accounts
//!
//! Two layers:
//! - [`db`]: the entity store, repository traits over PostgreSQL or SQLite
//! - [`http`]: axum endpoints translating requests into store calls

pub mod db;
pub mod http;
pub mod models;

pub use db::{connect, DbError, EntityStore};
pub use http::{run_server, ServerConfig};
