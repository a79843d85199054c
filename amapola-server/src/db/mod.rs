//! Database layer - connection pools, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool with an explicit limit - no Arc<Mutex<Connection>>
//! - Repository traits are the only way handlers reach the database
//! - Missing rows are `DbError::NotFound`, never a panic
//! - Consistency between concurrent writers is left to the database

pub mod error;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod sqlite;
pub mod store;

pub use error::DbError;
pub use pool::{connect, create_pool, create_sqlite_pool, DEFAULT_MAX_CONNECTIONS};
pub use postgres::PgStore;
pub use sqlite::SqliteStore;
pub use store::{EntityStore, ProductStore, UserStore};
