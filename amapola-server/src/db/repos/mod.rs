//! Repository implementations for database access
//!
//! One file per table, each implementing its repository trait for both
//! backends. Patterns shared by every repository:
//! - Single statement per operation (no check-then-write)
//! - `RETURNING` on writes, so callers get the stored row back
//! - Explicit `ORDER BY id` wherever store-native order matters

pub mod products;
pub mod users;
