//! Domain models
//!
//! Flat record structs for the two independent aggregates. Writable field sets
//! are validated before they reach the store; invalid input returns
//! ValidationError, not panic.

pub mod product;
pub mod user;
pub mod validation;

pub use product::{NewProduct, Product, ProductSummary};
pub use user::{Credentials, NewUser, User};
pub use validation::ValidationError;
