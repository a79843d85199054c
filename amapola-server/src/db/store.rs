//! Repository interfaces
//!
//! Every operation touches exactly one table and runs as one SQL statement, so
//! atomicity and isolation come from the database. Store-native order is
//! ascending `id`.

use async_trait::async_trait;

use super::DbError;
use crate::models::{Credentials, NewProduct, NewUser, Product, User};

/// Product CRUD and query variants
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product; the store assigns the id.
    async fn create_product(&self, product: &NewProduct) -> Result<Product, DbError>;

    async fn get_product(&self, id: i64) -> Result<Product, DbError>;

    async fn list_products(&self) -> Result<Vec<Product>, DbError>;

    /// Exact match on `category`. No match is an empty list, not an error.
    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, DbError>;

    /// First `limit` products in store-native order.
    async fn list_products_limited(&self, limit: u32) -> Result<Vec<Product>, DbError>;

    /// All products by `category` descending (byte order), ties by id.
    async fn list_products_by_category_desc(&self) -> Result<Vec<Product>, DbError>;

    /// Overwrite every writable field of an existing product.
    async fn update_product(&self, id: i64, product: &NewProduct) -> Result<Product, DbError>;

    /// Remove a product and return the row as it was before removal.
    async fn delete_product(&self, id: i64) -> Result<Product, DbError>;
}

/// User CRUD and credential lookup
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<User, DbError>;

    async fn get_user(&self, id: i64) -> Result<User, DbError>;

    async fn list_users(&self) -> Result<Vec<User>, DbError>;

    async fn update_user(&self, id: i64, user: &NewUser) -> Result<User, DbError>;

    async fn delete_user(&self, id: i64) -> Result<User, DbError>;

    /// First user (by id) whose username and password both match.
    ///
    /// `username` carries no unique constraint. When several rows match, the
    /// lowest id wins and the ambiguity is logged.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, DbError>;
}

/// A complete backend: both repositories plus schema management.
#[async_trait]
pub trait EntityStore: ProductStore + UserStore {
    /// Create tables and indexes if they do not exist yet.
    async fn migrate(&self) -> Result<(), DbError>;

    /// Short backend name for logs ("postgres", "sqlite").
    fn backend(&self) -> &'static str;
}

/// Pick the first of up to two credential matches, warning on ambiguity.
pub(crate) fn first_credential_match(
    mut matches: Vec<User>,
    credentials: &Credentials,
) -> Result<User, DbError> {
    if matches.len() > 1 {
        tracing::warn!(
            username = %credentials.username,
            "multiple users match the given credentials; using the lowest id"
        );
    }
    if matches.is_empty() {
        return Err(DbError::not_found("user", &credentials.username));
    }
    Ok(matches.swap_remove(0))
}
