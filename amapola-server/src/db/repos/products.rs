//! Product repository
//!
//! Writes use `RETURNING` so update and delete observe exactly the row they
//! changed, in one round trip and without a check-then-write race.

use async_trait::async_trait;

use crate::db::{DbError, PgStore, ProductStore, SqliteStore};
use crate::models::{NewProduct, Product};

#[async_trait]
impl ProductStore for PgStore {
    async fn create_product(&self, product: &NewProduct) -> Result<Product, DbError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO producto (title, price, description, category, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, price, description, category, image
            "#,
        )
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "product inserted");
        Ok(created)
    }

    async fn get_product(&self, id: i64) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, title, price, description, category, image FROM producto WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))
    }

    async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, title, price, description, category, image FROM producto ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price, description, category, image
            FROM producto
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products_limited(&self, limit: u32) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price, description, category, image
            FROM producto
            ORDER BY id
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products_by_category_desc(&self) -> Result<Vec<Product>, DbError> {
        // "C" collation: plain byte order regardless of the database locale
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price, description, category, image
            FROM producto
            ORDER BY category COLLATE "C" DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_product(&self, id: i64, product: &NewProduct) -> Result<Product, DbError> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE producto
            SET title = $2, price = $3, description = $4, category = $5, image = $6
            WHERE id = $1
            RETURNING id, title, price, description, category, image
            "#,
        )
        .bind(id)
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))?;

        tracing::debug!(id, "product updated");
        Ok(updated)
    }

    async fn delete_product(&self, id: i64) -> Result<Product, DbError> {
        let deleted = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM producto
            WHERE id = $1
            RETURNING id, title, price, description, category, image
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))?;

        tracing::debug!(id, "product deleted");
        Ok(deleted)
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn create_product(&self, product: &NewProduct) -> Result<Product, DbError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO producto (title, price, description, category, image)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, price, description, category, image
            "#,
        )
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "product inserted");
        Ok(created)
    }

    async fn get_product(&self, id: i64) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, title, price, description, category, image FROM producto WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))
    }

    async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, title, price, description, category, image FROM producto ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price, description, category, image
            FROM producto
            WHERE category = ?
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products_limited(&self, limit: u32) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price, description, category, image
            FROM producto
            ORDER BY id
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products_by_category_desc(&self) -> Result<Vec<Product>, DbError> {
        // SQLite's default BINARY collation is byte order
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, price, description, category, image
            FROM producto
            ORDER BY category DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_product(&self, id: i64, product: &NewProduct) -> Result<Product, DbError> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE producto
            SET title = ?, price = ?, description = ?, category = ?, image = ?
            WHERE id = ?
            RETURNING id, title, price, description, category, image
            "#,
        )
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))?;

        tracing::debug!(id, "product updated");
        Ok(updated)
    }

    async fn delete_product(&self, id: i64) -> Result<Product, DbError> {
        let deleted = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM producto
            WHERE id = ?
            RETURNING id, title, price, description, category, image
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))?;

        tracing::debug!(id, "product deleted");
        Ok(deleted)
    }
}
