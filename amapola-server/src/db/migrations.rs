//! Schema creation for the `producto` and `usuario` tables
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so it runs on each startup.
//! Column widths match the legacy MySQL schema.

use sqlx::{PgPool, SqlitePool};

use super::DbError;

/// Create the PostgreSQL schema.
pub async fn run_postgres(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running postgres migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS producto (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(50) NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            description VARCHAR(300) NOT NULL,
            category VARCHAR(50) NOT NULL,
            image VARCHAR(200) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuario (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            sex VARCHAR(100) NOT NULL,
            username VARCHAR(100) NOT NULL,
            password VARCHAR(200) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_producto_category ON producto(category)")
        .execute(pool)
        .await?;
    // Not UNIQUE: username uniqueness is a convention only
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_usuario_username ON usuario(username)")
        .execute(pool)
        .await?;

    tracing::info!("postgres migrations complete");
    Ok(())
}

/// Create the SQLite schema.
///
/// AUTOINCREMENT keeps ids of deleted rows from being handed out again.
pub async fn run_sqlite(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running sqlite migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS producto (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            price REAL NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            image TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuario (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            sex TEXT NOT NULL,
            username TEXT NOT NULL,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_producto_category ON producto(category)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_usuario_username ON usuario(username)")
        .execute(pool)
        .await?;

    tracing::info!("sqlite migrations complete");
    Ok(())
}
