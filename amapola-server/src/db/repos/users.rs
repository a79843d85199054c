//! User repository

use async_trait::async_trait;

use crate::db::store::first_credential_match;
use crate::db::{DbError, PgStore, SqliteStore, UserStore};
use crate::models::{Credentials, NewUser, User};

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuario (name, sex, username, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, sex, username, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.sex)
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "user inserted");
        Ok(created)
    }

    async fn get_user(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, sex, username, password FROM usuario WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT id, name, sex, username, password FROM usuario ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_user(&self, id: i64, user: &NewUser) -> Result<User, DbError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE usuario
            SET name = $2, sex = $3, username = $4, password = $5
            WHERE id = $1
            RETURNING id, name, sex, username, password
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.sex)
        .bind(&user.username)
        .bind(&user.password)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))?;

        tracing::debug!(id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: i64) -> Result<User, DbError> {
        let deleted = sqlx::query_as::<_, User>(
            "DELETE FROM usuario WHERE id = $1 RETURNING id, name, sex, username, password",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))?;

        tracing::debug!(id, "user deleted");
        Ok(deleted)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<User, DbError> {
        // LIMIT 2 is enough to tell a unique match from an ambiguous one
        let matches = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, sex, username, password
            FROM usuario
            WHERE username = $1 AND password = $2
            ORDER BY id
            LIMIT 2
            "#,
        )
        .bind(&credentials.username)
        .bind(&credentials.password)
        .fetch_all(&self.pool)
        .await?;

        first_credential_match(matches, credentials)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuario (name, sex, username, password)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, sex, username, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.sex)
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "user inserted");
        Ok(created)
    }

    async fn get_user(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, name, sex, username, password FROM usuario WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("user", id))
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT id, name, sex, username, password FROM usuario ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_user(&self, id: i64, user: &NewUser) -> Result<User, DbError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE usuario
            SET name = ?, sex = ?, username = ?, password = ?
            WHERE id = ?
            RETURNING id, name, sex, username, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.sex)
        .bind(&user.username)
        .bind(&user.password)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))?;

        tracing::debug!(id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: i64) -> Result<User, DbError> {
        let deleted = sqlx::query_as::<_, User>(
            "DELETE FROM usuario WHERE id = ? RETURNING id, name, sex, username, password",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))?;

        tracing::debug!(id, "user deleted");
        Ok(deleted)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<User, DbError> {
        let matches = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, sex, username, password
            FROM usuario
            WHERE username = ? AND password = ?
            ORDER BY id
            LIMIT 2
            "#,
        )
        .bind(&credentials.username)
        .bind(&credentials.password)
        .fetch_all(&self.pool)
        .await?;

        first_credential_match(matches, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, username: &str, password: &str) -> NewUser {
        NewUser {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            sex: "F".into(),
        }
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    async fn store() -> SqliteStore {
        SqliteStore::in_memory().await.expect("in-memory store")
    }

    #[tokio::test]
    async fn create_list_update_delete() {
        let store = store().await;
        let ana = store.create_user(&user("Ana", "ana", "1234")).await.unwrap();
        let luis = store.create_user(&user("Luis", "luis", "abcd")).await.unwrap();
        assert_ne!(ana.id, luis.id);

        let all = store.list_users().await.unwrap();
        assert_eq!(all, vec![ana.clone(), luis.clone()]);

        let renamed = store
            .update_user(ana.id, &user("Ana María", "anamaria", "5678"))
            .await
            .unwrap();
        assert_eq!(renamed.id, ana.id);
        assert_eq!(store.get_user(ana.id).await.unwrap().name, "Ana María");

        let deleted = store.delete_user(luis.id).await.unwrap();
        assert_eq!(deleted, luis);
        assert!(matches!(
            store.get_user(luis.id).await,
            Err(DbError::NotFound { resource: "user", .. })
        ));
    }

    #[tokio::test]
    async fn update_and_delete_missing_user() {
        let store = store().await;
        assert!(matches!(
            store.update_user(5, &user("x", "x", "x")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_user(5).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn authenticate_requires_both_fields() {
        let store = store().await;
        let ana = store.create_user(&user("Ana", "ana", "1234")).await.unwrap();

        let found = store.authenticate(&creds("ana", "1234")).await.unwrap();
        assert_eq!(found, ana);

        assert!(matches!(
            store.authenticate(&creds("ana", "wrong")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.authenticate(&creds("nobody", "1234")).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn authenticate_duplicate_username_picks_lowest_id() {
        let store = store().await;
        let first = store.create_user(&user("Ana", "ana", "1234")).await.unwrap();
        store.create_user(&user("Ana B", "ana", "1234")).await.unwrap();

        let found = store.authenticate(&creds("ana", "1234")).await.unwrap();
        assert_eq!(found.id, first.id);
    }
}
