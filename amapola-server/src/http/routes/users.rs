//! User account endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{UserId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Credentials, NewUser, User};

/// POST /login - look up a user by username and password
async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(credentials): ValidJson<Credentials>,
) -> Result<Json<User>, ApiError> {
    let user = state.store.authenticate(&credentials).await?;
    tracing::info!(id = user.id, "login matched");

    Ok(Json(user))
}

/// GET /usuarios - list all users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.store.list_users().await?))
}

/// POST /registrousuario - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    req.validate()?;
    let user = state.store.create_user(&req).await?;
    tracing::info!(id = user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /updateusuario/{id} - overwrite a user
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
    ValidJson(req): ValidJson<NewUser>,
) -> Result<Json<Vec<User>>, ApiError> {
    req.validate()?;
    let user = state.store.update_user(id, &req).await?;
    tracing::info!(id, "user updated");

    Ok(Json(vec![user]))
}

/// DELETE /borrarusuario/{id} - delete a user, echoing what was removed
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<Json<Vec<User>>, ApiError> {
    let user = state.store.delete_user(id).await?;
    tracing::info!(id, "user deleted");

    Ok(Json(vec![user]))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/usuarios", get(list_users))
        .route("/registrousuario", post(create_user))
        .route("/updateusuario/{id}", put(update_user))
        .route("/borrarusuario/{id}", delete(delete_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::http::server::{build_router, ServerConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let store = SqliteStore::in_memory().await.unwrap();
        build_router(AppState::new(Arc::new(store)), &ServerConfig::default())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn ana() -> Value {
        json!({
            "nombre": "Ana",
            "usuario": "ana",
            "contraseña": "1234",
            "sexo": "F"
        })
    }

    #[tokio::test]
    async fn register_login_update_delete() {
        let app = app().await;

        let (status, created) = send(&app, "POST", "/registrousuario", Some(ana())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["contraseña"], "1234");

        let (status, user) = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "usuario": "ana", "pass": "1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["id"], id);
        assert_eq!(user["nombre"], "Ana");
        assert_eq!(user["sexo"], "F");

        let mut renamed = ana();
        renamed["nombre"] = json!("Ana María");
        let (status, updated) =
            send(&app, "PUT", &format!("/updateusuario/{id}"), Some(renamed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated[0]["nombre"], "Ana María");
        assert_eq!(updated[0]["usuario"], "ana");

        let (_, all) = send(&app, "GET", "/usuarios", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (status, deleted) = send(&app, "DELETE", &format!("/borrarusuario/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted[0]["id"], id);

        let (_, all) = send(&app, "GET", "/usuarios", None).await;
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn login_without_match_is_404() {
        let app = app().await;
        send(&app, "POST", "/registrousuario", Some(ana())).await;

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "usuario": "ana", "pass": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn login_missing_pass_is_malformed() {
        let app = app().await;
        let (status, _) = send(&app, "POST", "/login", Some(json!({ "usuario": "ana" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_unknown_user_is_404() {
        let app = app().await;
        let (status, _) = send(&app, "DELETE", "/borrarusuario/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
