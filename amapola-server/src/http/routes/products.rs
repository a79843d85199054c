//! Product endpoints
//!
//! Paths are the legacy ones, so existing frontends keep working unchanged.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{ProductId, ValidJson};
use crate::http::server::AppState;
use crate::models::{NewProduct, Product, ProductSummary};

/// Page size of the fixed `/productos/limite=5` listing
pub const LISTING_LIMIT: u32 = 5;

/// POST /registro - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    req.validate()?;
    let product = state.store.create_product(&req).await?;
    tracing::info!(id = product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /productos - list all products
async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products().await?))
}

/// GET /producto/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.store.get_product(id).await?))
}

/// GET /productos/category/{category} - products in one category
async fn list_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products_by_category(&category).await?))
}

/// GET /productos/limite=5 - first products in store order
async fn list_limited(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products_limited(LISTING_LIMIT).await?))
}

/// GET /productos/decendiente - all products by category, descending
async fn list_by_category_desc(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products_by_category_desc().await?))
}

/// PUT /update/{id} - overwrite a product
async fn update_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
    ValidJson(req): ValidJson<NewProduct>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    req.validate()?;
    let product = state.store.update_product(id, &req).await?;
    tracing::info!(id, "product updated");

    Ok(Json(vec![ProductSummary::from(product)]))
}

/// DELETE /borrar/{id} - delete a product, echoing what was removed
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<Vec<Product>>, ApiError> {
    let product = state.store.delete_product(id).await?;
    tracing::info!(id, "product deleted");

    Ok(Json(vec![product]))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/registro", post(create_product))
        .route("/productos", get(list_products))
        .route("/producto/{id}", get(get_product))
        .route("/productos/category/{category}", get(list_by_category))
        .route("/productos/limite=5", get(list_limited))
        .route("/productos/decendiente", get(list_by_category_desc))
        .route("/update/{id}", put(update_product))
        .route("/borrar/{id}", delete(delete_product))
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
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn rose() -> Value {
        json!({
            "title": "Rose",
            "price": 9.99,
            "description": "Red rose",
            "category": "flowers",
            "image": "rose.png"
        })
    }

    #[tokio::test]
    async fn rose_lifecycle() {
        let app = app().await;

        let (status, created) = send(&app, "POST", "/registro", Some(rose())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().expect("id assigned");

        let (status, all) = send(&app, "GET", "/productos", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed = &all.as_array().unwrap()[0];
        assert_eq!(listed["title"], "Rose");
        assert_eq!(listed["price"], 9.99);
        assert_eq!(listed["description"], "Red rose");
        assert_eq!(listed["category"], "flowers");
        assert_eq!(listed["image"], "rose.png");
        assert_eq!(listed["id"], id);

        let mut plants = rose();
        plants["category"] = json!("plants");
        let (status, updated) = send(&app, "PUT", &format!("/update/{id}"), Some(plants)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            updated,
            json!([{
                "id": id,
                "title": "Rose",
                "price": 9.99,
                "category": "plants",
                "image": "rose.png"
            }])
        );

        let (status, fetched) = send(&app, "GET", &format!("/producto/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["category"], "plants");
        assert_eq!(fetched["title"], "Rose");
        assert_eq!(fetched["description"], "Red rose");

        let (status, deleted) = send(&app, "DELETE", &format!("/borrar/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted[0]["id"], id);
        assert_eq!(deleted[0]["description"], "Red rose");

        let (status, body) = send(&app, "GET", &format!("/producto/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/registro",
            Some(json!({ "title": "Rose", "price": 9.99 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed_request");
    }

    #[tokio::test]
    async fn overlong_title_is_rejected() {
        let app = app().await;
        let mut product = rose();
        product["title"] = json!("t".repeat(51));
        let (status, body) = send(&app, "POST", "/registro", Some(product)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_are_404() {
        let app = app().await;
        let (status, _) = send(&app, "PUT", "/update/41", Some(rose())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/borrar/41", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", "/producto/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "product 'abc' not found");
    }

    #[tokio::test]
    async fn query_variants() {
        let app = app().await;
        for (i, category) in ["b", "a", "c", "a", "b", "c", "a"].iter().enumerate() {
            let mut product = rose();
            product["title"] = json!(format!("p{i}"));
            product["category"] = json!(category);
            let (status, _) = send(&app, "POST", "/registro", Some(product)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, limited) = send(&app, "GET", "/productos/limite=5", None).await;
        let titles: Vec<&str> = limited
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["p0", "p1", "p2", "p3", "p4"]);

        let (_, by_category) = send(&app, "GET", "/productos/category/a", None).await;
        assert_eq!(by_category.as_array().unwrap().len(), 3);

        let (status, empty) = send(&app, "GET", "/productos/category/zzz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, json!([]));

        let (_, sorted) = send(&app, "GET", "/productos/decendiente", None).await;
        let categories: Vec<&str> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["c", "c", "b", "b", "a", "a", "a"]);
    }
}
