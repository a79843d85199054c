//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose rejection is a structured 400 instead of axum's plain-text
/// 415/422.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedRequest {
                reason: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Parse an id path segment.
///
/// Ids are opaque keys: a segment that is not an integer can never name a
/// stored record, so it is reported as not found.
async fn path_id<S>(parts: &mut Parts, state: &S, resource: &'static str) -> Result<i64, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|rejection| ApiError::MalformedRequest {
            reason: rejection.body_text(),
        })?;

    let parsed = raw.trim().parse::<i64>();
    match parsed {
        Ok(id) => Ok(id),
        Err(_) => Err(ApiError::NotFound { resource, id: raw }),
    }
}

/// Extract a product id from path
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, "product").await.map(Self)
    }
}

/// Extract a user id from path
pub struct UserId(pub i64);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, "user").await.map(Self)
    }
}
