//! Product records
//!
//! Column widths follow the legacy `producto` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{check_len, ValidationError};

const MAX_TITLE_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 300;
const MAX_CATEGORY_LEN: usize = 50;
const MAX_IMAGE_LEN: usize = 200;

/// Persisted catalog item
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

/// Writable product fields, used by both create and full-overwrite update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl NewProduct {
    /// Check every field against the schema limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len("title", &self.title, MAX_TITLE_LEN)?;
        if !self.price.is_finite() {
            return Err(ValidationError::NotFinite { field: "price" });
        }
        check_len("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_len("category", &self.category, MAX_CATEGORY_LEN)?;
        check_len("image", &self.image, MAX_IMAGE_LEN)?;
        Ok(())
    }
}

/// Body of the `PUT /update/{id}` response.
///
/// The legacy endpoint never echoed `description` back; clients depend on
/// that shape, so it is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: String,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            price: p.price,
            category: p.category,
            image: p.image,
        }
    }
}
