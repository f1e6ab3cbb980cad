use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::Entity;
use crate::repository::SqliteEntity;

/// A sellable medicine. Price and stock are expected to be non-negative but the
/// database does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl Entity for Product {
    const NAME: &'static str = "Product";
    const COLLECTION: &'static str = "products";
    const SOFT_DELETE: bool = true;

    type Create = NewProduct;
    type Patch = ProductPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, input: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            category_id: input.category_id,
            description: input.description,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn apply(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.category_id.is_some() {
            self.category_id = patch.category_id;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        self.updated_at = now;
    }
}

#[async_trait]
impl SqliteEntity for Product {
    const TABLE: &'static str = "products";

    async fn insert(pool: &SqlitePool, input: NewProduct, now: DateTime<Utc>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Product>(
            r#"INSERT INTO products (name, category_id, description, price, stock, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING *"#,
        )
        .bind(input.name)
        .bind(input.category_id)
        .bind(input.description)
        .bind(input.price)
        .bind(input.stock)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    async fn update(pool: &SqlitePool, product: &Self) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Product>(
            r#"UPDATE products
               SET name = ?1, category_id = ?2, description = ?3, price = ?4, stock = ?5, updated_at = ?6
               WHERE id = ?7 AND deleted_at IS NULL RETURNING *"#,
        )
        .bind(&product.name)
        .bind(product.category_id)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.updated_at)
        .bind(product.id)
        .fetch_one(pool)
        .await
    }
}
