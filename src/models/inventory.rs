use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::Entity;
use crate::repository::SqliteEntity;

/// A stocked batch of one product. The product is fixed at creation and must
/// be a live row at that point; `expiry_date` is a plain `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemPatch {
    pub quantity: Option<i64>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl Entity for InventoryItem {
    const NAME: &'static str = "Inventory item";
    const COLLECTION: &'static str = "inventory";
    const SOFT_DELETE: bool = false;

    type Create = NewInventoryItem;
    type Patch = InventoryItemPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(input: &NewInventoryItem) -> Option<i64> {
        Some(input.product_id)
    }

    fn build(id: i64, input: NewInventoryItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            product_id: input.product_id,
            quantity: input.quantity,
            batch_number: input.batch_number,
            expiry_date: input.expiry_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: InventoryItemPatch, now: DateTime<Utc>) {
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if patch.batch_number.is_some() {
            self.batch_number = patch.batch_number;
        }
        if patch.expiry_date.is_some() {
            self.expiry_date = patch.expiry_date;
        }
        self.updated_at = now;
    }
}

#[async_trait]
impl SqliteEntity for InventoryItem {
    const TABLE: &'static str = "inventory_items";

    async fn insert(pool: &SqlitePool, input: NewInventoryItem, now: DateTime<Utc>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, InventoryItem>(
            r#"INSERT INTO inventory_items (product_id, quantity, batch_number, expiry_date, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING *"#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.batch_number)
        .bind(input.expiry_date)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    async fn update(pool: &SqlitePool, item: &Self) -> sqlx::Result<Self> {
        sqlx::query_as::<_, InventoryItem>(
            r#"UPDATE inventory_items
               SET quantity = ?1, batch_number = ?2, expiry_date = ?3, updated_at = ?4
               WHERE id = ?5 RETURNING *"#,
        )
        .bind(item.quantity)
        .bind(&item.batch_number)
        .bind(item.expiry_date)
        .bind(item.updated_at)
        .bind(item.id)
        .fetch_one(pool)
        .await
    }
}
