use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::Entity;
use crate::repository::SqliteEntity;

pub const DEFAULT_STATUS: &str = "pending";

/// A customer question about a product. `user_id` and `product_id` are only
/// checked by the database's foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Inquiry {
    pub id: i64,
    pub message: String,
    pub status: String,
    pub user_id: i64,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInquiry {
    pub message: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub user_id: i64,
    pub product_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryPatch {
    pub message: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<i64>,
    pub product_id: Option<i64>,
}

impl Entity for Inquiry {
    const NAME: &'static str = "Inquiry";
    const COLLECTION: &'static str = "inquiries";
    const SOFT_DELETE: bool = true;

    type Create = NewInquiry;
    type Patch = InquiryPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, input: NewInquiry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            message: input.message,
            status: input.status,
            user_id: input.user_id,
            product_id: input.product_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn apply(&mut self, patch: InquiryPatch, now: DateTime<Utc>) {
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(product_id) = patch.product_id {
            self.product_id = product_id;
        }
        self.updated_at = now;
    }
}

#[async_trait]
impl SqliteEntity for Inquiry {
    const TABLE: &'static str = "inquiries";

    async fn insert(pool: &SqlitePool, input: NewInquiry, now: DateTime<Utc>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Inquiry>(
            r#"INSERT INTO inquiries (message, status, user_id, product_id, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING *"#,
        )
        .bind(input.message)
        .bind(input.status)
        .bind(input.user_id)
        .bind(input.product_id)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    async fn update(pool: &SqlitePool, inquiry: &Self) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Inquiry>(
            r#"UPDATE inquiries
               SET message = ?1, status = ?2, user_id = ?3, product_id = ?4, updated_at = ?5
               WHERE id = ?6 AND deleted_at IS NULL RETURNING *"#,
        )
        .bind(&inquiry.message)
        .bind(&inquiry.status)
        .bind(inquiry.user_id)
        .bind(inquiry.product_id)
        .bind(inquiry.updated_at)
        .bind(inquiry.id)
        .fetch_one(pool)
        .await
    }
}
