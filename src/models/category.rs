use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::Entity;
use crate::repository::SqliteEntity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
}

impl Entity for Category {
    const NAME: &'static str = "Category";
    const COLLECTION: &'static str = "categories";
    const SOFT_DELETE: bool = false;

    type Create = NewCategory;
    type Patch = CategoryPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, input: NewCategory, now: DateTime<Utc>) -> Self {
        Self { id, name: input.name, created_at: now, updated_at: now }
    }

    fn apply(&mut self, patch: CategoryPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        self.updated_at = now;
    }
}

#[async_trait]
impl SqliteEntity for Category {
    const TABLE: &'static str = "categories";

    async fn insert(pool: &SqlitePool, input: NewCategory, now: DateTime<Utc>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, created_at, updated_at) VALUES (?1, ?2, ?2) RETURNING *",
        )
        .bind(input.name)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    async fn update(pool: &SqlitePool, category: &Self) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ?1, updated_at = ?2 WHERE id = ?3 RETURNING *",
        )
        .bind(&category.name)
        .bind(category.updated_at)
        .bind(category.id)
        .fetch_one(pool)
        .await
    }
}
