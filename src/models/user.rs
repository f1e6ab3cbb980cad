use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::Entity;
use crate::repository::SqliteEntity;

pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Entity for User {
    const NAME: &'static str = "User";
    const COLLECTION: &'static str = "users";
    const SOFT_DELETE: bool = true;

    type Create = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, input: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        self.updated_at = now;
    }
}

#[async_trait]
impl SqliteEntity for User {
    const TABLE: &'static str = "users";

    async fn insert(pool: &SqlitePool, input: NewUser, now: DateTime<Utc>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, role, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?4) RETURNING *"#,
        )
        .bind(input.name)
        .bind(input.email)
        .bind(input.role)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    async fn update(pool: &SqlitePool, user: &Self) -> sqlx::Result<Self> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users SET name = ?1, email = ?2, role = ?3, updated_at = ?4
               WHERE id = ?5 AND deleted_at IS NULL RETURNING *"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(user.updated_at)
        .bind(user.id)
        .fetch_one(pool)
        .await
    }
}
