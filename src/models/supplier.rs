use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::Entity;
use crate::repository::SqliteEntity;

/// A wholesaler stock is bought from. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Entity for Supplier {
    const NAME: &'static str = "Supplier";
    const COLLECTION: &'static str = "suppliers";
    const SOFT_DELETE: bool = false;

    type Create = NewSupplier;
    type Patch = SupplierPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, input: NewSupplier, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            contact_person: input.contact_person,
            email: input.email,
            phone: input.phone,
            address: input.address,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: SupplierPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.contact_person.is_some() {
            self.contact_person = patch.contact_person;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        self.updated_at = now;
    }
}

#[async_trait]
impl SqliteEntity for Supplier {
    const TABLE: &'static str = "suppliers";

    async fn insert(pool: &SqlitePool, input: NewSupplier, now: DateTime<Utc>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Supplier>(
            r#"INSERT INTO suppliers (name, contact_person, email, phone, address, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING *"#,
        )
        .bind(input.name)
        .bind(input.contact_person)
        .bind(input.email)
        .bind(input.phone)
        .bind(input.address)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    async fn update(pool: &SqlitePool, supplier: &Self) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Supplier>(
            r#"UPDATE suppliers
               SET name = ?1, contact_person = ?2, email = ?3, phone = ?4, address = ?5, updated_at = ?6
               WHERE id = ?7 RETURNING *"#,
        )
        .bind(&supplier.name)
        .bind(&supplier.contact_person)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(&supplier.address)
        .bind(supplier.updated_at)
        .bind(supplier.id)
        .fetch_one(pool)
        .await
    }
}
