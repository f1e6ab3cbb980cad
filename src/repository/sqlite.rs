use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use super::Repository;
use crate::error::AppResult;
use crate::models::Entity;

/// Entity-specific SQL. Everything else is derived from the table name.
#[async_trait]
pub trait SqliteEntity: Entity + for<'r> FromRow<'r, SqliteRow> {
    const TABLE: &'static str;

    async fn insert(pool: &SqlitePool, input: Self::Create, now: DateTime<Utc>) -> sqlx::Result<Self>;

    async fn update(pool: &SqlitePool, entity: &Self) -> sqlx::Result<Self>;
}

pub struct SqliteRepository<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SqliteRepository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, _entity: PhantomData }
    }
}

fn live_filter<E: Entity>() -> &'static str {
    if E::SOFT_DELETE {
        " AND deleted_at IS NULL"
    } else {
        ""
    }
}

#[async_trait]
impl<E: SqliteEntity> Repository<E> for SqliteRepository<E> {
    async fn find_all(&self) -> AppResult<Vec<E>> {
        let sql = format!("SELECT * FROM {} WHERE 1 = 1{} ORDER BY id", E::TABLE, live_filter::<E>());
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE id = ?1{}", E::TABLE, live_filter::<E>());
        let row = sqlx::query_as::<_, E>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn create(&self, input: E::Create) -> AppResult<E> {
        let created = E::insert(&self.pool, input, Utc::now()).await?;
        tracing::debug!(table = E::TABLE, id = created.id(), "row inserted");
        Ok(created)
    }

    async fn save(&self, entity: &E) -> AppResult<E> {
        Ok(E::update(&self.pool, entity).await?)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = if E::SOFT_DELETE {
            let sql = format!(
                "UPDATE {} SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                E::TABLE
            );
            sqlx::query(&sql).bind(Utc::now()).bind(id).execute(&self.pool).await?
        } else {
            let sql = format!("DELETE FROM {} WHERE id = ?1", E::TABLE);
            sqlx::query(&sql).bind(id).execute(&self.pool).await?
        };
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1{})", E::TABLE, live_filter::<E>());
        let found: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(found)
    }
}
