use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Repository;
use crate::error::{AppResult, OptionExt};
use crate::models::Entity;

struct Row<E> {
    entity: E,
    deleted: bool,
}

struct Table<E> {
    next_id: i64,
    rows: BTreeMap<i64, Row<E>>,
}

/// In-process repository. Ids start at 1; no uniqueness or foreign keys.
pub struct MemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self { table: RwLock::new(Table { next_id: 1, rows: BTreeMap::new() }) }
    }
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> AppResult<Vec<E>> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|r| !r.deleted).map(|r| r.entity.clone()).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|r| !r.deleted).map(|r| r.entity.clone()))
    }

    async fn create(&self, input: E::Create) -> AppResult<E> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        let entity = E::build(id, input, Utc::now());
        table.rows.insert(id, Row { entity: entity.clone(), deleted: false });
        Ok(entity)
    }

    async fn save(&self, entity: &E) -> AppResult<E> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&entity.id()).filter(|r| !r.deleted).ok_or_not_found(E::NAME)?;
        row.entity = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut table = self.table.write().await;
        let live = table.rows.get(&id).map(|r| !r.deleted).unwrap_or(false);
        if !live {
            return Ok(false);
        }
        if E::SOFT_DELETE {
            if let Some(row) = table.rows.get_mut(&id) {
                row.deleted = true;
            }
        } else {
            table.rows.remove(&id);
        }
        Ok(true)
    }
}
