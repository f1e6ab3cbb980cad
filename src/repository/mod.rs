//! Persistence interface injected into every resource router.
//!
//! Handlers only see [`Repository`]; the server wires in [`SqliteRepository`],
//! tests can swap in [`MemoryRepository`].

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Entity;

mod memory;
mod sqlite;

pub use memory::MemoryRepository;
pub use sqlite::{SqliteEntity, SqliteRepository};

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All live rows, ordered by id.
    async fn find_all(&self) -> AppResult<Vec<E>>;

    /// `None` when the row does not exist or was soft-deleted.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>>;

    /// Inserts a new row; id and timestamps are assigned here.
    async fn create(&self, input: E::Create) -> AppResult<E>;

    /// Writes every field of `entity` back to its row.
    async fn save(&self, entity: &E) -> AppResult<E>;

    /// Returns `false` when no live row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
